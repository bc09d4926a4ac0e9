//! Game engine - the composition root tying every subsystem together.
//!
//! One `GameEngine` owns the scheduler, the resource model, the interaction
//! model, both minigames, and the cosmetic followers. The frontend drives it
//! with one `update` per rendered frame and reads state back through
//! accessors; all cross-component causality lives here.
//!
//! Tick order is fixed: event-timer expiry, then sleep/score, then prompt
//! recomputation, then input. Consumers relying on a different order would
//! read one-tick-stale state.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::audio::{event_audio, mask_applied_audio, AudioSink, MaskAppliedAudio};
use crate::config::GameConfig;
use crate::effects::{Salesman, VisualSink, WaterLevel};
use crate::input::{Action, InputSource};
use crate::interaction::{InteractionModel, MaskId, Prompt};
use crate::mask::MaskKind;
use crate::math::Transform;
use crate::minigame::{
    MinigameKind, MinigameSession, MinigameState, RotatorMinigame, TyperMinigame, SLEEP_WORDS,
};
use crate::music::MusicDirector;
use crate::scheduler::EventScheduler;
use crate::sleep::{NightTimer, Score, SleepMeter};

/// How the night stands. Once won or lost, every further tick is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Running,
    /// The night timer ran out while the player was still asleep.
    Won,
    /// The sleep meter hit zero.
    Lost,
}

pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    scheduler: EventScheduler,
    sleep: SleepMeter,
    score: Score,
    night: NightTimer,
    interaction: InteractionModel,
    rotator: RotatorMinigame,
    typer: TyperMinigame,
    active_minigame: Option<MinigameKind>,
    music: MusicDirector,
    salesman: Salesman,
    water: WaterLevel,
    prompt: Prompt,
    outcome: GameOutcome,
}

impl GameEngine {
    /// Construct every subsystem from one config. Each subsystem validates
    /// its own slice at construction, reports problems once through `log`,
    /// and degrades to a no-op rather than panicking. Use
    /// [`crate::config::validate_config`] to surface the full error list
    /// up front.
    pub fn new(config: GameConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            scheduler: EventScheduler::new(config.events.clone()),
            sleep: SleepMeter::new(&config.sleep),
            score: Score::new(config.sleep.score_per_second),
            night: NightTimer::new(config.night_length),
            interaction: InteractionModel::new(),
            rotator: RotatorMinigame::new(config.rotator.clone()),
            typer: TyperMinigame::new(SLEEP_WORDS),
            active_minigame: None,
            music: MusicDirector::new(config.music.clone()),
            salesman: Salesman::new(
                Transform::default(),
                Transform::default(),
                Transform::default(),
            ),
            water: WaterLevel::new(-1.0, 1.0, 2.0),
            prompt: Prompt::None,
            config,
            outcome: GameOutcome::Running,
        }
    }

    /// Register a mask at its spawn transform; the scene calls this once per
    /// mask while loading the house.
    pub fn register_mask(&mut self, kind: MaskKind, spawn: Transform) -> MaskId {
        self.interaction.register_mask(kind, spawn)
    }

    /// Scene setup: where the salesman waits, approaches to, and retreats to.
    pub fn set_salesman_waypoints(&mut self, start: Transform, active: Transform, end: Transform) {
        self.salesman = Salesman::new(start, active, end);
    }

    /// Zone callback from the physics layer.
    pub fn set_near_mask(&mut self, mask: Option<MaskId>) {
        self.interaction.set_near_mask(mask);
    }

    /// Zone callback from the physics layer.
    pub fn set_near_bed(&mut self, near: bool) {
        self.interaction.set_near_bed(near);
    }

    /// One simulation tick. `dt` is the frame delta in seconds.
    pub fn update(
        &mut self,
        dt: f32,
        input: &dyn InputSource,
        audio: &mut dyn AudioSink,
        visual: &mut dyn VisualSink,
    ) {
        if self.outcome != GameOutcome::Running {
            return;
        }

        // 1. Event timer; an expiry ends the old event and starts the next
        //    within this same tick.
        if let Some(transition) = self.scheduler.tick(dt, &mut self.rng) {
            if transition.ended != MaskKind::None {
                self.on_event_ended(transition.ended, audio, visual);
            }
            self.on_event_started(transition.started, audio, visual);
        }

        // 2. Resources. Sleep fills during calm stretches and countered
        //    events, drains otherwise; score follows the sleep level.
        let active = self.scheduler.active_kind();
        let should_fill = active == MaskKind::None || self.interaction.seated_kind() == active;
        self.sleep.tick(dt, should_fill);
        self.score.tick(dt, self.sleep.normalized());
        self.night.tick(dt);

        // 3. Single visible prompt for this tick.
        self.prompt = self.interaction.prompt(active);

        // 4. Input. An active minigame owns it exclusively.
        self.handle_player_input(input, audio);

        // 5. End conditions, night completion first.
        if self.night.is_complete() {
            self.finish(GameOutcome::Won, audio);
        } else if self.sleep.is_depleted() {
            self.finish(GameOutcome::Lost, audio);
        }

        // 6. Cosmetic followers; never gate anything above.
        let scary = self.scheduler.active_kind() == MaskKind::Scary;
        let countered = scary && self.interaction.seated_kind() == MaskKind::Scary;
        self.salesman.tick(dt, scary, countered);
        self.water
            .tick(dt, self.scheduler.active_kind() == MaskKind::Snorkel);
        self.music.tick(dt, self.sleep.normalized(), audio);
    }

    fn on_event_started(
        &mut self,
        kind: MaskKind,
        audio: &mut dyn AudioSink,
        visual: &mut dyn VisualSink,
    ) {
        let cues = event_audio(kind);
        if let Some(stream) = cues.one_shot {
            audio.play_one_shot(stream);
        }
        if let Some(stream) = cues.looping {
            audio.play_loop(stream);
        }

        visual.set_effect_visible(kind, true);
        if kind == MaskKind::Cooling {
            visual.set_radiator_animating(true);
        }
    }

    fn on_event_ended(
        &mut self,
        kind: MaskKind,
        audio: &mut dyn AudioSink,
        visual: &mut dyn VisualSink,
    ) {
        // The countermeasure is spent: the bed slot clears and the mask
        // walks itself home.
        self.interaction.release_seated();
        audio.stop_loop();

        visual.set_effect_visible(kind, false);
        if kind == MaskKind::Cooling {
            visual.set_radiator_animating(false);
        }
    }

    fn handle_player_input(&mut self, input: &dyn InputSource, audio: &mut dyn AudioSink) {
        if let Some(kind) = self.active_minigame {
            let Self {
                rotator,
                typer,
                rng,
                ..
            } = self;
            let session: &mut dyn MinigameSession = match kind {
                MinigameKind::Rotator => rotator,
                MinigameKind::Typer => typer,
            };
            session.begin_tick();
            session.handle_input(input, rng);

            if session.state() == MinigameState::Completed {
                session.reset();
                self.active_minigame = None;
                self.commit_mask(audio);
            }
            return;
        }

        if input.is_action_just_pressed(Action::Interact) {
            if self.interaction.can_apply_mask() {
                self.start_minigame();
            } else {
                self.interaction.try_pickup();
            }
        }
    }

    fn start_minigame(&mut self) {
        if self.active_minigame.is_some() {
            log::warn!("minigame start rejected: a session is already active");
            return;
        }

        let kind = self.config.pinned_minigame.unwrap_or_else(|| {
            if self.rng.gen_bool(0.5) {
                MinigameKind::Rotator
            } else {
                MinigameKind::Typer
            }
        });

        let Self { rotator, typer, rng, .. } = self;
        let session: &mut dyn MinigameSession = match kind {
            MinigameKind::Rotator => rotator,
            MinigameKind::Typer => typer,
        };
        session.start(rng);

        // A disabled variant stays inactive; don't steal input for it.
        if session.state() == MinigameState::Active {
            self.active_minigame = Some(kind);
        }
    }

    /// Minigame succeeded: move the carried mask onto the bed and run the
    /// per-kind countered-audio behavior if it counters the running event.
    fn commit_mask(&mut self, audio: &mut dyn AudioSink) {
        let Some(seated) = self.interaction.commit_carried_to_bed() else {
            return;
        };

        if seated == self.scheduler.active_kind() {
            match mask_applied_audio(seated) {
                MaskAppliedAudio::Ignore => {}
                MaskAppliedAudio::StopLoop => audio.stop_loop(),
                MaskAppliedAudio::SwitchLoop(stream) => {
                    audio.stop_loop();
                    audio.play_loop(stream);
                }
            }
        }
    }

    fn finish(&mut self, outcome: GameOutcome, audio: &mut dyn AudioSink) {
        self.outcome = outcome;
        // Force-stop is idempotent; a session may or may not be running.
        self.rotator.stop();
        self.typer.stop();
        self.active_minigame = None;
        audio.stop_loop();
    }

    // ── Read-side accessors for the presentation layer ──────────────────

    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    pub fn is_ended(&self) -> bool {
        self.outcome != GameOutcome::Running
    }

    /// The running event, `MaskKind::None` between events.
    pub fn active_event(&self) -> MaskKind {
        self.scheduler.active_kind()
    }

    pub fn sleep_value(&self) -> f32 {
        self.sleep.value()
    }

    pub fn score(&self) -> f32 {
        self.score.value()
    }

    /// Night progress in [0, 1]; drives the clock dial.
    pub fn night_progress(&self) -> f32 {
        self.night.progress()
    }

    /// The single prompt the UI should show this tick.
    pub fn prompt(&self) -> Prompt {
        self.prompt
    }

    /// True while a minigame owns input; movement handling must suspend.
    pub fn is_input_locked(&self) -> bool {
        self.active_minigame.is_some()
    }

    pub fn active_minigame(&self) -> Option<MinigameKind> {
        self.active_minigame
    }

    pub fn interaction(&self) -> &InteractionModel {
        &self.interaction
    }

    pub fn rotator(&self) -> &RotatorMinigame {
        &self.rotator
    }

    pub fn typer(&self) -> &TyperMinigame {
        &self.typer
    }

    pub fn salesman(&self) -> &Salesman {
        &self.salesman
    }

    pub fn water(&self) -> &WaterLevel {
        &self.water
    }
}
