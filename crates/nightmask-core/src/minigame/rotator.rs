//! Rotator minigame: press the four directions in cyclic order.
//!
//! Each correct press turns the visual a quarter turn and adds a random
//! slice of progress; reaching the target completes the session. Wrong or
//! simultaneous presses are ignored under the default policy; the
//! `reset_progress_on_fail` flag restores the earlier, punishing behavior.

use std::f32::consts::FRAC_PI_2;

use rand::{Rng, RngCore};

use crate::config::RotatorConfig;
use crate::input::{Action, InputSource};
use crate::minigame::{MinigameSession, MinigameState};

/// Expected press order: up, right, down, left, repeating. The movement
/// actions double as directions (forward = up, back = down).
const DIRECTION_ORDER: [Action; 4] = [
    Action::MoveForward,
    Action::MoveRight,
    Action::MoveBack,
    Action::MoveLeft,
];

#[derive(Debug, Clone)]
pub struct RotatorMinigame {
    config: RotatorConfig,
    state: MinigameState,
    progress: f32,
    expected_index: usize,
    rotation_steps: u32,
    consumed_this_tick: bool,
    enabled: bool,
}

impl RotatorMinigame {
    /// Build the variant. An impossible target or inverted progress bounds
    /// are reported once and leave the variant disabled: `start` then never
    /// activates it.
    pub fn new(config: RotatorConfig) -> Self {
        let enabled = config.target > 0.0
            && config.min_progress_per_press >= 0.0
            && config.min_progress_per_press <= config.max_progress_per_press;
        if !enabled {
            log::error!(
                "rotator minigame disabled: bad config (target {}, progress {}..{})",
                config.target,
                config.min_progress_per_press,
                config.max_progress_per_press
            );
        }
        Self {
            config,
            state: MinigameState::Inactive,
            progress: 0.0,
            expected_index: 0,
            rotation_steps: 0,
            consumed_this_tick: false,
            enabled,
        }
    }

    /// Accumulated progress toward the target.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Progress as a fraction of the target, for the fill bar.
    pub fn progress_fraction(&self) -> f32 {
        if self.config.target <= 0.0 {
            return 0.0;
        }
        (self.progress / self.config.target).clamp(0.0, 1.0)
    }

    /// Cosmetic rotation of the visual in radians: a quarter turn per
    /// correct press. The presentation layer may tween toward this; the
    /// session never waits for it.
    pub fn visual_angle(&self) -> f32 {
        self.rotation_steps as f32 * FRAC_PI_2
    }

    /// The direction expected next.
    pub fn expected_direction(&self) -> Action {
        DIRECTION_ORDER[self.expected_index]
    }

    /// Exactly one fresh directional press this tick, or `None` when there
    /// was no press or several at once (simultaneous presses are ambiguous
    /// and treated as a miss).
    fn pressed_direction(input: &dyn InputSource) -> Option<Action> {
        let mut pressed = None;
        let mut count = 0;
        for action in DIRECTION_ORDER {
            if input.is_action_just_pressed(action) {
                if count == 0 {
                    pressed = Some(action);
                }
                count += 1;
            }
        }
        if count == 1 {
            pressed
        } else {
            None
        }
    }

    fn on_correct_press(&mut self, rng: &mut dyn RngCore) {
        self.expected_index = (self.expected_index + 1) % DIRECTION_ORDER.len();
        self.rotation_steps += 1;

        let increment =
            rng.gen_range(self.config.min_progress_per_press..=self.config.max_progress_per_press);
        self.progress = (self.progress + increment).min(self.config.target);

        if self.progress >= self.config.target {
            self.state = MinigameState::Completed;
        }
    }

    fn on_fail(&mut self) {
        if self.config.reset_progress_on_fail {
            self.expected_index = 0;
            self.rotation_steps = 0;
            self.progress = 0.0;
        }
    }
}

impl MinigameSession for RotatorMinigame {
    fn start(&mut self, _rng: &mut dyn RngCore) {
        if !self.enabled {
            return;
        }
        if self.state == MinigameState::Active {
            log::warn!("rotator minigame start rejected: session already active");
            return;
        }
        self.progress = 0.0;
        self.expected_index = 0;
        self.rotation_steps = 0;
        self.consumed_this_tick = false;
        self.state = MinigameState::Active;
    }

    fn stop(&mut self) {
        self.state = MinigameState::Inactive;
    }

    fn reset(&mut self) {
        self.progress = 0.0;
        self.expected_index = 0;
        self.rotation_steps = 0;
        self.state = MinigameState::Inactive;
    }

    fn begin_tick(&mut self) {
        self.consumed_this_tick = false;
    }

    fn handle_input(&mut self, input: &dyn InputSource, rng: &mut dyn RngCore) {
        if self.state != MinigameState::Active || self.consumed_this_tick {
            return;
        }
        self.consumed_this_tick = true;

        let had_any_press = DIRECTION_ORDER
            .iter()
            .any(|&a| input.is_action_just_pressed(a));
        match Self::pressed_direction(input) {
            Some(pressed) if pressed == self.expected_direction() => self.on_correct_press(rng),
            Some(_) => self.on_fail(),
            None if had_any_press => self.on_fail(),
            None => {}
        }
    }

    fn state(&self) -> MinigameState {
        self.state
    }
}
