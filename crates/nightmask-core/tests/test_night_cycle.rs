//! Integration tests for a full night driven through the public API.
//!
//! Exercises: GameConfig → GameEngine → scheduler/interaction/minigame
//! → win/loss latch.
//!
//! All tests are pure logic, with scripted input and null sinks in place
//! of rendering and real audio.

use nightmask_core::audio::NullAudioSink;
use nightmask_core::config::{EventConfig, GameConfig};
use nightmask_core::effects::NullVisualSink;
use nightmask_core::engine::{GameEngine, GameOutcome};
use nightmask_core::input::{Action, ScriptedInput};
use nightmask_core::interaction::Prompt;
use nightmask_core::mask::{MaskKind, ALL_KINDS};
use nightmask_core::math::{Transform, Vec3};
use nightmask_core::minigame::MinigameKind;

// ── Helpers ────────────────────────────────────────────────────────────

/// Engine with all eight masks registered at distinct spawn points and the
/// typer pinned so mask application is fully scriptable.
fn house_engine(config: GameConfig) -> GameEngine {
    let mut engine = GameEngine::new(GameConfig {
        pinned_minigame: Some(MinigameKind::Typer),
        ..config
    });
    for (i, kind) in ALL_KINDS.iter().enumerate() {
        engine.register_mask(
            *kind,
            Transform::new(Vec3::new(i as f32 * 2.0, 0.0, -1.0), 0.25 * i as f32),
        );
    }
    engine
}

fn long_events() -> EventConfig {
    EventConfig {
        min_duration: 1000.0,
        max_duration: 1000.0,
        initial_delay: 0.0,
    }
}

fn idle_tick(engine: &mut GameEngine, dt: f32) {
    let input = ScriptedInput::new();
    engine.update(dt, &input, &mut NullAudioSink, &mut NullVisualSink);
}

fn press_tick(engine: &mut GameEngine, action: Action) {
    let mut input = ScriptedInput::new();
    input.press(action);
    engine.update(0.05, &input, &mut NullAudioSink, &mut NullVisualSink);
}

/// Walk the player through pickup and minigame so `kind`'s mask ends up
/// seated at the bed.
fn seat_mask(engine: &mut GameEngine, kind: MaskKind) {
    let id = ALL_KINDS.iter().position(|&k| k == kind).unwrap();

    engine.set_near_mask(Some(id));
    press_tick(engine, Action::Interact);
    assert_eq!(engine.interaction().carried_kind(), kind);

    engine.set_near_bed(true);
    press_tick(engine, Action::Interact);
    assert!(engine.is_input_locked(), "minigame should own input");

    let word: String = engine.typer().target_word().to_string();
    for c in word.chars() {
        let mut input = ScriptedInput::new();
        input.type_char(c);
        engine.update(0.05, &input, &mut NullAudioSink, &mut NullVisualSink);
    }

    assert!(!engine.is_input_locked());
    assert_eq!(engine.interaction().seated_kind(), kind);
    engine.set_near_bed(false);
}

// ── Scheduler properties through the public API ────────────────────────

#[test]
fn every_kind_fires_once_per_cycle() {
    let mut engine = house_engine(GameConfig {
        night_length: 1.0e6,
        events: EventConfig {
            min_duration: 1.0,
            max_duration: 1.0,
            initial_delay: 0.0,
        },
        ..GameConfig::default()
    });

    // Within one cycle no kind repeats, so every expiry changes the active
    // kind and change-detection sees each event. (Across the reshuffle
    // boundary a repeat is legal; the scheduler's own tests cover that.)
    let mut seen = Vec::new();
    let mut last = MaskKind::None;
    while seen.len() < 8 {
        idle_tick(&mut engine, 0.25);
        let active = engine.active_event();
        if active != last {
            seen.push(active);
            last = active;
        }
    }

    for kind in ALL_KINDS {
        assert_eq!(
            seen.iter().filter(|&&k| k == kind).count(),
            1,
            "{:?} must fire exactly once in the first cycle",
            kind
        );
    }
}

// ── Resource properties ────────────────────────────────────────────────

#[test]
fn sleep_fills_to_exactly_one_hundred() {
    // Start 50, fill 10/s, no events: after 5 s sleep is 100, never above.
    let mut engine = house_engine(GameConfig {
        events: EventConfig {
            initial_delay: 1000.0,
            ..long_events()
        },
        ..GameConfig::default()
    });

    for _ in 0..100 {
        idle_tick(&mut engine, 0.05);
        assert!(engine.sleep_value() <= 100.0);
    }
    assert!((engine.sleep_value() - 100.0).abs() < 1e-3);
}

#[test]
fn uncountered_event_loses_once_and_latches() {
    let mut config = GameConfig {
        events: long_events(),
        ..GameConfig::default()
    };
    config.sleep.start_value = 10.0;
    let mut engine = house_engine(config);

    let mut loss_tick = None;
    for i in 0..40 {
        idle_tick(&mut engine, 0.05);
        if engine.outcome() == GameOutcome::Lost && loss_tick.is_none() {
            loss_tick = Some(i);
        }
    }

    // 10 sleep / (15 per second) ≈ 0.67 s ≈ tick 13 at 50 ms steps.
    let loss_tick = loss_tick.expect("loss must fire");
    assert!((12..=15).contains(&loss_tick), "lost at tick {}", loss_tick);

    // Latched: the score froze when the night ended.
    let frozen = engine.score();
    idle_tick(&mut engine, 10.0);
    assert_eq!(engine.score(), frozen);
    assert_eq!(engine.outcome(), GameOutcome::Lost);
}

#[test]
fn score_never_decreases_across_a_noisy_night() {
    let mut engine = house_engine(GameConfig {
        events: EventConfig {
            min_duration: 0.5,
            max_duration: 2.0,
            initial_delay: 0.0,
        },
        night_length: 1.0e6,
        ..GameConfig::default()
    });

    let mut last = engine.score();
    for _ in 0..400 {
        idle_tick(&mut engine, 0.05);
        assert!(engine.score() >= last);
        last = engine.score();
    }
}

// ── Countering an event end to end ─────────────────────────────────────

#[test]
fn correct_mask_turns_drain_into_fill() {
    let mut engine = house_engine(GameConfig {
        events: long_events(),
        night_length: 1.0e6,
        ..GameConfig::default()
    });

    idle_tick(&mut engine, 0.05);
    let hazard = engine.active_event();
    assert_ne!(hazard, MaskKind::None);

    // Draining while uncountered.
    let before = engine.sleep_value();
    idle_tick(&mut engine, 0.5);
    assert!(engine.sleep_value() < before);

    seat_mask(&mut engine, hazard);

    // Filling once countered.
    let before = engine.sleep_value();
    idle_tick(&mut engine, 0.5);
    assert!(engine.sleep_value() > before);
}

#[test]
fn event_end_returns_mask_to_its_spawn() {
    let mut engine = house_engine(GameConfig {
        events: EventConfig {
            min_duration: 8.0,
            max_duration: 8.0,
            initial_delay: 0.0,
        },
        night_length: 1.0e6,
        ..GameConfig::default()
    });

    idle_tick(&mut engine, 0.05);
    let hazard = engine.active_event();
    seat_mask(&mut engine, hazard);

    // Ride out the rest of the event.
    for _ in 0..200 {
        idle_tick(&mut engine, 0.05);
        if engine.active_event() != hazard {
            break;
        }
    }
    assert_ne!(engine.active_event(), hazard, "event should have rolled over");

    assert_eq!(engine.interaction().seated_kind(), MaskKind::None);
    let id = ALL_KINDS.iter().position(|&k| k == hazard).unwrap();
    let mask = engine.interaction().mask(id).unwrap();
    assert_eq!(mask.transform, mask.spawn, "mask must land exactly on spawn");
}

#[test]
fn swapping_masks_returns_the_first_to_spawn() {
    let mut engine = house_engine(GameConfig {
        events: EventConfig {
            initial_delay: 1000.0,
            ..long_events()
        },
        ..GameConfig::default()
    });

    let gas = ALL_KINDS.iter().position(|&k| k == MaskKind::Gas).unwrap();
    let cpap = ALL_KINDS.iter().position(|&k| k == MaskKind::Cpap).unwrap();

    engine.set_near_mask(Some(gas));
    press_tick(&mut engine, Action::Interact);
    assert_eq!(engine.interaction().carried_kind(), MaskKind::Gas);

    engine.set_near_mask(Some(cpap));
    press_tick(&mut engine, Action::Interact);
    assert_eq!(engine.interaction().carried_kind(), MaskKind::Cpap);

    let mask = engine.interaction().mask(gas).unwrap();
    assert_eq!(mask.transform, mask.spawn);
}

// ── Prompts ────────────────────────────────────────────────────────────

#[test]
fn prompt_walks_through_the_rescue_flow() {
    let mut engine = house_engine(GameConfig {
        events: long_events(),
        night_length: 1.0e6,
        ..GameConfig::default()
    });

    idle_tick(&mut engine, 0.05);
    let hazard = engine.active_event();

    // Empty-handed during an uncountered event: the guide points at it.
    idle_tick(&mut engine, 0.05);
    assert_eq!(engine.prompt(), Prompt::EventGuide(hazard));

    // Near the right mask: pickup offer names it.
    let id = ALL_KINDS.iter().position(|&k| k == hazard).unwrap();
    engine.set_near_mask(Some(id));
    idle_tick(&mut engine, 0.05);
    assert_eq!(engine.prompt(), Prompt::Pickup(hazard));

    // Carrying at the bed: apply offer wins.
    press_tick(&mut engine, Action::Interact);
    engine.set_near_bed(true);
    idle_tick(&mut engine, 0.05);
    assert_eq!(engine.prompt(), Prompt::SetMask);
}

// ── Win condition and determinism ──────────────────────────────────────

#[test]
fn surviving_the_night_wins() {
    let mut config = GameConfig {
        night_length: 3.0,
        events: EventConfig {
            initial_delay: 1000.0,
            ..long_events()
        },
        ..GameConfig::default()
    };
    config.sleep.start_value = 80.0;
    let mut engine = house_engine(config);

    for _ in 0..100 {
        idle_tick(&mut engine, 0.05);
    }
    assert_eq!(engine.outcome(), GameOutcome::Won);
    assert!(engine.score() > 0.0);
}

#[test]
fn identical_seeds_replay_identical_nights() {
    let run = |seed: u64| {
        let mut engine = house_engine(GameConfig {
            seed,
            night_length: 1.0e6,
            ..GameConfig::default()
        });
        let mut trace = Vec::new();
        for _ in 0..1000 {
            idle_tick(&mut engine, 0.05);
            trace.push((engine.active_event(), engine.sleep_value().to_bits()));
        }
        trace
    };

    assert_eq!(run(7), run(7));
    assert_ne!(run(7), run(8), "different seeds should diverge");
}
