//! Nightmask Headless Simulation Harness
//!
//! Validates the game core without any engine: no rendering, no real audio,
//! no input devices. Runs entirely in-process.
//!
//! Usage:
//!   cargo run -p nightmask-simtest
//!   cargo run -p nightmask-simtest -- --verbose

use nightmask_core::audio::NullAudioSink;
use nightmask_core::config::{validate_config, EventConfig, GameConfig};
use nightmask_core::effects::NullVisualSink;
use nightmask_core::engine::{GameEngine, GameOutcome};
use nightmask_core::input::{Action, ScriptedInput};
use nightmask_core::interaction::{InteractionModel, Prompt};
use nightmask_core::mask::{MaskKind, ALL_KINDS};
use nightmask_core::math::{Transform, Vec3};
use nightmask_core::minigame::{
    MinigameSession, MinigameState, RotatorMinigame, TyperMinigame, SLEEP_WORDS,
};
use nightmask_core::scheduler::EventScheduler;
use nightmask_core::settings::{AudioSettings, MemorySettingsStore};
use nightmask_core::sleep::{Score, SleepMeter};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Default config (same JSON a frontend ships) ─────────────────────────
const DEFAULT_CONFIG_JSON: &str = include_str!("../../../data/default_config.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Nightmask Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Default config validation
    results.extend(validate_default_config(verbose));

    // 2. Event scheduler sweep
    results.extend(validate_scheduler(verbose));

    // 3. Sleep, score, and night timer
    results.extend(validate_resources(verbose));

    // 4. Mask/bed interaction rules
    results.extend(validate_interaction(verbose));

    // 5. Minigames
    results.extend(validate_minigames(verbose));

    // 6. Full-engine nights
    results.extend(validate_engine(verbose));

    // 7. Audio settings persistence
    results.extend(validate_settings(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── Shared helpers ──────────────────────────────────────────────────────

fn house_engine(config: GameConfig) -> GameEngine {
    let mut engine = GameEngine::new(config);
    for (i, kind) in ALL_KINDS.iter().enumerate() {
        engine.register_mask(*kind, Transform::new(Vec3::new(i as f32, 0.0, 0.0), 0.0));
    }
    engine
}

fn idle_tick(engine: &mut GameEngine, dt: f32) {
    let input = ScriptedInput::new();
    engine.update(dt, &input, &mut NullAudioSink, &mut NullVisualSink);
}

// ── 1. Default config ───────────────────────────────────────────────────

fn validate_default_config(verbose: bool) -> Vec<TestResult> {
    println!("--- Default Config ---");
    let mut results = Vec::new();

    let config: GameConfig = match serde_json::from_str(DEFAULT_CONFIG_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult {
                name: "config_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    let errors = validate_config(&config);
    results.push(TestResult {
        name: "config_valid".into(),
        passed: errors.is_empty(),
        detail: if errors.is_empty() {
            "shipped defaults pass validation".into()
        } else {
            format!("{} validation errors", errors.len())
        },
    });

    results.push(TestResult {
        name: "config_duration_window".into(),
        passed: config.events.min_duration < config.events.max_duration,
        detail: format!(
            "event durations {}..{} s",
            config.events.min_duration, config.events.max_duration
        ),
    });

    results.push(TestResult {
        name: "config_matches_code_defaults".into(),
        passed: config.night_length == GameConfig::default().night_length,
        detail: "shipped night length matches built-in default".into(),
    });

    if verbose {
        println!("  night: {} s, seed {}", config.night_length, config.seed);
    }

    results
}

// ── 2. Event scheduler ──────────────────────────────────────────────────

fn validate_scheduler(_verbose: bool) -> Vec<TestResult> {
    println!("--- Event Scheduler ---");
    let mut results = Vec::new();

    // Three full cycles: every kind exactly once per cycle.
    let mut rng = StdRng::seed_from_u64(11);
    let mut scheduler = EventScheduler::new(EventConfig {
        min_duration: 1.0,
        max_duration: 1.0,
        initial_delay: 0.0,
    });
    let mut started = Vec::new();
    while started.len() < 24 {
        if let Some(t) = scheduler.tick(1.0, &mut rng) {
            started.push(t.started);
        }
    }
    let clean_cycles = started.chunks(8).all(|cycle| {
        ALL_KINDS
            .iter()
            .all(|&k| cycle.iter().filter(|&&c| c == k).count() == 1)
    });
    results.push(TestResult {
        name: "scheduler_no_repeats_per_cycle".into(),
        passed: clean_cycles,
        detail: "24 events = 3 clean cycles of 8".into(),
    });

    // Durations stay inside the configured window.
    let mut rng = StdRng::seed_from_u64(12);
    let mut scheduler = EventScheduler::new(EventConfig {
        min_duration: 5.0,
        max_duration: 9.0,
        initial_delay: 0.0,
    });
    let mut in_window = true;
    for _ in 0..50 {
        if scheduler.tick(100.0, &mut rng).is_some() {
            let d = scheduler.current_duration();
            if !(5.0..=9.0).contains(&d) {
                in_window = false;
            }
        }
    }
    results.push(TestResult {
        name: "scheduler_duration_window".into(),
        passed: in_window,
        detail: "50 random durations within 5..9 s".into(),
    });

    // Inverted bounds disable the scheduler instead of panicking.
    let mut rng = StdRng::seed_from_u64(13);
    let mut broken = EventScheduler::new(EventConfig {
        min_duration: 9.0,
        max_duration: 5.0,
        initial_delay: 0.0,
    });
    let fired = broken.tick(1000.0, &mut rng).is_some();
    results.push(TestResult {
        name: "scheduler_degrades_on_bad_config".into(),
        passed: !broken.is_enabled() && !fired,
        detail: "inverted bounds -> disabled, no events".into(),
    });

    results
}

// ── 3. Resources ────────────────────────────────────────────────────────

fn validate_resources(_verbose: bool) -> Vec<TestResult> {
    println!("--- Sleep & Score ---");
    let mut results = Vec::new();

    // Clamp sweep across wild dt values.
    let mut sleep = SleepMeter::new(&GameConfig::default().sleep);
    let mut clamped = true;
    for &dt in &[0.016, 1.0, 100.0, 1e6, 0.0] {
        sleep.tick(dt, true);
        if sleep.value() > 100.0 {
            clamped = false;
        }
        sleep.tick(dt, false);
        if sleep.value() < 0.0 {
            clamped = false;
        }
    }
    results.push(TestResult {
        name: "sleep_always_clamped".into(),
        passed: clamped,
        detail: "fill/drain sweep stays in [0, 100]".into(),
    });

    // Score is monotonic under any fill/drain pattern.
    let mut score = Score::new(100.0);
    let mut monotonic = true;
    let mut last = 0.0f32;
    for i in 0..1000 {
        score.tick(0.016, ((i % 7) as f32) / 7.0);
        if score.value() < last {
            monotonic = false;
        }
        last = score.value();
    }
    results.push(TestResult {
        name: "score_monotonic".into(),
        passed: monotonic,
        detail: format!("1000 ticks, final score {:.1}", score.value()),
    });

    results
}

// ── 4. Interaction ──────────────────────────────────────────────────────

fn validate_interaction(_verbose: bool) -> Vec<TestResult> {
    println!("--- Mask & Bed ---");
    let mut results = Vec::new();

    // Round trip returns the exact spawn transform.
    let mut model = InteractionModel::new();
    let spawn = Transform::new(Vec3::new(4.0, 0.0, -2.0), 0.7);
    let id = model.register_mask(MaskKind::Welding, spawn);
    model.set_near_mask(Some(id));
    model.try_pickup();
    model.commit_carried_to_bed();
    model.release_seated();
    let back = model.mask(id).map(|m| m.transform == spawn).unwrap_or(false);
    results.push(TestResult {
        name: "mask_round_trip".into(),
        passed: back,
        detail: "Free -> Carried -> Seated -> exact spawn".into(),
    });

    // Prompt priority: SetMask > Pickup > EventGuide.
    let mut model = InteractionModel::new();
    let a = model.register_mask(MaskKind::Gas, Transform::default());
    let b = model.register_mask(MaskKind::Cpap, Transform::default());
    let guide = model.prompt(MaskKind::Sleep) == Prompt::EventGuide(MaskKind::Sleep);
    model.set_near_mask(Some(a));
    let pickup = model.prompt(MaskKind::Sleep) == Prompt::Pickup(MaskKind::Gas);
    model.try_pickup();
    model.set_near_bed(true);
    model.set_near_mask(Some(b));
    let set_mask = model.prompt(MaskKind::Sleep) == Prompt::SetMask;
    results.push(TestResult {
        name: "prompt_priority".into(),
        passed: guide && pickup && set_mask,
        detail: format!(
            "guide:{} pickup:{} set_mask:{}",
            guide, pickup, set_mask
        ),
    });

    // Swap policy: second pickup sends the first mask home.
    let mut model = InteractionModel::new();
    let a = model.register_mask(MaskKind::Gas, Transform::new(Vec3::new(1.0, 0.0, 0.0), 0.0));
    let b = model.register_mask(MaskKind::Snorkel, Transform::default());
    model.set_near_mask(Some(a));
    model.try_pickup();
    model.set_near_mask(Some(b));
    model.try_pickup();
    let swapped = model.carried_kind() == MaskKind::Snorkel
        && model.mask(a).map(|m| m.transform == m.spawn).unwrap_or(false);
    results.push(TestResult {
        name: "carry_swap_policy".into(),
        passed: swapped,
        detail: "picking up while carrying returns the first to spawn".into(),
    });

    results
}

// ── 5. Minigames ────────────────────────────────────────────────────────

fn validate_minigames(_verbose: bool) -> Vec<TestResult> {
    println!("--- Minigames ---");
    let mut results = Vec::new();

    // Rotator: cyclic presses reach the target.
    let mut rng = StdRng::seed_from_u64(21);
    let mut rotator = RotatorMinigame::new(nightmask_core::config::RotatorConfig {
        target: 0.5,
        min_progress_per_press: 0.05,
        max_progress_per_press: 0.05,
        reset_progress_on_fail: false,
    });
    rotator.start(&mut rng);
    let order = [
        Action::MoveForward,
        Action::MoveRight,
        Action::MoveBack,
        Action::MoveLeft,
    ];
    for i in 0..10 {
        let mut input = ScriptedInput::new();
        input.press(order[i % 4]);
        rotator.begin_tick();
        rotator.handle_input(&input, &mut rng);
    }
    results.push(TestResult {
        name: "rotator_completes".into(),
        passed: rotator.state() == MinigameState::Completed,
        detail: "10 correct presses x 0.05 reach target 0.5".into(),
    });

    // Rotator: wrong press never lowers progress under the default policy.
    let mut rng = StdRng::seed_from_u64(22);
    let mut rotator = RotatorMinigame::new(nightmask_core::config::RotatorConfig::default());
    rotator.start(&mut rng);
    let mut input = ScriptedInput::new();
    input.press(Action::MoveForward);
    rotator.begin_tick();
    rotator.handle_input(&input, &mut rng);
    let before = rotator.progress();
    let mut input = ScriptedInput::new();
    input.press(Action::MoveLeft);
    rotator.begin_tick();
    rotator.handle_input(&input, &mut rng);
    results.push(TestResult {
        name: "rotator_wrong_press_harmless".into(),
        passed: rotator.progress() >= before,
        detail: "out-of-order press keeps progress".into(),
    });

    // Typer: full word completes, wrong char restarts it.
    let mut rng = StdRng::seed_from_u64(23);
    let mut typer = TyperMinigame::new(SLEEP_WORDS);
    typer.start(&mut rng);
    let word: String = typer.target_word().to_string();
    let mut input = ScriptedInput::new();
    input.type_char(word.chars().next().unwrap());
    typer.begin_tick();
    typer.handle_input(&input, &mut rng);
    let mut input = ScriptedInput::new();
    input.type_char('#');
    typer.begin_tick();
    typer.handle_input(&input, &mut rng);
    let reset_ok = typer.typed_prefix().is_empty() && typer.target_word() == word;
    for c in word.chars() {
        let mut input = ScriptedInput::new();
        input.type_char(c.to_ascii_uppercase());
        typer.begin_tick();
        typer.handle_input(&input, &mut rng);
    }
    results.push(TestResult {
        name: "typer_reset_then_complete".into(),
        passed: reset_ok && typer.state() == MinigameState::Completed,
        detail: format!("word '{}' survives a miss, uppercase accepted", word),
    });

    results
}

// ── 6. Full-engine nights ───────────────────────────────────────────────

fn validate_engine(verbose: bool) -> Vec<TestResult> {
    println!("--- Full Nights ---");
    let mut results = Vec::new();

    // Quiet night fills sleep to the cap and wins at dawn.
    let mut config = GameConfig {
        night_length: 20.0,
        events: EventConfig {
            min_duration: 1.0,
            max_duration: 1.0,
            initial_delay: 1000.0,
        },
        ..GameConfig::default()
    };
    config.sleep.start_value = 50.0;
    let mut engine = house_engine(config);
    let mut peak = 0.0f32;
    while engine.outcome() == GameOutcome::Running {
        idle_tick(&mut engine, 0.1);
        peak = peak.max(engine.sleep_value());
    }
    results.push(TestResult {
        name: "quiet_night_wins".into(),
        passed: engine.outcome() == GameOutcome::Won && (peak - 100.0).abs() < 1e-3,
        detail: format!("won at dawn, sleep peaked at {:.1}", peak),
    });

    // Ignored events grind sleep to zero; the loss latches.
    let mut config = GameConfig {
        night_length: 1.0e6,
        events: EventConfig {
            min_duration: 1000.0,
            max_duration: 1000.0,
            initial_delay: 0.0,
        },
        ..GameConfig::default()
    };
    config.sleep.start_value = 10.0;
    let mut engine = house_engine(config);
    let mut ticks = 0;
    while engine.outcome() == GameOutcome::Running && ticks < 1000 {
        idle_tick(&mut engine, 0.05);
        ticks += 1;
    }
    let lost_fast = engine.outcome() == GameOutcome::Lost && (12..=15).contains(&ticks);
    let frozen = engine.score();
    idle_tick(&mut engine, 100.0);
    results.push(TestResult {
        name: "ignored_event_loses_and_latches".into(),
        passed: lost_fast && engine.score() == frozen,
        detail: format!("lost after {} ticks (~0.67 s), then no-op", ticks),
    });

    // Same seed, same night.
    let run = |seed: u64| {
        let mut engine = house_engine(GameConfig {
            seed,
            night_length: 1.0e6,
            ..GameConfig::default()
        });
        let mut trace = Vec::new();
        for _ in 0..500 {
            idle_tick(&mut engine, 0.1);
            trace.push((engine.active_event(), engine.sleep_value().to_bits()));
        }
        trace
    };
    results.push(TestResult {
        name: "seeded_night_deterministic".into(),
        passed: run(99) == run(99),
        detail: "500-tick traces identical for equal seeds".into(),
    });

    if verbose {
        println!("  pinned minigame default: {:?}", GameConfig::default().pinned_minigame);
    }

    results
}

// ── 7. Audio settings ───────────────────────────────────────────────────

fn validate_settings(_verbose: bool) -> Vec<TestResult> {
    println!("--- Audio Settings ---");
    let mut results = Vec::new();

    let mut store = MemorySettingsStore::default();
    let mut settings = AudioSettings::load(&store);
    settings.set_volume_linear(0.3, &mut store);
    settings.set_muted(true, &mut store);
    let reloaded = AudioSettings::load(&store);
    results.push(TestResult {
        name: "settings_round_trip".into(),
        passed: reloaded.is_muted() && (reloaded.volume_linear() - 0.3).abs() < 1e-6,
        detail: "muted + volume survive a reload".into(),
    });

    let saves_before = store.saves;
    settings.set_volume_linear(0.3, &mut store);
    settings.set_muted(true, &mut store);
    results.push(TestResult {
        name: "settings_no_redundant_writes".into(),
        passed: store.saves == saves_before,
        detail: "unchanged values skip the store".into(),
    });

    results
}
