//! Game configuration and validation.
//!
//! All tunables live here as one serde-friendly bundle so a frontend (or the
//! headless harness) can load them from JSON. Validation returns every error
//! found; the engine reports them once through the `log` channel at startup
//! and the affected subsystem degrades to a safe per-tick no-op instead of
//! panicking.

use serde::{Deserialize, Serialize};

use crate::minigame::MinigameKind;

/// Sleep meter and score tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepConfig {
    /// Sleep value at the start of the night, in [0, 100].
    pub start_value: f32,
    /// Fill rate per second while no event is active or the right mask is seated.
    pub fill_rate: f32,
    /// Drain rate per second while an uncountered event runs.
    pub drain_rate: f32,
    /// Score gain per second at full sleep; scales with the current sleep level.
    pub score_per_second: f32,
}

impl Default for SleepConfig {
    fn default() -> Self {
        Self {
            start_value: 50.0,
            fill_rate: 10.0,
            drain_rate: 15.0,
            score_per_second: 100.0,
        }
    }
}

/// Event scheduler tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConfig {
    /// Shortest possible event duration in seconds.
    pub min_duration: f32,
    /// Longest possible event duration in seconds. Must be >= `min_duration`;
    /// equal bounds give a constant duration.
    pub max_duration: f32,
    /// Quiet period before the first event of the night.
    pub initial_delay: f32,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            min_duration: 10.0,
            max_duration: 30.0,
            initial_delay: 5.0,
        }
    }
}

/// Rotator minigame tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotatorConfig {
    /// Progress needed to complete the session.
    pub target: f32,
    /// Smallest progress gained per correct press.
    pub min_progress_per_press: f32,
    /// Largest progress gained per correct press.
    pub max_progress_per_press: f32,
    /// When true, a wrong direction wipes progress (the earlier, punishing
    /// revision). The default ignores wrong presses entirely.
    pub reset_progress_on_fail: bool,
}

impl Default for RotatorConfig {
    fn default() -> Self {
        Self {
            target: 1.0,
            min_progress_per_press: 0.01,
            max_progress_per_press: 0.05,
            reset_progress_on_fail: false,
        }
    }
}

/// Music layering tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicConfig {
    /// Linear volume change per second while crossfading layers.
    pub transition_speed: f32,
    /// Sleep fraction above which the calm layer plays.
    pub high_sleep_threshold: f32,
    /// Sleep fraction above which the uneasy layer plays; below it the
    /// frantic layer takes over.
    pub mid_sleep_threshold: f32,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            transition_speed: 1.0,
            high_sleep_threshold: 0.8,
            mid_sleep_threshold: 0.4,
        }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for all randomness: event order, durations, minigame rolls.
    pub seed: u64,
    /// Night length in seconds; reaching it is the win condition.
    pub night_length: f32,
    /// Pin every mask-apply challenge to one minigame. `None` draws a
    /// variant per session from the seeded RNG.
    pub pinned_minigame: Option<MinigameKind>,
    pub sleep: SleepConfig,
    pub events: EventConfig,
    pub rotator: RotatorConfig,
    pub music: MusicConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            night_length: 300.0,
            pinned_minigame: None,
            sleep: SleepConfig::default(),
            events: EventConfig::default(),
            rotator: RotatorConfig::default(),
            music: MusicConfig::default(),
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Event duration bounds inverted (min > max).
    InvalidEventDurations { min: f32, max: f32 },
    /// Initial delay is negative.
    NegativeInitialDelay(f32),
    /// Night length must be positive for the night to ever end.
    InvalidNightLength(f32),
    /// Sleep rates must be non-negative.
    NegativeSleepRate(f32),
    /// Rotator target must be positive.
    InvalidRotatorTarget(f32),
    /// Rotator progress bounds inverted or negative.
    InvalidRotatorProgress { min: f32, max: f32 },
    /// Music thresholds must satisfy 0 <= mid <= high <= 1.
    InvalidMusicThresholds { mid: f32, high: f32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidEventDurations { min, max } => {
                write!(f, "event duration bounds inverted: min {} > max {}", min, max)
            }
            ConfigError::NegativeInitialDelay(d) => {
                write!(f, "initial event delay is negative: {}", d)
            }
            ConfigError::InvalidNightLength(l) => {
                write!(f, "night length must be positive, got {}", l)
            }
            ConfigError::NegativeSleepRate(r) => {
                write!(f, "sleep fill/drain rates must be non-negative, got {}", r)
            }
            ConfigError::InvalidRotatorTarget(t) => {
                write!(f, "rotator target must be positive, got {}", t)
            }
            ConfigError::InvalidRotatorProgress { min, max } => {
                write!(f, "rotator progress bounds invalid: min {} max {}", min, max)
            }
            ConfigError::InvalidMusicThresholds { mid, high } => {
                write!(f, "music thresholds invalid: mid {} high {}", mid, high)
            }
        }
    }
}

/// Validate a game configuration, returning all errors found.
pub fn validate_config(config: &GameConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.events.min_duration > config.events.max_duration {
        errors.push(ConfigError::InvalidEventDurations {
            min: config.events.min_duration,
            max: config.events.max_duration,
        });
    }
    if config.events.initial_delay < 0.0 {
        errors.push(ConfigError::NegativeInitialDelay(config.events.initial_delay));
    }
    if config.night_length <= 0.0 {
        errors.push(ConfigError::InvalidNightLength(config.night_length));
    }
    if config.sleep.fill_rate < 0.0 {
        errors.push(ConfigError::NegativeSleepRate(config.sleep.fill_rate));
    }
    if config.sleep.drain_rate < 0.0 {
        errors.push(ConfigError::NegativeSleepRate(config.sleep.drain_rate));
    }
    if config.rotator.target <= 0.0 {
        errors.push(ConfigError::InvalidRotatorTarget(config.rotator.target));
    }
    if config.rotator.min_progress_per_press < 0.0
        || config.rotator.min_progress_per_press > config.rotator.max_progress_per_press
    {
        errors.push(ConfigError::InvalidRotatorProgress {
            min: config.rotator.min_progress_per_press,
            max: config.rotator.max_progress_per_press,
        });
    }
    if config.music.mid_sleep_threshold > config.music.high_sleep_threshold
        || config.music.mid_sleep_threshold < 0.0
        || config.music.high_sleep_threshold > 1.0
    {
        errors.push(ConfigError::InvalidMusicThresholds {
            mid: config.music.mid_sleep_threshold,
            high: config.music.high_sleep_threshold,
        });
    }

    errors
}
