//! Resource model - the sleep meter, the score, and the night timer.
//!
//! Pure numeric state, updated once per tick by the engine. Sleep is the
//! health meter: it fills while the night is calm or properly countered and
//! drains under an uncountered event. Score grows with how rested the player
//! currently is and never goes down. The night timer is the win condition.

use serde::{Deserialize, Serialize};

use crate::config::SleepConfig;

pub const SLEEP_MAX: f32 = 100.0;

/// The core health meter, clamped to [0, 100]. Reaching 0 loses the night.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepMeter {
    value: f32,
    fill_rate: f32,
    drain_rate: f32,
}

impl SleepMeter {
    pub fn new(config: &SleepConfig) -> Self {
        Self {
            value: config.start_value.clamp(0.0, SLEEP_MAX),
            fill_rate: config.fill_rate.max(0.0),
            drain_rate: config.drain_rate.max(0.0),
        }
    }

    /// Fill or drain for this tick, clamped to range.
    pub fn tick(&mut self, dt: f32, should_fill: bool) {
        if dt <= 0.0 {
            return;
        }
        let delta = if should_fill {
            self.fill_rate * dt
        } else {
            -self.drain_rate * dt
        };
        self.value = (self.value + delta).clamp(0.0, SLEEP_MAX);
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Sleep as a fraction of full, in [0, 1].
    pub fn normalized(&self) -> f32 {
        self.value / SLEEP_MAX
    }

    pub fn is_depleted(&self) -> bool {
        self.value <= 0.0
    }
}

/// Monotonically non-decreasing score accumulator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Score {
    value: f32,
    per_second: f32,
}

impl Score {
    pub fn new(per_second: f32) -> Self {
        Self {
            value: 0.0,
            per_second: per_second.max(0.0),
        }
    }

    /// Accrue score proportionally to the current sleep fraction.
    pub fn tick(&mut self, dt: f32, sleep_fraction: f32) {
        if dt <= 0.0 {
            return;
        }
        self.value += self.per_second * sleep_fraction.clamp(0.0, 1.0) * dt;
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

/// Counts the night up from 0 to its configured length; full night = win.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NightTimer {
    elapsed: f32,
    length: f32,
    enabled: bool,
}

impl NightTimer {
    /// A non-positive length can never complete; report once and disable so
    /// the night simply never ends in a win.
    pub fn new(length: f32) -> Self {
        let enabled = length > 0.0;
        if !enabled {
            log::error!("night timer disabled: length must be positive, got {}", length);
        }
        Self {
            elapsed: 0.0,
            length,
            enabled,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if !self.enabled || dt <= 0.0 {
            return;
        }
        self.elapsed += dt;
    }

    /// Night progress in [0, 1]; drives the clock UI.
    pub fn progress(&self) -> f32 {
        if !self.enabled {
            return 0.0;
        }
        (self.elapsed / self.length).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.enabled && self.elapsed >= self.length
    }
}
