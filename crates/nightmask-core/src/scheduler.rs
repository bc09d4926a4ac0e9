//! Event scheduler - the randomized, non-repeating hazard sequence.
//!
//! Events are drawn from a shuffled queue of the eight mask kinds. Each kind
//! comes up exactly once per cycle; when the queue empties it is reshuffled
//! and refilled, so the night never runs out of hazards. The active event
//! counts down a uniformly-random duration and the next one starts the
//! moment it expires.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::EventConfig;
use crate::mask::{MaskKind, ALL_KINDS};

/// What changed when the scheduler's timer expired this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTransition {
    /// The event that just ended; `MaskKind::None` when only the initial
    /// delay ran out.
    pub ended: MaskKind,
    /// The event that just started.
    pub started: MaskKind,
}

/// Owns which event is active and for how long.
#[derive(Debug, Clone)]
pub struct EventScheduler {
    config: EventConfig,
    queue: VecDeque<MaskKind>,
    active: MaskKind,
    timer: f32,
    current_duration: f32,
    enabled: bool,
}

impl EventScheduler {
    /// Build a scheduler. Invalid duration bounds are reported once and
    /// disable the scheduler: it then does nothing each tick and no events
    /// ever fire.
    pub fn new(config: EventConfig) -> Self {
        let enabled = config.min_duration <= config.max_duration && config.initial_delay >= 0.0;
        if !enabled {
            log::error!(
                "event scheduler disabled: bad duration config (min {}, max {}, delay {})",
                config.min_duration,
                config.max_duration,
                config.initial_delay
            );
        }
        Self {
            timer: config.initial_delay,
            config,
            queue: VecDeque::new(),
            active: MaskKind::None,
            current_duration: 0.0,
            enabled,
        }
    }

    /// Advance the countdown. Returns the transition when the timer expired:
    /// the old event ends and the next starts within the same tick. At most
    /// one expiry is processed per tick; leftover negative time is discarded
    /// when the fresh duration is assigned.
    pub fn tick(&mut self, dt: f32, rng: &mut impl Rng) -> Option<EventTransition> {
        if !self.enabled {
            return None;
        }

        self.timer -= dt;
        if self.timer > 0.0 {
            return None;
        }

        let ended = self.active;
        let started = self.start_next(rng);
        Some(EventTransition { ended, started })
    }

    fn start_next(&mut self, rng: &mut impl Rng) -> MaskKind {
        if self.queue.is_empty() {
            self.refill_queue(rng);
        }

        // Refill always yields all eight kinds.
        let kind = self.queue.pop_front().unwrap_or(MaskKind::None);
        self.current_duration = self.random_duration(rng);
        self.timer = self.current_duration;
        self.active = kind;
        kind
    }

    /// Fisher-Yates shuffle over the full kind set.
    fn refill_queue(&mut self, rng: &mut impl Rng) {
        let mut kinds = ALL_KINDS.to_vec();
        kinds.shuffle(rng);
        self.queue.extend(kinds);
    }

    fn random_duration(&self, rng: &mut impl Rng) -> f32 {
        rng.gen_range(self.config.min_duration..=self.config.max_duration)
    }

    /// The currently running event, `MaskKind::None` outside events.
    pub fn active_kind(&self) -> MaskKind {
        self.active
    }

    /// Seconds until the active event (or the initial delay) expires.
    pub fn remaining_time(&self) -> f32 {
        self.timer
    }

    /// Duration the active event started with.
    pub fn current_duration(&self) -> f32 {
        self.current_duration
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
