//! Event-linked visual effects and hazard actors.
//!
//! The engine flips per-kind effect visibility through a [`VisualSink`]; the
//! hazard actors here (the door-to-door salesman, the rising water) are pure
//! positional state the rendering layer reads back. All of it is cosmetic -
//! nothing in this module gates simulation progress.

use serde::{Deserialize, Serialize};

use crate::mask::MaskKind;
use crate::math::{move_toward, Transform};

/// Presentation surface for event-linked visuals.
pub trait VisualSink {
    /// Show or hide the effect tied to an event kind (the lamp for Sleep,
    /// the gas haze for Gas, ...).
    fn set_effect_visible(&mut self, kind: MaskKind, visible: bool);

    /// Start or stop the radiator's heat-glow animation loop. Tied
    /// specifically to the Cooling event.
    fn set_radiator_animating(&mut self, animating: bool);
}

/// Sink that discards everything; for headless runs and benches.
#[derive(Debug, Default)]
pub struct NullVisualSink;

impl VisualSink for NullVisualSink {
    fn set_effect_visible(&mut self, _kind: MaskKind, _visible: bool) {}
    fn set_radiator_animating(&mut self, _animating: bool) {}
}

/// A recorded visual-sink call. Test double support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualCall {
    Effect(MaskKind, bool),
    Radiator(bool),
}

/// Sink that records calls so tests can assert on effect toggling.
#[derive(Debug, Default)]
pub struct RecordingVisualSink {
    pub calls: Vec<VisualCall>,
}

impl VisualSink for RecordingVisualSink {
    fn set_effect_visible(&mut self, kind: MaskKind, visible: bool) {
        self.calls.push(VisualCall::Effect(kind, visible));
    }
    fn set_radiator_animating(&mut self, animating: bool) {
        self.calls.push(VisualCall::Radiator(animating));
    }
}

/// Where the vacuum-cleaner merchant is in his routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalesmanState {
    /// Waiting out of sight.
    AtStart,
    /// Approaching the window while the Scary event runs.
    MovingToActive,
    /// Retreating, either scared off or out of time.
    MovingToEnd,
}

/// The Scary event's hazard actor. Drifts between three waypoints and
/// teleports home once the retreat completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Salesman {
    state: SalesmanState,
    transform: Transform,
    start: Transform,
    active: Transform,
    end: Transform,
    move_speed: f32,
    arrival_threshold: f32,
}

impl Salesman {
    pub fn new(start: Transform, active: Transform, end: Transform) -> Self {
        Self {
            state: SalesmanState::AtStart,
            transform: start,
            start,
            active,
            end,
            move_speed: 2.0,
            arrival_threshold: 0.1,
        }
    }

    /// Advance the routine. `event_active` is whether the Scary event runs;
    /// `countered` whether the scary mask is seated.
    pub fn tick(&mut self, dt: f32, event_active: bool, countered: bool) {
        match self.state {
            SalesmanState::AtStart => {
                if event_active {
                    self.state = SalesmanState::MovingToActive;
                }
            }
            SalesmanState::MovingToActive => {
                if !event_active || countered {
                    self.state = SalesmanState::MovingToEnd;
                }
            }
            SalesmanState::MovingToEnd => {
                if self.transform.position.distance(&self.end.position) < self.arrival_threshold {
                    self.transform = self.start;
                    self.state = SalesmanState::AtStart;
                }
            }
        }

        let target = match self.state {
            SalesmanState::AtStart => self.start,
            SalesmanState::MovingToActive => self.active,
            SalesmanState::MovingToEnd => self.end,
        };
        self.transform = self.transform.lerp(&target, self.move_speed * dt);
    }

    pub fn state(&self) -> SalesmanState {
        self.state
    }

    /// Current pose, for the rendering layer.
    pub fn transform(&self) -> Transform {
        self.transform
    }
}

/// The Snorkel event's rising water plane. Only the height moves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterLevel {
    y: f32,
    low_y: f32,
    high_y: f32,
    move_speed: f32,
}

impl WaterLevel {
    pub fn new(low_y: f32, high_y: f32, move_speed: f32) -> Self {
        Self {
            y: low_y,
            low_y,
            high_y,
            move_speed,
        }
    }

    /// Rise while the Snorkel event runs, recede otherwise.
    pub fn tick(&mut self, dt: f32, event_active: bool) {
        let target = if event_active { self.high_y } else { self.low_y };
        self.y = move_toward(self.y, target, self.move_speed * dt.max(0.0));
    }

    pub fn y(&self) -> f32 {
        self.y
    }
}
