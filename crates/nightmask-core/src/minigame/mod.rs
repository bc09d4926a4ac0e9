//! Minigames - the short interactive challenges gating a mask commit.
//!
//! While a session is active it exclusively owns input: the surrounding
//! movement and interaction handling must check [`MinigameState`] first and
//! suspend itself. Both variants share the [`MinigameSession`] capability
//! surface so the engine can drive either without knowing which one it got.

mod rotator;
mod typer;

pub use rotator::RotatorMinigame;
pub use typer::{TyperMinigame, SLEEP_WORDS};

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::input::InputSource;

/// Which minigame variant a session runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MinigameKind {
    Rotator,
    Typer,
}

/// Session lifecycle. `Completed` is terminal until an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinigameState {
    Inactive,
    Active,
    Completed,
}

/// Shared capability surface of every minigame variant.
pub trait MinigameSession {
    /// Begin a fresh session. Rejected with a warning if one is already
    /// active; a disabled (misconfigured) variant stays inactive.
    fn start(&mut self, rng: &mut dyn RngCore);

    /// Force-stop, discarding any progress. Idempotent: safe to call when
    /// already inactive.
    fn stop(&mut self);

    /// Clear internal state back to `Inactive` so the session can be
    /// replayed. Also how the engine acknowledges `Completed`.
    fn reset(&mut self);

    /// Mark the start of a simulation step, re-arming the discrete-input
    /// guard. Must be called exactly once per tick before `handle_input`.
    fn begin_tick(&mut self);

    /// Poll input for this tick. A second call within the same tick is
    /// ignored, so integrations that poll from multiple hooks cannot
    /// double-process one discrete press.
    fn handle_input(&mut self, input: &dyn InputSource, rng: &mut dyn RngCore);

    fn state(&self) -> MinigameState;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serde_round_trip() {
        let json = serde_json::to_string(&MinigameKind::Typer).unwrap();
        let back: MinigameKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MinigameKind::Typer);
    }
}
