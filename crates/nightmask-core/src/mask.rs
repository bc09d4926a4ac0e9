//! Mask kinds and the mask entity itself.
//!
//! A `MaskKind` doubles as the event tag: every night hazard is countered by
//! exactly one mask kind, so the same enum names both. `None` means "no
//! active event" (or an empty bed slot) and is never a pickable mask.

use serde::{Deserialize, Serialize};

use crate::math::Transform;

/// Kind tag shared by events and the masks that counter them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaskKind {
    /// No event active / empty bed slot.
    None,
    /// Counters the heater malfunction.
    Cooling,
    /// Counters the lights going on.
    Sleep,
    /// Scares away the vacuum cleaner merchant.
    Scary,
    /// Counters the video call from the boss.
    FakeEyeGlasses,
    /// Counters the water leak.
    Snorkel,
    /// Counters the gas leak.
    Gas,
    /// Counters the CPAP machine failure.
    Cpap,
    /// Counters the electrical malfunction.
    Welding,
}

/// The eight pickable kinds, in declaration order. One event per cycle each.
pub const ALL_KINDS: [MaskKind; 8] = [
    MaskKind::Cooling,
    MaskKind::Sleep,
    MaskKind::Scary,
    MaskKind::FakeEyeGlasses,
    MaskKind::Snorkel,
    MaskKind::Gas,
    MaskKind::Cpap,
    MaskKind::Welding,
];

impl MaskKind {
    /// Player-facing mask name, shown on the pickup prompt.
    pub fn display_name(&self) -> &'static str {
        match self {
            MaskKind::None => "",
            MaskKind::Cooling => "Cooling Mask",
            MaskKind::Sleep => "Sleep Mask",
            MaskKind::Scary => "Scary Mask",
            MaskKind::FakeEyeGlasses => "Fake Eye Glasses",
            MaskKind::Snorkel => "Snorkel Mask",
            MaskKind::Gas => "Gas Mask",
            MaskKind::Cpap => "CPAP Mask",
            MaskKind::Welding => "Welding Mask",
        }
    }

    /// What is happening in the house while this event runs, shown on the
    /// event guide prompt.
    pub fn hazard_description(&self) -> &'static str {
        match self {
            MaskKind::None => "",
            MaskKind::Cooling => "The heater is malfunctioning",
            MaskKind::Sleep => "The lights went on",
            MaskKind::Scary => "A vacuum cleaner merchant is at the door",
            MaskKind::FakeEyeGlasses => "Your boss is calling",
            MaskKind::Snorkel => "Water is leaking in",
            MaskKind::Gas => "Gas is leaking",
            MaskKind::Cpap => "The CPAP machine failed",
            MaskKind::Welding => "Something electrical is sparking",
        }
    }
}

/// Who currently owns a mask. Ownership transfer is the only mutation;
/// the rendering layer reads this tag to decide where to draw the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CarryState {
    /// At its spawn point, pickup-enabled.
    Free,
    /// Attached to the player.
    Carried,
    /// Placed at the bed, read as the currently equipped countermeasure.
    Seated,
}

/// A pickable mask. Exactly one owner at a time: spawn point, player, or bed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mask {
    pub kind: MaskKind,
    pub carry_state: CarryState,
    /// Recorded at registration; the exact target for every return-to-spawn.
    pub spawn: Transform,
    /// Where the mask sits right now. Meaningful while `Free`; while carried
    /// or seated the attachment point wins and this is left at the last
    /// free-standing value.
    pub transform: Transform,
}

impl Mask {
    pub fn new(kind: MaskKind, spawn: Transform) -> Self {
        Self {
            kind,
            carry_state: CarryState::Free,
            spawn,
            transform: spawn,
        }
    }

    /// Back to the spawn point, exactly as recorded.
    pub fn return_to_spawn(&mut self) {
        self.carry_state = CarryState::Free;
        self.transform = self.spawn;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn test_all_kinds_unique() {
        for (i, a) in ALL_KINDS.iter().enumerate() {
            for b in ALL_KINDS.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
        assert!(!ALL_KINDS.contains(&MaskKind::None));
    }

    #[test]
    fn test_every_kind_has_names() {
        for kind in ALL_KINDS {
            assert!(!kind.display_name().is_empty());
            assert!(!kind.hazard_description().is_empty());
        }
        assert!(MaskKind::None.display_name().is_empty());
    }

    #[test]
    fn test_return_to_spawn_restores_transform() {
        let spawn = Transform::new(Vec3::new(2.0, 0.0, -3.5), 1.25);
        let mut mask = Mask::new(MaskKind::Gas, spawn);
        mask.carry_state = CarryState::Carried;
        mask.transform = Transform::new(Vec3::new(9.0, 1.0, 9.0), 0.0);

        mask.return_to_spawn();

        assert_eq!(mask.carry_state, CarryState::Free);
        assert_eq!(mask.transform, spawn);
    }
}
