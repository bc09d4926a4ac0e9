//! Mask/bed interaction model.
//!
//! Tracks every mask's owner (spawn point, player, or bed), what the player
//! is standing near, and which single UI prompt should be visible. The
//! physics layer reports zone enter/exit; this model never measures
//! distances itself.
//!
//! Seating is indirect: interacting at the bed while carrying hands off to a
//! minigame, and only the engine commits the carried mask on success.

use serde::{Deserialize, Serialize};

use crate::mask::{CarryState, Mask, MaskKind};
use crate::math::Transform;

/// Index of a registered mask.
pub type MaskId = usize;

/// The single visible UI prompt. Priority: `SetMask` > `Pickup` >
/// `EventGuide`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    None,
    /// At the bed, carrying a mask: offer to apply it.
    SetMask,
    /// Near a free mask: offer to pick it up, naming the mask.
    Pickup(MaskKind),
    /// An event runs uncountered and the player is empty-handed: hint at
    /// the hazard so they know which mask to fetch.
    EventGuide(MaskKind),
}

/// Ownership bookkeeping for all masks plus the bed slot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionModel {
    masks: Vec<Mask>,
    carried: Option<MaskId>,
    seated: Option<MaskId>,
    near_mask: Option<MaskId>,
    near_bed: bool,
}

impl InteractionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mask at its spawn transform. The transform is recorded and
    /// is the exact target of every later return-to-spawn.
    pub fn register_mask(&mut self, kind: MaskKind, spawn: Transform) -> MaskId {
        self.masks.push(Mask::new(kind, spawn));
        self.masks.len() - 1
    }

    /// Zone callback: the player entered (`Some`) or left (`None`) a mask's
    /// pickup area.
    pub fn set_near_mask(&mut self, mask: Option<MaskId>) {
        if let Some(id) = mask {
            if id >= self.masks.len() {
                log::warn!("near-mask update rejected: unknown mask id {}", id);
                return;
            }
        }
        self.near_mask = mask;
    }

    /// Zone callback: the player entered or left the bed area.
    pub fn set_near_bed(&mut self, near: bool) {
        self.near_bed = near;
    }

    pub fn mask(&self, id: MaskId) -> Option<&Mask> {
        self.masks.get(id)
    }

    /// All masks, for the rendering layer to place by ownership tag.
    pub fn masks(&self) -> &[Mask] {
        &self.masks
    }

    pub fn carried_kind(&self) -> MaskKind {
        self.carried
            .map_or(MaskKind::None, |id| self.masks[id].kind)
    }

    /// The mask currently seated at the bed, `MaskKind::None` if empty.
    pub fn seated_kind(&self) -> MaskKind {
        self.seated
            .map_or(MaskKind::None, |id| self.masks[id].kind)
    }

    pub fn is_carrying(&self) -> bool {
        self.carried.is_some()
    }

    /// Whether an interact press at this moment should hand off to the
    /// minigame (at the bed, carrying something to apply).
    pub fn can_apply_mask(&self) -> bool {
        self.near_bed && self.carried.is_some()
    }

    /// Pick up the nearby free mask. When already carrying, the carried mask
    /// is returned to its spawn first (swap policy). Returns the picked-up
    /// kind, or `None` when there was nothing to pick up.
    pub fn try_pickup(&mut self) -> Option<MaskKind> {
        let id = self.near_mask?;
        if self.masks[id].carry_state != CarryState::Free {
            return None;
        }

        if let Some(old) = self.carried.take() {
            self.masks[old].return_to_spawn();
        }

        self.masks[id].carry_state = CarryState::Carried;
        self.carried = Some(id);
        // The picked-up mask's zone goes dormant with it.
        self.near_mask = None;
        Some(self.masks[id].kind)
    }

    /// Commit the carried mask to the bed; called by the engine on minigame
    /// success only. A previously seated mask is returned to its spawn.
    /// Committing empty-handed is a programmer error: warn and reject.
    pub fn commit_carried_to_bed(&mut self) -> Option<MaskKind> {
        let Some(id) = self.carried.take() else {
            log::warn!("bed commit rejected: no mask is being carried");
            return None;
        };

        if let Some(old) = self.seated.take() {
            self.masks[old].return_to_spawn();
        }

        self.masks[id].carry_state = CarryState::Seated;
        self.seated = Some(id);
        Some(self.masks[id].kind)
    }

    /// Clear the bed slot, returning the seated mask to its spawn. Called
    /// when an event ends; safe to call with an empty slot.
    pub fn release_seated(&mut self) {
        if let Some(id) = self.seated.take() {
            self.masks[id].return_to_spawn();
        }
    }

    /// Recompute the single visible prompt for this tick.
    pub fn prompt(&self, active_event: MaskKind) -> Prompt {
        if self.can_apply_mask() {
            return Prompt::SetMask;
        }

        if let Some(id) = self.near_mask {
            if self.masks[id].carry_state == CarryState::Free {
                return Prompt::Pickup(self.masks[id].kind);
            }
        }

        if active_event != MaskKind::None
            && !self.is_carrying()
            && self.seated_kind() != active_event
        {
            return Prompt::EventGuide(active_event);
        }

        Prompt::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    fn model_with_two_masks() -> (InteractionModel, MaskId, MaskId) {
        let mut model = InteractionModel::new();
        let gas = model.register_mask(
            MaskKind::Gas,
            Transform::new(Vec3::new(1.0, 0.0, 0.0), 0.0),
        );
        let snorkel = model.register_mask(
            MaskKind::Snorkel,
            Transform::new(Vec3::new(-2.0, 0.0, 4.0), 1.5),
        );
        (model, gas, snorkel)
    }

    #[test]
    fn test_pickup_requires_proximity() {
        let (mut model, _, _) = model_with_two_masks();
        assert_eq!(model.try_pickup(), None);
    }

    #[test]
    fn test_pickup_transfers_ownership() {
        let (mut model, gas, _) = model_with_two_masks();
        model.set_near_mask(Some(gas));
        assert_eq!(model.try_pickup(), Some(MaskKind::Gas));
        assert_eq!(model.carried_kind(), MaskKind::Gas);
        assert_eq!(model.mask(gas).unwrap().carry_state, CarryState::Carried);
        // The zone went dormant; a second interact finds nothing.
        assert_eq!(model.try_pickup(), None);
    }

    #[test]
    fn test_swap_returns_carried_to_spawn() {
        let (mut model, gas, snorkel) = model_with_two_masks();
        model.set_near_mask(Some(gas));
        model.try_pickup();

        model.set_near_mask(Some(snorkel));
        assert_eq!(model.try_pickup(), Some(MaskKind::Snorkel));

        let gas_mask = model.mask(gas).unwrap();
        assert_eq!(gas_mask.carry_state, CarryState::Free);
        assert_eq!(gas_mask.transform, gas_mask.spawn);
        assert_eq!(model.carried_kind(), MaskKind::Snorkel);
    }

    #[test]
    fn test_round_trip_restores_spawn_exactly() {
        let (mut model, gas, _) = model_with_two_masks();
        let spawn = model.mask(gas).unwrap().spawn;

        model.set_near_mask(Some(gas));
        model.try_pickup();
        model.set_near_bed(true);
        model.commit_carried_to_bed();
        model.release_seated();

        let mask = model.mask(gas).unwrap();
        assert_eq!(mask.carry_state, CarryState::Free);
        assert_eq!(mask.transform, spawn);
    }

    #[test]
    fn test_commit_replaces_seated_mask() {
        let (mut model, gas, snorkel) = model_with_two_masks();
        model.set_near_mask(Some(gas));
        model.try_pickup();
        model.commit_carried_to_bed();
        assert_eq!(model.seated_kind(), MaskKind::Gas);

        model.set_near_mask(Some(snorkel));
        model.try_pickup();
        model.commit_carried_to_bed();

        assert_eq!(model.seated_kind(), MaskKind::Snorkel);
        let gas_mask = model.mask(gas).unwrap();
        assert_eq!(gas_mask.carry_state, CarryState::Free);
        assert_eq!(gas_mask.transform, gas_mask.spawn);
    }

    #[test]
    fn test_commit_empty_handed_rejected() {
        let (mut model, _, _) = model_with_two_masks();
        assert_eq!(model.commit_carried_to_bed(), None);
        assert_eq!(model.seated_kind(), MaskKind::None);
    }

    #[test]
    fn test_release_seated_idempotent() {
        let (mut model, gas, _) = model_with_two_masks();
        model.set_near_mask(Some(gas));
        model.try_pickup();
        model.commit_carried_to_bed();

        model.release_seated();
        model.release_seated();
        assert_eq!(model.seated_kind(), MaskKind::None);
    }

    #[test]
    fn test_prompt_priority_set_mask_wins() {
        let (mut model, gas, snorkel) = model_with_two_masks();
        model.set_near_mask(Some(gas));
        model.try_pickup();
        model.set_near_bed(true);
        model.set_near_mask(Some(snorkel));

        // Carrying at the bed while also near a free mask during an event.
        assert_eq!(model.prompt(MaskKind::Welding), Prompt::SetMask);
    }

    #[test]
    fn test_prompt_pickup_over_guide() {
        let (mut model, gas, _) = model_with_two_masks();
        model.set_near_mask(Some(gas));
        assert_eq!(model.prompt(MaskKind::Welding), Prompt::Pickup(MaskKind::Gas));
    }

    #[test]
    fn test_prompt_guide_only_when_uncountered_and_empty_handed() {
        let (mut model, gas, _) = model_with_two_masks();

        // Event active, empty-handed, nothing seated: guide.
        assert_eq!(model.prompt(MaskKind::Gas), Prompt::EventGuide(MaskKind::Gas));

        // No event: nothing.
        assert_eq!(model.prompt(MaskKind::None), Prompt::None);

        // Correct mask seated: no guide.
        model.set_near_mask(Some(gas));
        model.try_pickup();
        model.commit_carried_to_bed();
        assert_eq!(model.prompt(MaskKind::Gas), Prompt::None);

        // Wrong mask seated: guide again.
        assert_eq!(
            model.prompt(MaskKind::Cpap),
            Prompt::EventGuide(MaskKind::Cpap)
        );
    }

    #[test]
    fn test_prompt_guide_suppressed_while_carrying() {
        let (mut model, gas, _) = model_with_two_masks();
        model.set_near_mask(Some(gas));
        model.try_pickup();
        assert_eq!(model.prompt(MaskKind::Cpap), Prompt::None);
    }

    #[test]
    fn test_unknown_mask_id_rejected() {
        let (mut model, _, _) = model_with_two_masks();
        model.set_near_mask(Some(99));
        assert_eq!(model.try_pickup(), None);
    }
}
