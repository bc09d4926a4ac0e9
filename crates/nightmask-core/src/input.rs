//! Input abstraction.
//!
//! The engine never talks to a keyboard; it polls an [`InputSource`] once per
//! tick. Implementations must be stable within a tick: repeated queries for
//! the same action in one tick return the same answer.

/// Discrete player actions the core reacts to.
///
/// The four movement actions double as the rotator minigame's directional
/// inputs (forward = up, back = down), matching the default input map of the
/// original game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    Interact,
}

/// Per-tick queryable input state.
pub trait InputSource {
    /// Held down this tick.
    fn is_action_pressed(&self, action: Action) -> bool;

    /// Went down this tick (edge, not level).
    fn is_action_just_pressed(&self, action: Action) -> bool;

    /// At most one printable character typed this tick, for the typing
    /// minigame. `None` when nothing was typed.
    fn typed_char(&self) -> Option<char>;
}

/// Scripted input for tests and the headless harness: stage the state for the
/// upcoming tick, feed it to the engine, then [`clear`](ScriptedInput::clear).
#[derive(Debug, Default)]
pub struct ScriptedInput {
    pressed: Vec<Action>,
    just_pressed: Vec<Action>,
    typed: Option<char>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an action as just-pressed (and held) for the next tick.
    pub fn press(&mut self, action: Action) {
        self.just_pressed.push(action);
        self.pressed.push(action);
    }

    /// Stage an action as held without a fresh press edge.
    pub fn hold(&mut self, action: Action) {
        self.pressed.push(action);
    }

    /// Stage a typed character for the next tick.
    pub fn type_char(&mut self, c: char) {
        self.typed = Some(c);
    }

    /// Drop all staged state; call between ticks.
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.typed = None;
    }
}

impl InputSource for ScriptedInput {
    fn is_action_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    fn is_action_just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    fn typed_char(&self) -> Option<char> {
        self.typed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_press_and_clear() {
        let mut input = ScriptedInput::new();
        input.press(Action::Interact);
        assert!(input.is_action_just_pressed(Action::Interact));
        assert!(input.is_action_pressed(Action::Interact));
        assert!(!input.is_action_just_pressed(Action::MoveLeft));

        input.clear();
        assert!(!input.is_action_just_pressed(Action::Interact));
        assert!(!input.is_action_pressed(Action::Interact));
    }

    #[test]
    fn test_hold_is_not_an_edge() {
        let mut input = ScriptedInput::new();
        input.hold(Action::MoveForward);
        assert!(input.is_action_pressed(Action::MoveForward));
        assert!(!input.is_action_just_pressed(Action::MoveForward));
    }

    #[test]
    fn test_typed_char() {
        let mut input = ScriptedInput::new();
        assert_eq!(input.typed_char(), None);
        input.type_char('z');
        assert_eq!(input.typed_char(), Some('z'));
        input.clear();
        assert_eq!(input.typed_char(), None);
    }
}
