//! Typer minigame: type a sleepy word, letter by letter.
//!
//! A random word is drawn at session start. Matching is case-insensitive;
//! one wrong character restarts the same word from its first letter.

use rand::seq::SliceRandom;
use rand::RngCore;

use crate::input::InputSource;
use crate::minigame::{MinigameSession, MinigameState};

/// Words the player may be asked to type. All lowercase ASCII.
pub const SLEEP_WORDS: &[&str] = &[
    "pillow",
    "blanket",
    "lullaby",
    "slumber",
    "drowsy",
    "snooze",
    "quilt",
    "dream",
    "hibernate",
    "bedtime",
    "nightcap",
    "yawn",
];

#[derive(Debug, Clone)]
pub struct TyperMinigame {
    words: &'static [&'static str],
    word: &'static str,
    cursor: usize,
    state: MinigameState,
    consumed_this_tick: bool,
    enabled: bool,
}

impl TyperMinigame {
    /// Build the variant over a word list. An empty list is reported once
    /// and leaves the variant disabled.
    pub fn new(words: &'static [&'static str]) -> Self {
        let enabled = !words.is_empty();
        if !enabled {
            log::error!("typer minigame disabled: empty word list");
        }
        Self {
            words,
            word: "",
            cursor: 0,
            state: MinigameState::Inactive,
            consumed_this_tick: false,
            enabled,
        }
    }

    /// The word the player must type; empty outside a session.
    pub fn target_word(&self) -> &str {
        self.word
    }

    /// The correctly typed prefix so far.
    pub fn typed_prefix(&self) -> &str {
        &self.word[..self.cursor]
    }

    fn expected_char(&self) -> Option<char> {
        self.word[self.cursor..].chars().next()
    }
}

impl MinigameSession for TyperMinigame {
    fn start(&mut self, rng: &mut dyn RngCore) {
        if !self.enabled {
            return;
        }
        if self.state == MinigameState::Active {
            log::warn!("typer minigame start rejected: session already active");
            return;
        }
        self.word = self.words.choose(rng).copied().unwrap_or("");
        self.cursor = 0;
        self.consumed_this_tick = false;
        self.state = MinigameState::Active;
    }

    fn stop(&mut self) {
        self.state = MinigameState::Inactive;
    }

    fn reset(&mut self) {
        self.word = "";
        self.cursor = 0;
        self.state = MinigameState::Inactive;
    }

    fn begin_tick(&mut self) {
        self.consumed_this_tick = false;
    }

    fn handle_input(&mut self, input: &dyn InputSource, _rng: &mut dyn RngCore) {
        if self.state != MinigameState::Active || self.consumed_this_tick {
            return;
        }
        self.consumed_this_tick = true;

        let Some(typed) = input.typed_char() else {
            return;
        };
        let Some(expected) = self.expected_char() else {
            return;
        };

        if typed.to_ascii_lowercase() == expected {
            self.cursor += expected.len_utf8();
            if self.cursor >= self.word.len() {
                self.state = MinigameState::Completed;
            }
        } else {
            // Wrong key restarts the same word.
            self.cursor = 0;
        }
    }

    fn state(&self) -> MinigameState {
        self.state
    }
}
