//! Nightmask Core - Night-Survival Game Engine
//!
//! The simulation core of a single-player night-survival game: random house
//! hazards ("events") roll in all night, each countered by seating the
//! matching mask at the bed, and applying a mask means winning a short
//! minigame first. Sleep is the health meter; surviving until morning wins.
//!
//! The crate is engine-agnostic. Rendering, physics, and audio mixing live
//! behind the [`audio::AudioSink`], [`effects::VisualSink`],
//! [`input::InputSource`], and [`settings::SettingsStore`] traits; the
//! frontend drives [`engine::GameEngine::update`] once per frame and reads
//! state back through accessors.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`audio`] | Audio sink trait, per-event cue tables, dB helpers |
//! | [`config`] | All tunables as one serde bundle, plus validation |
//! | [`effects`] | Visual sink trait and the cosmetic hazard actors |
//! | [`engine`] | Composition root: tick ordering, win/loss latch |
//! | [`input`] | Action polling abstraction and a scripted test source |
//! | [`interaction`] | Mask pickup/carry/seat lifecycle and UI prompts |
//! | [`mask`] | The kind tag shared by events and masks |
//! | [`math`] | Small vector/transform helpers |
//! | [`minigame`] | Rotator and typer challenges gating mask application |
//! | [`music`] | Sleep-tier music layer crossfading |
//! | [`scheduler`] | Non-repeating random event sequencing |
//! | [`settings`] | Persisted audio options |
//! | [`sleep`] | Sleep meter, score, and the night timer |
//!
//! # Example
//!
//! ```rust,no_run
//! use nightmask_core::prelude::*;
//!
//! let mut engine = GameEngine::new(GameConfig::default());
//! for kind in ALL_KINDS {
//!     engine.register_mask(kind, Transform::default());
//! }
//!
//! let input = ScriptedInput::new();
//! let mut audio = NullAudioSink;
//! let mut visual = NullVisualSink;
//! loop {
//!     engine.update(1.0 / 60.0, &input, &mut audio, &mut visual);
//!     if engine.is_ended() {
//!         break;
//!     }
//! }
//! ```

pub mod audio;
pub mod config;
pub mod effects;
pub mod engine;
pub mod input;
pub mod interaction;
pub mod mask;
pub mod math;
pub mod minigame;
pub mod music;
pub mod scheduler;
pub mod settings;
pub mod sleep;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::audio::{AudioSink, NullAudioSink};
    pub use crate::config::GameConfig;
    pub use crate::effects::{NullVisualSink, VisualSink};
    pub use crate::engine::{GameEngine, GameOutcome};
    pub use crate::input::{Action, InputSource, ScriptedInput};
    pub use crate::interaction::Prompt;
    pub use crate::mask::{CarryState, MaskKind, ALL_KINDS};
    pub use crate::math::Transform;
    pub use crate::minigame::MinigameKind;
}
