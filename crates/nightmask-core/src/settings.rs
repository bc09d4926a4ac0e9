//! Audio settings - the one persisted document.
//!
//! Game progress is never saved; the only thing that survives a session is
//! the player's mute flag and volume. The backing store is abstract: the
//! frontend decides where the JSON payload lives.

use serde::{Deserialize, Serialize};

use crate::audio::{linear_to_db, MIN_VOLUME_DB};

/// Name of the persisted settings document.
pub const AUDIO_SETTINGS_DOC: &str = "audio_settings";

/// Storage backend for named settings documents.
pub trait SettingsStore {
    fn load(&self, name: &str) -> Option<String>;
    fn save(&mut self, name: &str, payload: &str);
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    docs: std::collections::HashMap<String, String>,
    /// Number of writes, so tests can assert unchanged values don't rewrite.
    pub saves: usize,
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self, name: &str) -> Option<String> {
        self.docs.get(name).cloned()
    }
    fn save(&mut self, name: &str, payload: &str) {
        self.docs.insert(name.to_string(), payload.to_string());
        self.saves += 1;
    }
}

/// The persisted payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioOptions {
    pub muted: bool,
    pub volume_linear: f32,
}

impl Default for AudioOptions {
    fn default() -> Self {
        Self {
            muted: false,
            volume_linear: 1.0,
        }
    }
}

/// Live audio settings, kept in sync with the store on every change.
#[derive(Debug, Clone)]
pub struct AudioSettings {
    options: AudioOptions,
}

impl AudioSettings {
    /// Load from the store; a missing or unreadable document falls back to
    /// defaults (unreadable is reported once).
    pub fn load(store: &dyn SettingsStore) -> Self {
        let options = match store.load(AUDIO_SETTINGS_DOC) {
            Some(payload) => match serde_json::from_str::<AudioOptions>(&payload) {
                Ok(mut options) => {
                    options.volume_linear = options.volume_linear.clamp(0.0, 1.0);
                    options
                }
                Err(err) => {
                    log::warn!("audio settings unreadable, using defaults: {}", err);
                    AudioOptions::default()
                }
            },
            None => AudioOptions::default(),
        };
        Self { options }
    }

    pub fn is_muted(&self) -> bool {
        self.options.muted
    }

    pub fn volume_linear(&self) -> f32 {
        self.options.volume_linear
    }

    /// Flip the mute flag. Unchanged values are not rewritten to the store.
    pub fn set_muted(&mut self, muted: bool, store: &mut dyn SettingsStore) {
        if self.options.muted == muted {
            return;
        }
        self.options.muted = muted;
        self.persist(store);
    }

    /// Set the linear volume, clamped to [0, 1]. Unchanged (within epsilon)
    /// values are not rewritten to the store.
    pub fn set_volume_linear(&mut self, linear: f32, store: &mut dyn SettingsStore) {
        let clamped = linear.clamp(0.0, 1.0);
        if (self.options.volume_linear - clamped).abs() < 1e-5 {
            return;
        }
        self.options.volume_linear = clamped;
        self.persist(store);
    }

    /// The volume the mixer should apply, in decibels. Muted or zero volume
    /// bottoms out at the silence floor.
    pub fn effective_volume_db(&self) -> f32 {
        if self.options.muted || self.options.volume_linear <= 0.0 {
            MIN_VOLUME_DB
        } else {
            linear_to_db(self.options.volume_linear.max(0.0001))
        }
    }

    fn persist(&self, store: &mut dyn SettingsStore) {
        match serde_json::to_string(&self.options) {
            Ok(payload) => store.save(AUDIO_SETTINGS_DOC, &payload),
            Err(err) => log::warn!("audio settings not saved: {}", err),
        }
    }
}
