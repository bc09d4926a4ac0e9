//! Music director - crossfades three mood layers by sleep tier.
//!
//! High sleep plays the calm layer, mid sleep the uneasy one, low sleep the
//! frantic one. Volumes glide linearly toward their targets; the glide is
//! cosmetic and never gates simulation state.

use crate::audio::AudioSink;
use crate::config::MusicConfig;
use crate::math::move_toward;

pub const LAYER_CALM: usize = 0;
pub const LAYER_UNEASY: usize = 1;
pub const LAYER_FRANTIC: usize = 2;
pub const MUSIC_LAYER_COUNT: usize = 3;

#[derive(Debug, Clone)]
pub struct MusicDirector {
    config: MusicConfig,
    volumes: [f32; MUSIC_LAYER_COUNT],
    active_layer: usize,
}

impl MusicDirector {
    pub fn new(config: MusicConfig) -> Self {
        Self {
            config,
            volumes: [0.0; MUSIC_LAYER_COUNT],
            active_layer: LAYER_CALM,
        }
    }

    /// Pick the layer for the current sleep fraction and glide all volumes
    /// one step. Only changed volumes are pushed to the sink.
    pub fn tick(&mut self, dt: f32, sleep_fraction: f32, audio: &mut dyn AudioSink) {
        self.active_layer = self.layer_for(sleep_fraction);

        let step = self.config.transition_speed * dt.max(0.0);
        for (layer, volume) in self.volumes.iter_mut().enumerate() {
            let target = if layer == self.active_layer { 1.0 } else { 0.0 };
            let next = move_toward(*volume, target, step);
            if (next - *volume).abs() > f32::EPSILON {
                *volume = next;
                audio.set_music_volume(layer, next);
            }
        }
    }

    fn layer_for(&self, sleep_fraction: f32) -> usize {
        if sleep_fraction > self.config.high_sleep_threshold {
            LAYER_CALM
        } else if sleep_fraction > self.config.mid_sleep_threshold {
            LAYER_UNEASY
        } else {
            LAYER_FRANTIC
        }
    }

    pub fn active_layer(&self) -> usize {
        self.active_layer
    }

    pub fn volume(&self, layer: usize) -> f32 {
        self.volumes[layer]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudioSink;

    fn director() -> MusicDirector {
        MusicDirector::new(MusicConfig::default())
    }

    #[test]
    fn test_layer_selection_by_tier() {
        let mut music = director();
        let mut sink = NullAudioSink;
        music.tick(0.1, 0.9, &mut sink);
        assert_eq!(music.active_layer(), LAYER_CALM);
        music.tick(0.1, 0.6, &mut sink);
        assert_eq!(music.active_layer(), LAYER_UNEASY);
        music.tick(0.1, 0.1, &mut sink);
        assert_eq!(music.active_layer(), LAYER_FRANTIC);
    }

    #[test]
    fn test_volumes_glide_not_jump() {
        let mut music = director();
        let mut sink = NullAudioSink;
        music.tick(0.25, 1.0, &mut sink);
        // 1.0/s transition speed: a quarter second moves a quarter of the way.
        assert!((music.volume(LAYER_CALM) - 0.25).abs() < 1e-5);

        // Long enough and it saturates without overshoot.
        for _ in 0..20 {
            music.tick(0.25, 1.0, &mut sink);
        }
        assert!((music.volume(LAYER_CALM) - 1.0).abs() < 1e-5);
        assert_eq!(music.volume(LAYER_FRANTIC), 0.0);
    }

    #[test]
    fn test_crossfade_on_tier_change() {
        let mut music = director();
        let mut sink = NullAudioSink;
        for _ in 0..20 {
            music.tick(0.25, 1.0, &mut sink);
        }
        // Sleep collapses; calm fades while frantic rises.
        music.tick(0.25, 0.1, &mut sink);
        assert!(music.volume(LAYER_CALM) < 1.0);
        assert!(music.volume(LAYER_FRANTIC) > 0.0);
    }
}
