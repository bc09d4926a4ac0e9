//! Audio sink abstraction and the per-event cue tables.
//!
//! The core never mixes audio; it tells an [`AudioSink`] what to start and
//! stop. Cues are explicit per-kind tables, not generic logic: an event kind
//! with no entry is simply silent.

use crate::mask::MaskKind;

/// Handle to an audio asset, resolved by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamRef(pub &'static str);

/// Playback surface the presentation layer implements. One looping event bed
/// plays at a time; music layers are addressed by index.
pub trait AudioSink {
    fn play_one_shot(&mut self, stream: StreamRef);
    fn play_loop(&mut self, stream: StreamRef);
    fn stop_loop(&mut self);
    fn set_music_volume(&mut self, layer: usize, linear: f32);
}

/// Sink that discards everything; for headless runs and benches.
#[derive(Debug, Default)]
pub struct NullAudioSink;

impl AudioSink for NullAudioSink {
    fn play_one_shot(&mut self, _stream: StreamRef) {}
    fn play_loop(&mut self, _stream: StreamRef) {}
    fn stop_loop(&mut self) {}
    fn set_music_volume(&mut self, _layer: usize, _linear: f32) {}
}

/// Everything an audio sink was asked to do, in order. Test double.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCall {
    OneShot(StreamRef),
    Loop(StreamRef),
    StopLoop,
    MusicVolume(usize, f32),
}

/// Sink that records calls so tests can assert on cue dispatch.
#[derive(Debug, Default)]
pub struct RecordingAudioSink {
    pub calls: Vec<AudioCall>,
}

impl AudioSink for RecordingAudioSink {
    fn play_one_shot(&mut self, stream: StreamRef) {
        self.calls.push(AudioCall::OneShot(stream));
    }
    fn play_loop(&mut self, stream: StreamRef) {
        self.calls.push(AudioCall::Loop(stream));
    }
    fn stop_loop(&mut self) {
        self.calls.push(AudioCall::StopLoop);
    }
    fn set_music_volume(&mut self, layer: usize, linear: f32) {
        self.calls.push(AudioCall::MusicVolume(layer, linear));
    }
}

/// Cues fired when an event of this kind starts.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventAudio {
    /// Bed that loops for the whole event.
    pub looping: Option<StreamRef>,
    /// Sting played once at event start.
    pub one_shot: Option<StreamRef>,
}

/// Per-kind event cue table.
pub fn event_audio(kind: MaskKind) -> EventAudio {
    match kind {
        MaskKind::Cooling => EventAudio {
            looping: Some(StreamRef("radiator_hum")),
            one_shot: Some(StreamRef("heater_clank")),
        },
        MaskKind::Sleep => EventAudio {
            looping: Some(StreamRef("fluorescent_buzz")),
            one_shot: Some(StreamRef("light_switch")),
        },
        MaskKind::Scary => EventAudio {
            looping: Some(StreamRef("vacuum_pitch")),
            one_shot: Some(StreamRef("doorbell")),
        },
        MaskKind::FakeEyeGlasses => EventAudio {
            looping: None,
            one_shot: Some(StreamRef("call_ringtone")),
        },
        MaskKind::Snorkel => EventAudio {
            looping: Some(StreamRef("water_rush")),
            one_shot: Some(StreamRef("pipe_burst")),
        },
        MaskKind::Gas => EventAudio {
            looping: Some(StreamRef("gas_hiss")),
            one_shot: Some(StreamRef("valve_pop")),
        },
        MaskKind::Cpap => EventAudio {
            looping: Some(StreamRef("cpap_sputter")),
            one_shot: Some(StreamRef("cpap_alarm")),
        },
        MaskKind::Welding => EventAudio {
            looping: Some(StreamRef("electric_crackle")),
            one_shot: Some(StreamRef("spark_pop")),
        },
        MaskKind::None => EventAudio::default(),
    }
}

/// What the event's audio does the moment the correct mask is seated
/// mid-event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskAppliedAudio {
    /// Nothing to change (the kind has no looping bed).
    Ignore,
    /// The hazard falls silent.
    StopLoop,
    /// The hazard is tamed, not silenced: swap to a secondary loop.
    SwitchLoop(StreamRef),
}

/// Per-kind mask-applied behavior table. The CPAP machine is the one kind
/// that keeps making noise once countered - it settles into its working
/// rhythm instead of going quiet.
pub fn mask_applied_audio(kind: MaskKind) -> MaskAppliedAudio {
    match kind {
        MaskKind::Cpap => MaskAppliedAudio::SwitchLoop(StreamRef("cpap_rhythm")),
        MaskKind::Cooling
        | MaskKind::Sleep
        | MaskKind::Scary
        | MaskKind::Snorkel
        | MaskKind::Gas
        | MaskKind::Welding => MaskAppliedAudio::StopLoop,
        MaskKind::FakeEyeGlasses | MaskKind::None => MaskAppliedAudio::Ignore,
    }
}

pub const MIN_VOLUME_DB: f32 = -80.0;

/// Linear volume [0, 1] to decibels, with a hard floor for silence.
pub fn linear_to_db(linear: f32) -> f32 {
    if linear <= 0.0 {
        return MIN_VOLUME_DB;
    }
    (20.0 * linear.log10()).max(MIN_VOLUME_DB)
}

/// Decibels back to linear volume.
pub fn db_to_linear(db: f32) -> f32 {
    if db <= MIN_VOLUME_DB {
        return 0.0;
    }
    10.0f32.powf(db / 20.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::ALL_KINDS;

    #[test]
    fn test_none_kind_is_silent() {
        let audio = event_audio(MaskKind::None);
        assert!(audio.looping.is_none());
        assert!(audio.one_shot.is_none());
    }

    #[test]
    fn test_every_kind_with_loop_reacts_to_mask() {
        for kind in ALL_KINDS {
            let has_loop = event_audio(kind).looping.is_some();
            let applied = mask_applied_audio(kind);
            if has_loop {
                assert_ne!(applied, MaskAppliedAudio::Ignore, "{:?}", kind);
            } else {
                assert_eq!(applied, MaskAppliedAudio::Ignore, "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_cpap_switches_to_secondary_loop() {
        assert!(matches!(
            mask_applied_audio(MaskKind::Cpap),
            MaskAppliedAudio::SwitchLoop(_)
        ));
    }

    #[test]
    fn test_db_conversion_round_trip() {
        for &linear in &[1.0f32, 0.5, 0.1, 0.01] {
            let back = db_to_linear(linear_to_db(linear));
            assert!((back - linear).abs() < 1e-4, "{} -> {}", linear, back);
        }
    }

    #[test]
    fn test_zero_volume_hits_floor() {
        assert_eq!(linear_to_db(0.0), MIN_VOLUME_DB);
        assert_eq!(db_to_linear(MIN_VOLUME_DB), 0.0);
    }

    #[test]
    fn test_recording_sink_preserves_order() {
        let mut sink = RecordingAudioSink::default();
        sink.play_one_shot(StreamRef("a"));
        sink.stop_loop();
        assert_eq!(
            sink.calls,
            vec![AudioCall::OneShot(StreamRef("a")), AudioCall::StopLoop]
        );
    }
}
