//! Tone synthesizer
//!
//! Applies the sound gates (global enable, mute, ambient mute) and turns
//! tone requests, cues and ambient voices into graphs for the backend.

use log::trace;
use serde::{Deserialize, Serialize};

use super::backend::AudioBackend;
use super::cues::SoundCue;
use super::tone::{ToneGraph, ToneRequest};
use super::voices::{AmbientVoice, ScheduledTone, Voicing};
use crate::engine::Millis;

/// Sound gates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AudioFlags {
    /// False until the visitor presses start
    pub sounds_enabled: bool,
    /// Silences everything
    pub muted: bool,
    /// Silences the ambient layer only (persisted preference)
    pub ambient_muted: bool,
}

impl AudioFlags {
    /// Whether UI tones may play
    pub fn can_play(&self) -> bool {
        self.sounds_enabled && !self.muted
    }

    /// Whether ambient voices may play
    pub fn can_play_ambient(&self) -> bool {
        self.can_play() && !self.ambient_muted
    }
}

/// Builds tone graphs and hands them to the shared audio backend
pub struct ToneSynthesizer {
    flags: AudioFlags,
    backend: Box<dyn AudioBackend>,
    graphs_built: u64,
}

impl ToneSynthesizer {
    /// Create a synthesizer with the given gates
    pub fn new(flags: AudioFlags, backend: Box<dyn AudioBackend>) -> Self {
        Self {
            flags,
            backend,
            graphs_built: 0,
        }
    }

    pub fn flags(&self) -> AudioFlags {
        self.flags
    }

    /// Open the global gate (the splash "start" action)
    pub fn enable(&mut self) {
        self.flags.sounds_enabled = true;
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.flags.muted = muted;
    }

    pub fn set_ambient_muted(&mut self, muted: bool) {
        self.flags.ambient_muted = muted;
    }

    /// Number of graphs handed to the backend since creation
    pub fn graphs_built(&self) -> u64 {
        self.graphs_built
    }

    /// Play one base tone
    ///
    /// Returns false (and builds nothing) when the gates are closed.
    pub fn play_tone(&mut self, now: Millis, request: &ToneRequest) -> bool {
        if !self.flags.can_play() {
            return false;
        }
        self.emit(now, ToneGraph::from_request(request));
        true
    }

    /// Play one base tone of the ambient layer
    pub fn play_ambient_tone(&mut self, now: Millis, request: &ToneRequest) -> bool {
        if !self.flags.can_play_ambient() {
            return false;
        }
        self.emit(now, ToneGraph::from_request(request));
        true
    }

    /// Play a UI cue
    ///
    /// Chords come back as tones for the caller to schedule; `None` means
    /// the gates were closed.
    pub fn play_cue(&mut self, now: Millis, cue: SoundCue) -> Option<Vec<ScheduledTone>> {
        if !self.flags.can_play() {
            return None;
        }
        trace!("cue {} at {}ms", cue, now);
        Some(self.voice(now, cue.voicing()))
    }

    /// Play an ambient voice, gated additionally by the ambient mute
    pub fn play_ambient(&mut self, now: Millis, voice: AmbientVoice) -> Option<Vec<ScheduledTone>> {
        if !self.flags.can_play_ambient() {
            return None;
        }
        trace!("ambient {} at {}ms", voice, now);
        Some(self.voice(now, voice.voicing()))
    }

    /// Play a UI cue as part of the ambient layer
    pub fn play_ambient_cue(&mut self, now: Millis, cue: SoundCue) -> Option<Vec<ScheduledTone>> {
        if !self.flags.can_play_ambient() {
            return None;
        }
        Some(self.voice(now, cue.voicing()))
    }

    fn voice(&mut self, now: Millis, voicing: Voicing) -> Vec<ScheduledTone> {
        match voicing {
            Voicing::Single(graph) => {
                self.emit(now, graph);
                Vec::new()
            }
            Voicing::Sequence(tones) => tones,
        }
    }

    fn emit(&mut self, now: Millis, graph: ToneGraph) {
        self.graphs_built += 1;
        self.backend.play(now, graph);
    }
}
