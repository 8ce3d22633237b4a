//! Procedural Audio
//!
//! Everything the page plays is synthesized on the fly:
//! - `tone`: requests, automation and tone graphs
//! - `voices`: filtered and modulated ambient voices, chords
//! - `cues`: the catalog of named UI sounds
//! - `synth`: sound gates and dispatch to the backend
//! - `backend` / `render`: output seams and offline rendering

pub mod backend;
pub mod cues;
pub mod render;
pub mod synth;
pub mod tone;
pub mod voices;

pub use backend::{AudioBackend, PlayedTone, RecordingBackend};
pub use cues::SoundCue;
pub use render::{
    check_sample_rate, export_wav, MixdownBackend, OfflineRenderer, DEFAULT_SAMPLE_RATE,
    MIN_SAMPLE_RATE,
};
pub use synth::{AudioFlags, ToneSynthesizer};
pub use tone::{Automation, FilterKind, FilterSpec, Param, ToneGraph, ToneRequest, GAIN_FLOOR, RAMP_EPSILON};
pub use voices::{AmbientVoice, ScheduledTone, Voicing};
