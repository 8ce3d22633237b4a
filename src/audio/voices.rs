//! Ambient voices
//!
//! Each voice composes the base tone with a filter and/or an amplitude
//! envelope. Envelope modulation is a run of discrete gain-sets spaced at a
//! fixed millisecond interval; the sets are written into the graph up front
//! and never adjusted once the tone is playing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::tone::{FilterKind, FilterSpec, Param, ToneGraph, ToneRequest, GAIN_FLOOR};
use crate::engine::Millis;
use crate::error::PortfolioError;

/// A tone to be played `delay` ms after the sequence is triggered
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTone {
    pub delay: Millis,
    pub request: ToneRequest,
}

/// What a cue or voice turns into
#[derive(Debug, Clone, PartialEq)]
pub enum Voicing {
    /// One graph, played immediately
    Single(ToneGraph),
    /// Several base tones, each played after its own delay
    Sequence(Vec<ScheduledTone>),
}

/// Recurring decorative sounds of the ambient layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmbientVoice {
    /// Low rumble with a pulsing envelope
    Engine,
    /// High band-passed scanning beam
    Beam,
    /// Doppler swell as a craft passes
    Pass,
    /// Down-and-back frequency sweep
    Scan,
    /// Gentle hovering hum
    Hover,
    /// Four rising tones
    Formation,
}

impl AmbientVoice {
    pub const ALL: [AmbientVoice; 6] = [
        AmbientVoice::Engine,
        AmbientVoice::Beam,
        AmbientVoice::Pass,
        AmbientVoice::Scan,
        AmbientVoice::Hover,
        AmbientVoice::Formation,
    ];

    /// Kebab-case name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            AmbientVoice::Engine => "engine",
            AmbientVoice::Beam => "beam",
            AmbientVoice::Pass => "pass",
            AmbientVoice::Scan => "scan",
            AmbientVoice::Hover => "hover",
            AmbientVoice::Formation => "formation",
        }
    }

    /// Build this voice with its stock parameters
    pub fn voicing(self) -> Voicing {
        match self {
            AmbientVoice::Engine => {
                Voicing::Single(rumble(&ToneRequest::unchecked(150.0, 100.0, 0.0045, 0.8)))
            }
            AmbientVoice::Beam => {
                Voicing::Single(beam(&ToneRequest::unchecked(1200.0, 800.0, 0.006, 0.6)))
            }
            AmbientVoice::Pass => {
                Voicing::Single(pass(&ToneRequest::unchecked(600.0, 200.0, 0.0075, 1.2)))
            }
            AmbientVoice::Scan => {
                Voicing::Single(scan(&ToneRequest::unchecked(800.0, 400.0, 0.0054, 0.9)))
            }
            AmbientVoice::Hover => {
                Voicing::Single(hover(&ToneRequest::unchecked(300.0, 250.0, 0.0036, 0.5)))
            }
            AmbientVoice::Formation => Voicing::Sequence(formation()),
        }
    }
}

impl fmt::Display for AmbientVoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AmbientVoice {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AmbientVoice::ALL
            .into_iter()
            .find(|voice| voice.name() == s)
            .ok_or_else(|| PortfolioError::UnknownCue {
                name: s.to_string(),
            })
    }
}

// ============================================================================
// Voice builders
// ============================================================================

/// Engine rumble: low-pass at 200 Hz, linear attack over 100 ms, then a
/// pulse every 100 ms
pub fn rumble(request: &ToneRequest) -> ToneGraph {
    let mut graph = ToneGraph::from_request(request);
    graph.filter = Some(FilterSpec {
        kind: FilterKind::LowPass,
        frequency: 200.0,
        q: 2.0,
    });

    let v = request.volume;
    let mut gain = Param::new();
    gain.set(0.0, 0.0).linear_to(0.1, v);
    modulate(&mut gain, request.duration, 100, 10.0, |i| {
        v * (0.3 + 0.7 * (i * 0.5).sin())
    });
    gain.exponential_to(request.duration, GAIN_FLOOR);
    graph.gain = gain;
    graph
}

/// Scanning beam: band-pass at 800 Hz, 50 ms attack, modulation every 50 ms
pub fn beam(request: &ToneRequest) -> ToneGraph {
    let mut graph = ToneGraph::from_request(request);
    graph.filter = Some(FilterSpec {
        kind: FilterKind::BandPass,
        frequency: 800.0,
        q: 5.0,
    });

    let v = request.volume;
    let mut gain = Param::new();
    gain.set(0.0, 0.0).linear_to(0.05, v);
    modulate(&mut gain, request.duration, 50, 20.0, |i| {
        v * (0.4 + 0.6 * (i * 0.3).sin())
    });
    gain.exponential_to(request.duration, GAIN_FLOOR);
    graph.gain = gain;
    graph
}

/// Doppler pass: swell to full volume at 30% of the duration, fade to
/// silence at the end
pub fn pass(request: &ToneRequest) -> ToneGraph {
    let mut graph = ToneGraph::from_request(request);
    let mut gain = Param::new();
    gain.set(0.0, 0.0)
        .linear_to(request.duration * 0.3, request.volume)
        .linear_to(request.duration, 0.0);
    graph.gain = gain;
    graph
}

/// Scan: frequency falls to `end_freq` at the midpoint and climbs back
pub fn scan(request: &ToneRequest) -> ToneGraph {
    let mut graph = ToneGraph::from_request(request);
    let mut frequency = Param::new();
    frequency
        .set(0.0, request.start_freq)
        .exponential_to(request.duration * 0.5, request.end_freq)
        .exponential_to(request.duration, request.start_freq);
    graph.frequency = frequency;
    graph
}

/// Hover: starts at 30% volume with slow shallow modulation every 125 ms
pub fn hover(request: &ToneRequest) -> ToneGraph {
    let mut graph = ToneGraph::from_request(request);
    let v = request.volume;
    let mut gain = Param::new();
    gain.set(0.0, v * 0.3);
    modulate(&mut gain, request.duration, 125, 8.0, |i| {
        v * (0.2 + 0.1 * (i * 0.2).sin())
    });
    gain.exponential_to(request.duration, GAIN_FLOOR);
    graph.gain = gain;
    graph
}

/// Formation change: 400, 500, 600, 700 Hz, each falling 10%, 100 ms apart
pub fn formation() -> Vec<ScheduledTone> {
    staggered(&[400.0, 500.0, 600.0, 700.0], 100, |f| {
        ToneRequest::unchecked(f, f * 0.9, 0.006, 0.4)
    })
}

/// Success chord: 400..700 Hz rising 20%, 50 ms apart
pub fn success_chord() -> Vec<ScheduledTone> {
    staggered(&[400.0, 500.0, 600.0, 700.0], 50, |f| {
        ToneRequest::unchecked(f, f * 1.2, 0.015, 0.2)
    })
}

/// Invasion alarm: 600 down to 200 Hz, each falling 20%, 200 ms apart
pub fn invasion() -> Vec<ScheduledTone> {
    staggered(&[600.0, 500.0, 400.0, 300.0, 200.0], 200, |f| {
        ToneRequest::unchecked(f, f * 0.8, 0.05, 0.3)
    })
}

/// Append `ceil(duration * per_second)` gain-sets, one every `interval_ms`,
/// each clamped to the gain floor
fn modulate(
    gain: &mut Param,
    duration: f64,
    interval_ms: u64,
    per_second: f64,
    level: impl Fn(f64) -> f64,
) {
    let steps = (duration * per_second).ceil() as u64;
    for i in 0..steps {
        let at = (i * interval_ms) as f64 / 1000.0;
        if at >= duration {
            break;
        }
        gain.set(at, level(i as f64).max(GAIN_FLOOR));
    }
}

fn staggered(
    frequencies: &[f64],
    spacing: Millis,
    request: impl Fn(f64) -> ToneRequest,
) -> Vec<ScheduledTone> {
    frequencies
        .iter()
        .enumerate()
        .map(|(index, &freq)| ScheduledTone {
            delay: index as Millis * spacing,
            request: request(freq),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::tone::Automation;
    use approx::assert_relative_eq;

    fn single(voice: AmbientVoice) -> ToneGraph {
        match voice.voicing() {
            Voicing::Single(graph) => graph,
            Voicing::Sequence(_) => panic!("{} should be a single graph", voice),
        }
    }

    fn gain_sets(graph: &ToneGraph) -> Vec<(f64, f64)> {
        graph
            .gain
            .events()
            .iter()
            .filter_map(|event| match *event {
                Automation::SetValue { at, value } => Some((at, value)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_rumble_uses_low_pass_and_pulses() {
        let graph = single(AmbientVoice::Engine);
        let filter = graph.filter.expect("rumble is filtered");
        assert_eq!(filter.kind, FilterKind::LowPass);
        assert_relative_eq!(filter.frequency, 200.0);

        // initial zero plus 8 pulses (0.8 s * 10 per second)
        let sets = gain_sets(&graph);
        assert_eq!(sets.len(), 9);
        assert_relative_eq!(sets[2].0, 0.1);
        assert_relative_eq!(sets[2].1, 0.0045 * (0.3 + 0.7 * 0.5_f64.sin()));
    }

    #[test]
    fn test_beam_uses_band_pass() {
        let graph = single(AmbientVoice::Beam);
        let filter = graph.filter.expect("beam is filtered");
        assert_eq!(filter.kind, FilterKind::BandPass);
        assert_relative_eq!(filter.q, 5.0);
        assert_eq!(gain_sets(&graph).len(), 1 + 12);
    }

    #[test]
    fn test_modulation_never_reaches_zero() {
        for voice in [AmbientVoice::Engine, AmbientVoice::Beam, AmbientVoice::Hover] {
            let graph = single(voice);
            for (_, value) in gain_sets(&graph).into_iter().skip(1) {
                assert!(value >= GAIN_FLOOR, "{} produced {}", voice, value);
            }
        }
    }

    #[test]
    fn test_pass_swells_then_fades() {
        let graph = single(AmbientVoice::Pass);
        assert_relative_eq!(graph.gain.value_at(0.0), 0.0);
        assert_relative_eq!(graph.gain.value_at(0.36), 0.0075, epsilon = 1e-12);
        assert!(graph.gain.value_at(0.9) < graph.gain.value_at(0.36));
        assert_relative_eq!(graph.gain.value_at(1.2), 0.0);
    }

    #[test]
    fn test_scan_returns_to_start_frequency() {
        let graph = single(AmbientVoice::Scan);
        assert_relative_eq!(graph.frequency_at(0.45), 400.0, epsilon = 1e-9);
        assert_relative_eq!(graph.frequency_at(0.9), 800.0, epsilon = 1e-9);
    }

    #[test]
    fn test_formation_is_staggered() {
        let tones = formation();
        let delays: Vec<Millis> = tones.iter().map(|t| t.delay).collect();
        assert_eq!(delays, vec![0, 100, 200, 300]);
        assert_relative_eq!(tones[3].request.end_freq, 630.0);
    }

    #[test]
    fn test_success_chord_rises() {
        for tone in success_chord() {
            assert!(tone.request.end_freq > tone.request.start_freq);
        }
    }

    #[test]
    fn test_voice_names_round_trip() {
        for voice in AmbientVoice::ALL {
            assert_eq!(voice.name().parse::<AmbientVoice>().unwrap(), voice);
        }
        assert!("warp".parse::<AmbientVoice>().is_err());
    }
}
