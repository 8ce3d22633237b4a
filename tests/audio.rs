//! Audio Tests
//!
//! Sound gating and the shape of synthesized tones.

mod common;

use approx::assert_relative_eq;

use common::{entered, VisitBuilder};
use starport::app::{Hotspot, UiEvent};
use starport::audio::{export_wav, OfflineRenderer, RecordingBackend, ToneGraph};
use starport::form::ContactFields;
use starport::page::PageLayout;
use starport::{AudioFlags, SoundCue, ToneRequest, ToneSynthesizer};

fn synth(flags: AudioFlags) -> (ToneSynthesizer, RecordingBackend) {
    let backend = RecordingBackend::new();
    (ToneSynthesizer::new(flags, Box::new(backend.clone())), backend)
}

#[test]
fn test_closed_gates_build_no_graph() {
    let request = ToneRequest::new(800.0, 600.0, 0.015, 0.05).unwrap();

    let cases = [
        AudioFlags::default(),
        AudioFlags {
            sounds_enabled: true,
            muted: true,
            ambient_muted: false,
        },
        AudioFlags {
            sounds_enabled: false,
            muted: true,
            ambient_muted: true,
        },
    ];
    for flags in cases {
        let (mut synth, backend) = synth(flags);
        assert!(!synth.play_tone(0, &request));
        assert_eq!(synth.graphs_built(), 0);
        assert!(backend.is_empty());
    }

    let (mut synth, backend) = synth(AudioFlags {
        sounds_enabled: true,
        muted: false,
        ambient_muted: true,
    });
    assert!(synth.play_tone(0, &request));
    assert!(!synth.play_ambient_tone(0, &request));
    assert_eq!(synth.graphs_built(), 1);
    assert_eq!(backend.len(), 1);
}

#[test]
fn test_sweep_is_monotonic_within_bounds() {
    let request = ToneRequest::new(800.0, 600.0, 0.015, 0.015).unwrap();
    let graph = ToneGraph::from_request(&request);

    assert_relative_eq!(graph.frequency_at(0.0), 800.0, epsilon = 1e-9);
    assert_relative_eq!(graph.frequency_at(0.015), 600.0, epsilon = 1e-9);

    let mut previous = graph.frequency_at(0.0);
    for step in 1..=150 {
        let t = 0.015 * step as f64 / 150.0;
        let f = graph.frequency_at(t);
        assert!(f <= previous + 1e-9, "sweep rose at t={}", t);
        assert!((600.0 - 1e-9..=800.0 + 1e-9).contains(&f), "{} out of bounds", f);
        previous = f;
    }

    // Exponential, not linear: the midpoint is the geometric mean
    assert_relative_eq!(
        graph.frequency_at(0.0075),
        (800.0f64 * 600.0).sqrt(),
        epsilon = 1e-6
    );
}

#[test]
fn test_no_sound_before_start() {
    let mut visit = VisitBuilder::new().build();
    visit
        .app
        .handle(UiEvent::Hover {
            target: Hotspot::Planet { index: 0 },
        })
        .unwrap();
    visit.app.advance(5000);
    assert!(visit.audio.is_empty());
}

#[test]
fn test_global_mute_silences_everything() {
    let mut visit = entered(VisitBuilder::new());
    visit.audio.clear();
    visit.app.set_muted(true);

    visit.app.handle(UiEvent::Hover { target: Hotspot::Button }).unwrap();
    visit.app.advance(20_000);
    assert!(visit.audio.is_empty());
}

#[test]
fn test_success_chord_is_staggered() {
    let mut visit = entered(VisitBuilder::new().layout(PageLayout::minimal()));
    visit.audio.clear();

    let at = visit.app.now();
    visit
        .app
        .handle(UiEvent::FillForm {
            fields: ContactFields::new("Ada", "ada@example.com", "Hi"),
        })
        .unwrap();
    visit.app.handle(UiEvent::Submit).unwrap();
    visit.app.advance(1000);

    let starts: Vec<u64> = visit.audio.played().iter().map(|t| t.at - at).collect();
    // FormSubmit, then the four chord tones 50ms apart
    assert_eq!(starts, vec![0, 0, 50, 100, 150]);
}

#[test]
fn test_rendered_cue_round_trips_through_wav() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("type.wav");

    let request = SoundCue::Type.tone().unwrap();
    let samples = OfflineRenderer::new(8000).render(&ToneGraph::from_request(&request));
    export_wav(&samples, &path, 8000, 32).unwrap();

    let mut reader = hound::WavReader::open(&path).unwrap();
    let read: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
    assert_eq!(read.len(), samples.len());
    let peak = read.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    assert!(peak <= request.volume as f32 + 1e-6);
    assert!(peak > 0.0);
}
