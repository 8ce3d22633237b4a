//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::fs;
use std::path::Path;

use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::app::{Collaborators, PortfolioApp, UiEvent};
use crate::audio::{
    check_sample_rate, export_wav, AmbientVoice, AudioBackend, MixdownBackend, OfflineRenderer,
    RecordingBackend, SoundCue, ToneGraph, Voicing,
};
use crate::clipboard::MemoryClipboard;
use crate::config::AppConfig;
use crate::engine::Millis;
use crate::error::{PortfolioError, Result};
use crate::form::{ContactFields, LogEmailService};
use crate::nav::Section;
use crate::page::{MemoryPage, PageLayout};
use crate::state::{JsonFileStore, MemoryStore, PreferenceStore};

/// One line of a simulation script
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Step {
    /// Move the clock forward
    Advance { advance: Millis },
    /// Render `frames` frames at `fps`, advancing the clock between them
    Frames { frames: u32, fps: u32 },
    Event(UiEvent),
}

/// List every cue and voice.
pub fn list_cues() -> Result<()> {
    println!("Sound cues:");
    println!("{:-<60}", "");
    for cue in SoundCue::ALL {
        match cue.tone() {
            Some(t) => println!(
                "  {:<18} {:>6.0} -> {:<6.0} Hz  vol {:.3}  {:.3}s",
                cue.name(),
                t.start_freq,
                t.end_freq,
                t.volume,
                t.duration
            ),
            None => println!("  {:<18} {}", cue.name(), describe(&cue.voicing())),
        }
    }

    println!();
    println!("Ambient voices:");
    println!("{:-<60}", "");
    for voice in AmbientVoice::ALL {
        println!("  {:<18} {}", voice.name(), describe(&voice.voicing()));
    }

    Ok(())
}

fn describe(voicing: &Voicing) -> String {
    match voicing {
        Voicing::Single(graph) => format!("shaped tone, {:.3}s", graph.duration()),
        Voicing::Sequence(tones) => format!("sequence of {} tones", tones.len()),
    }
}

/// Render one cue or voice to a WAV file.
pub fn render(sound: &str, out: &Path, sample_rate: u32, bit_depth: u16) -> Result<()> {
    info!("Rendering '{}' to: {}", sound, out.display());
    check_sample_rate(sample_rate)?;

    let voicing = match sound.parse::<SoundCue>() {
        Ok(cue) => cue.voicing(),
        Err(_) => sound.parse::<AmbientVoice>()?.voicing(),
    };

    let renderer = OfflineRenderer::new(sample_rate);
    let samples = match voicing {
        Voicing::Single(graph) => renderer.render(&graph),
        Voicing::Sequence(tones) => {
            let graphs: Vec<(Millis, ToneGraph)> = tones
                .iter()
                .map(|t| (t.delay, ToneGraph::from_request(&t.request)))
                .collect();
            renderer.mixdown(&graphs)
        }
    };

    export_wav(&samples, out, sample_rate, bit_depth)?;

    println!(
        "Rendered {} ({} samples at {} Hz) to {}",
        sound,
        samples.len(),
        sample_rate,
        out.display()
    );

    Ok(())
}

/// Where the played tones end up
enum Output {
    Count(RecordingBackend),
    Mix(MixdownBackend),
}

impl Output {
    fn new(wav: Option<&Path>) -> Self {
        match wav {
            Some(_) => Output::Mix(MixdownBackend::new(crate::audio::DEFAULT_SAMPLE_RATE)),
            None => Output::Count(RecordingBackend::new()),
        }
    }

    fn backend(&self) -> Box<dyn AudioBackend> {
        match self {
            Output::Count(backend) => Box::new(backend.clone()),
            Output::Mix(backend) => Box::new(backend.clone()),
        }
    }

    fn finish(&self, wav: Option<&Path>) -> Result<()> {
        match (self, wav) {
            (Output::Count(backend), _) => {
                println!("Tones played: {}", backend.len());
                Ok(())
            }
            (Output::Mix(backend), Some(path)) => {
                let samples = backend.samples();
                export_wav(&samples, path, backend.sample_rate(), 16)?;
                println!("Mixdown written: {} ({} samples)", path.display(), samples.len());
                Ok(())
            }
            (Output::Mix(_), None) => Ok(()),
        }
    }
}

fn build_app(
    config: AppConfig,
    layout: PageLayout,
    prefs: Option<&Path>,
    seed: u64,
    output: &Output,
) -> PortfolioApp {
    let prefs: Box<dyn PreferenceStore> = match prefs {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::new()),
    };

    PortfolioApp::new(
        config,
        Collaborators {
            page: Box::new(MemoryPage::new(layout)),
            backend: output.backend(),
            email: Box::new(LogEmailService),
            prefs,
            clipboard: Box::new(MemoryClipboard::new()),
            rng: Box::new(SmallRng::seed_from_u64(seed)),
        },
    )
}

/// Play `steps` against `app`
///
/// Navigation errors are reported and the script carries on.
pub fn run_script(app: &mut PortfolioApp, steps: &[Step]) -> usize {
    let mut fired = 0;
    for step in steps {
        match step {
            Step::Advance { advance } => fired += app.advance(*advance),
            Step::Frames { frames, fps } => {
                let gap = 1000 / Millis::from((*fps).max(1));
                for _ in 0..*frames {
                    fired += app.advance(gap);
                    if let Err(err) = app.handle(UiEvent::Frame) {
                        warn!("{}", err);
                    }
                }
            }
            Step::Event(event) => {
                if let Err(err) = app.handle(event.clone()) {
                    warn!("[{}] {}", err.error_code(), err);
                }
            }
        }
    }
    fired
}

fn print_summary(app: &PortfolioApp, fired: usize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&app.state())?);
    println!("Clock: {}ms", app.now());
    println!("Timers fired: {}", fired);
    println!("Timers pending: {}", app.pending_timers());
    for note in app.page().notifications() {
        println!("Notification ({:?}): {}", note.kind, note.message);
    }
    Ok(())
}

/// Replay a scripted visit.
pub fn simulate(
    script: &Path,
    layout: Option<&Path>,
    config: Option<&Path>,
    prefs: Option<&Path>,
    seed: u64,
    wav: Option<&Path>,
) -> Result<()> {
    info!("Simulating script: {}", script.display());

    let config = match config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let layout = match layout {
        Some(path) => PageLayout::load(path)?,
        None => PageLayout::default(),
    };

    let text = fs::read_to_string(script)?;
    let steps: Vec<Step> =
        serde_json::from_str(&text).map_err(|e| PortfolioError::InvalidConfig {
            path: script.to_path_buf(),
            reason: e.to_string(),
        })?;

    let output = Output::new(wav);
    let mut app = build_app(config, layout, prefs, seed, &output);
    let fired = run_script(&mut app, &steps);

    print_summary(&app, fired)?;
    output.finish(wav)
}

/// Steps visiting every section of the stock page and sending the form
pub fn tour_steps() -> Vec<Step> {
    let mut steps = vec![Step::Event(UiEvent::Start), Step::Advance { advance: 1000 }];
    for section in Section::ALL.into_iter().skip(1) {
        steps.push(Step::Event(UiEvent::MenuHover { section }));
        steps.push(Step::Event(UiEvent::MenuClick { section }));
        steps.push(Step::Advance { advance: 2500 });
    }
    steps.push(Step::Event(UiEvent::FocusInput));
    steps.push(Step::Event(UiEvent::FillForm {
        fields: ContactFields::new("Visitor", "visitor@example.com", "Hello from the tour"),
    }));
    steps.push(Step::Event(UiEvent::Submit));
    steps.push(Step::Advance { advance: 3000 });
    steps
}

/// Visit every section of the stock page.
pub fn tour(seed: u64, wav: Option<&Path>) -> Result<()> {
    info!("Touring the stock page (seed {})", seed);

    let output = Output::new(wav);
    let mut app = build_app(
        AppConfig::default(),
        PageLayout::default(),
        None,
        seed,
        &output,
    );
    let fired = run_script(&mut app, &tour_steps());

    print_summary(&app, fired)?;
    output.finish(wav)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_steps_parse() {
        let steps: Vec<Step> = serde_json::from_str(
            r#"[
                {"type": "start"},
                {"advance": 800},
                {"frames": 30, "fps": 20},
                {"type": "key", "code": "ArrowRight"}
            ]"#,
        )
        .unwrap();

        assert!(matches!(steps[0], Step::Event(UiEvent::Start)));
        assert!(matches!(steps[1], Step::Advance { advance: 800 }));
        assert!(matches!(steps[2], Step::Frames { frames: 30, fps: 20 }));
        assert!(matches!(&steps[3], Step::Event(UiEvent::Key { code }) if code == "ArrowRight"));
    }

    #[test]
    fn test_tour_ends_on_contact() {
        let output = Output::new(None);
        let mut app = build_app(AppConfig::default(), PageLayout::default(), None, 3, &output);
        run_script(&mut app, &tour_steps());

        let state = app.state();
        assert_eq!(state.navigation.current, Section::Contact);
        assert!(!state.navigation.is_animating);
        assert!(state.started);
        assert_eq!(app.page().submit_button().label, "Send Message");
        assert!(!app.page().submit_button().disabled);
    }

    #[test]
    fn test_render_writes_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("click.wav");
        render("button-click", &path, 8000, 16).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 8000);
        assert!((959..=961).contains(&reader.len()));

        let err = render("nope", &path, 8000, 16).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CUE");
    }

    #[test]
    fn test_render_rejects_low_sample_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.wav");

        let err = render("engine", &path, 40, 16).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");
        assert!(!path.exists());
    }
}
