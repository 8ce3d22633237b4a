//! Portfolio application
//!
//! Wires the controllers to one [`Stage`] and routes host input
//! ([`UiEvent`]) and due timers ([`TimerEvent`]) to them. The host owns the
//! clock: it calls [`PortfolioApp::advance`] and every timer due within the
//! step fires in time order.

use log::{debug, info, warn};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::animation::{projects, skills, stars, CounterAnimator, ScrollProgress, TypingEffect};
use crate::audio::{AudioBackend, AudioFlags, SoundCue, ToneSynthesizer};
use crate::clipboard::Clipboard;
use crate::config::AppConfig;
use crate::effects::{
    particles, BurstShape, EffectQuality, EffectScheduler, PerformanceMonitor, PLANET_BURST,
    STAT_BURST, STAT_CARD_BURST,
};
use crate::engine::{Millis, Stage, TimerEvent};
use crate::error::Result;
use crate::form::{ContactFields, EmailService, FormSubmitter, SubmitOutcome};
use crate::nav::{Key, KonamiDetector, NavigationController, NavigationState, Section};
use crate::page::{MuteButtonState, NotificationKind, Page, Palette, Rect, SplashState};
use crate::state::{load_ambient_mute, save_ambient_mute, PreferenceStore};

pub const COPIED_MESSAGE: &str = "Copied to clipboard!";

/// Snapshot of the application state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    pub navigation: NavigationState,
    pub audio: AudioFlags,
    /// The splash start button was pressed
    pub started: bool,
    pub quality: EffectQuality,
    pub palette: Palette,
}

/// Interactive page elements outside the menu and the form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Hotspot {
    Planet { index: usize },
    SaturnRings,
    /// Stat item around counter `index`
    StatItem { index: usize },
    SkillItem,
    ProjectCard,
    /// Any other button
    Button,
    TimelineItem,
    StatCard { bounds: Rect },
    AchievementTag,
    ContactItem,
    SubmitButton,
}

/// Host input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum UiEvent {
    /// The splash start button
    Start,
    MenuClick { section: Section },
    MenuHover { section: Section },
    MenuLeave,
    /// A key press by `KeyboardEvent.code`
    Key { code: String },
    Hover { target: Hotspot },
    Click { target: Hotspot },
    Filter { filter: String },
    FocusInput,
    FillForm { fields: ContactFields },
    Submit,
    Copy { text: String },
    ToggleMute,
    Scroll { offset: f64, max_offset: f64 },
    PointerMove { x: f64, y: f64 },
    /// A rendered frame, for performance tiering
    Frame,
}

/// Everything the app talks to outside itself
pub struct Collaborators {
    pub page: Box<dyn Page>,
    pub backend: Box<dyn AudioBackend>,
    pub email: Box<dyn EmailService>,
    pub prefs: Box<dyn PreferenceStore>,
    pub clipboard: Box<dyn Clipboard>,
    pub rng: Box<dyn RngCore>,
}

pub struct PortfolioApp {
    config: AppConfig,
    stage: Stage,
    nav: NavigationController,
    effects: EffectScheduler,
    counters: CounterAnimator,
    typing: TypingEffect,
    scroll: ScrollProgress,
    form: FormSubmitter,
    performance: PerformanceMonitor,
    konami: KonamiDetector,
    prefs: Box<dyn PreferenceStore>,
    clipboard: Box<dyn Clipboard>,
    started: bool,
}

impl PortfolioApp {
    /// Build the app and prepare the page behind the splash
    ///
    /// Sound stays disabled until [`PortfolioApp::start`]. The ambient mute
    /// is restored from the preference store.
    pub fn new(config: AppConfig, parts: Collaborators) -> Self {
        let ambient_muted = load_ambient_mute(parts.prefs.as_ref(), &config.preference_key);
        let synth = ToneSynthesizer::new(
            AudioFlags {
                sounds_enabled: false,
                muted: false,
                ambient_muted,
            },
            parts.backend,
        );
        let mut stage = Stage::new(parts.page, synth, parts.rng)
            .with_notification_ttl(config.timing.notification_ms);

        stars::create(&mut stage, config.ambient.star_count);
        if stage.page.has_mute_button() {
            stage.page.set_mute_button(mute_button(ambient_muted, false));
        }

        Self {
            nav: NavigationController::with_timing(config.timing.hide_ms, config.timing.show_ms),
            effects: EffectScheduler::new(config.ambient.clone()),
            counters: CounterAnimator::new(),
            typing: TypingEffect::new(),
            scroll: ScrollProgress::new(),
            form: FormSubmitter::new(
                parts.email,
                config.email.clone(),
                config.timing.form_restore_ms,
            ),
            performance: PerformanceMonitor::new(),
            konami: KonamiDetector::new(),
            prefs: parts.prefs,
            clipboard: parts.clipboard,
            started: false,
            stage,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn page(&self) -> &dyn Page {
        self.stage.page.as_ref()
    }

    pub fn now(&self) -> Millis {
        self.stage.now()
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    pub fn effects(&self) -> &EffectScheduler {
        &self.effects
    }

    /// Number of timers waiting on the timeline
    pub fn pending_timers(&self) -> usize {
        self.stage.timeline.pending()
    }

    pub fn state(&self) -> AppState {
        AppState {
            navigation: self.nav.state(),
            audio: self.stage.synth.flags(),
            started: self.started,
            quality: self.stage.page.effect_quality(),
            palette: self.stage.page.palette(),
        }
    }

    /// Global mute, independent of the ambient mute
    pub fn set_muted(&mut self, muted: bool) {
        self.stage.synth.set_muted(muted);
    }

    // ========================================================================
    // Splash gate
    // ========================================================================

    /// Press the splash start button
    ///
    /// Enables sound, fades the splash and, once it has faded, starts the
    /// typing line, the counters and the ambient layer. Returns false if the
    /// app was already started.
    pub fn start(&mut self) -> bool {
        if self.started {
            debug!("start ignored: already started");
            return false;
        }
        self.started = true;
        self.stage.synth.enable();
        self.stage.cue(SoundCue::ButtonClick);
        self.stage.page.set_splash(SplashState::FadingOut);
        self.stage.page.set_content_visible(true);
        self.stage
            .after(self.config.timing.splash_fade_ms, TimerEvent::SplashDismissed);
        info!("started at {}ms", self.now());
        true
    }

    fn on_splash_dismissed(&mut self) {
        self.stage.page.set_splash(SplashState::Hidden);
        self.typing.start(&mut self.stage);
        self.counters.start(&mut self.stage);
        self.effects.activate(&mut self.stage);
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Route one host input
    ///
    /// # Errors
    /// * `MissingSection` - a navigation target has no container on the page
    pub fn handle(&mut self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::Start => {
                self.start();
            }
            UiEvent::MenuClick { section } => {
                self.nav.menu_click(&mut self.stage, section)?;
            }
            UiEvent::MenuHover { section } => self.nav.menu_hover(&mut self.stage, section),
            UiEvent::MenuLeave => self.nav.menu_leave(&mut self.stage),
            UiEvent::Key { code } => self.key(&Key::from_code(&code))?,
            UiEvent::Hover { target } => self.hover(target),
            UiEvent::Click { target } => self.click(target),
            UiEvent::Filter { filter } => {
                projects::apply_filter(&mut self.stage, &filter);
            }
            UiEvent::FocusInput => self.form.focus(&mut self.stage),
            UiEvent::FillForm { fields } => self.stage.page.set_form_fields(fields),
            UiEvent::Submit => {
                let outcome = self.form.submit(&mut self.stage);
                if outcome != SubmitOutcome::Busy {
                    info!("contact form: {:?}", outcome);
                }
            }
            UiEvent::Copy { text } => self.copy(&text),
            UiEvent::ToggleMute => self.toggle_ambient_mute(),
            UiEvent::Scroll { offset, max_offset } => {
                self.scroll.on_scroll(&mut self.stage, offset, max_offset);
            }
            UiEvent::PointerMove { x, y } => stars::parallax(&mut self.stage, (x, y)),
            UiEvent::Frame => {
                if let Some(sample) = self.performance.frame(self.stage.now()) {
                    self.stage.page.set_effect_quality(sample.quality);
                }
            }
        }
        Ok(())
    }

    fn key(&mut self, key: &Key) -> Result<()> {
        if self.konami.push(key) {
            info!("konami code entered");
            self.stage.page.set_palette(Palette::Rainbow);
            self.stage
                .after(self.config.timing.palette_ms, TimerEvent::PaletteRestore);
        }
        self.nav.handle_key(&mut self.stage, key)?;
        Ok(())
    }

    fn hover(&mut self, target: Hotspot) {
        match target {
            Hotspot::Planet { index } => {
                self.stage.cue(SoundCue::PlanetHover);
                if let Some(bounds) = self.stage.page.planet_bounds().get(index).copied() {
                    self.burst(bounds, &PLANET_BURST);
                }
            }
            Hotspot::SaturnRings => self.stage.cue(SoundCue::SaturnRings),
            Hotspot::StatItem { .. } | Hotspot::SkillItem | Hotspot::Button => {
                self.stage.cue(SoundCue::ButtonHover)
            }
            Hotspot::ProjectCard => self.stage.cue(SoundCue::ProjectHover),
            Hotspot::TimelineItem => self.stage.cue(SoundCue::TimelineHover),
            Hotspot::StatCard { bounds } => {
                self.stage.cue(SoundCue::StatCardHover);
                self.burst(bounds, &STAT_CARD_BURST);
            }
            Hotspot::AchievementTag => self.stage.cue(SoundCue::AchievementHover),
            Hotspot::ContactItem | Hotspot::SubmitButton => {
                self.stage.cue(SoundCue::ContactHover)
            }
        }
    }

    fn click(&mut self, target: Hotspot) {
        match target {
            Hotspot::Planet { .. } => self.stage.cue(SoundCue::PlanetRotate),
            Hotspot::StatItem { index } => {
                self.stage.cue(SoundCue::ButtonClick);
                if let Some(bounds) = self.stage.page.counter_bounds(index) {
                    self.burst(bounds, &STAT_BURST);
                }
            }
            Hotspot::SkillItem => self.stage.cue(SoundCue::SkillHover),
            Hotspot::TimelineItem => self.stage.cue(SoundCue::TimelineClick),
            Hotspot::Button | Hotspot::SubmitButton | Hotspot::ProjectCard => {
                self.stage.cue(SoundCue::ButtonClick)
            }
            Hotspot::SaturnRings
            | Hotspot::StatCard { .. }
            | Hotspot::AchievementTag
            | Hotspot::ContactItem => {}
        }
    }

    fn burst(&mut self, bounds: Rect, shape: &BurstShape) {
        if !self.stage.page.effect_quality().allows_particles() {
            return;
        }
        for particle in particles::burst(bounds, shape, self.stage.rng()) {
            self.stage.spawn(particle);
        }
    }

    fn copy(&mut self, text: &str) {
        self.stage.cue(SoundCue::CopyClick);
        match self.clipboard.write_text(text) {
            Ok(()) => {
                self.stage.notify(NotificationKind::Success, COPIED_MESSAGE);
            }
            Err(err) => {
                warn!("{}", err);
                self.stage
                    .notify(NotificationKind::Error, &err.friendly_message());
            }
        }
    }

    /// Flip the ambient mute and persist it
    ///
    /// Pages without a mute button ignore the toggle.
    pub fn toggle_ambient_mute(&mut self) {
        if !self.stage.page.has_mute_button() {
            return;
        }
        let muted = !self.stage.synth.flags().ambient_muted;
        self.stage.synth.set_ambient_muted(muted);
        if let Err(err) = save_ambient_mute(self.prefs.as_mut(), &self.config.preference_key, muted)
        {
            warn!("mute preference not saved: {}", err);
        }
        self.stage.page.set_mute_button(mute_button(muted, true));
        self.stage
            .after(self.config.timing.mute_press_ms, TimerEvent::MuteReleased);
    }

    // ========================================================================
    // Clock
    // ========================================================================

    /// Move the clock forward by `ms`, firing every timer due on the way
    ///
    /// Returns the number of events dispatched.
    pub fn advance(&mut self, ms: Millis) -> usize {
        let until = self.stage.now() + ms;
        let mut fired = 0;
        while let Some(event) = self.stage.timeline.pop_due(until) {
            self.dispatch(event);
            fired += 1;
        }
        self.stage.timeline.set_now(until);
        fired
    }

    fn dispatch(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Nav(nav_event) => {
                if let Some(section) = self.nav.on_event(&mut self.stage, nav_event) {
                    self.on_section_shown(section);
                }
            }
            TimerEvent::Tone(request) => {
                self.stage.tone(&request);
            }
            TimerEvent::AmbientTone(request) => {
                self.stage.ambient_tone(&request);
            }
            TimerEvent::SplashDismissed => self.on_splash_dismissed(),
            TimerEvent::Ambient(ambient) => self.effects.on_event(&mut self.stage, ambient),
            TimerEvent::Despawn(id) => {
                self.stage.page.despawn(id);
            }
            TimerEvent::CounterTick { counter } => self.counters.on_tick(&mut self.stage, counter),
            TimerEvent::Sparkle { counter } => self.counters.on_sparkle(&mut self.stage, counter),
            TimerEvent::SkillFill { bar } => skills::on_fill(&mut self.stage, bar),
            TimerEvent::TypeNext => self.typing.type_next(&mut self.stage),
            TimerEvent::TypingFinished => self.typing.finish(&mut self.stage),
            TimerEvent::NotificationExpired(id) => {
                self.stage.page.dismiss_notification(id);
            }
            TimerEvent::Form(form_event) => self.form.on_event(&mut self.stage, form_event),
            TimerEvent::MuteReleased => {
                let muted = self.stage.synth.flags().ambient_muted;
                self.stage.page.set_mute_button(mute_button(muted, false));
            }
            TimerEvent::PaletteRestore => self.stage.page.set_palette(Palette::Standard),
        }
    }

    /// Entrance animation of a section that just became visible
    fn on_section_shown(&mut self, section: Section) {
        match section {
            Section::About => self.counters.replay(&mut self.stage),
            Section::Skills => skills::start(&mut self.stage),
            Section::Projects => projects::animate_cards(&mut self.stage),
            Section::Experience | Section::Contact => {}
        }
    }
}

fn mute_button(muted: bool, pressed: bool) -> MuteButtonState {
    MuteButtonState {
        label: if muted { "UFO SOUND OFF" } else { "UFO SOUND ON" }.to_string(),
        muted,
        pressed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingBackend;
    use crate::clipboard::MemoryClipboard;
    use crate::form::RecordingEmailService;
    use crate::page::{MemoryPage, PageLayout};
    use crate::state::{MemoryStore, AMBIENT_MUTE_KEY};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    struct Harness {
        app: PortfolioApp,
        audio: RecordingBackend,
        prefs: MemoryStore,
        clipboard: MemoryClipboard,
    }

    fn harness_with(layout: PageLayout, prefs: MemoryStore, clipboard: MemoryClipboard) -> Harness {
        let audio = RecordingBackend::new();
        let app = PortfolioApp::new(
            AppConfig::default(),
            Collaborators {
                page: Box::new(MemoryPage::new(layout)),
                backend: Box::new(audio.clone()),
                email: Box::new(RecordingEmailService::new()),
                prefs: Box::new(prefs.clone()),
                clipboard: Box::new(clipboard.clone()),
                rng: Box::new(SmallRng::seed_from_u64(42)),
            },
        );
        Harness {
            app,
            audio,
            prefs,
            clipboard,
        }
    }

    fn harness() -> Harness {
        harness_with(PageLayout::default(), MemoryStore::new(), MemoryClipboard::new())
    }

    #[test]
    fn test_initial_state() {
        let h = harness();
        let state = h.app.state();
        assert_eq!(state.navigation.current, Section::About);
        assert!(!state.navigation.is_animating);
        assert!(!state.audio.sounds_enabled);
        assert!(!state.started);
        assert_eq!(h.app.page().stars().len(), 100);
        assert_eq!(h.app.page().mute_button().unwrap().label, "UFO SOUND ON");
    }

    #[test]
    fn test_silent_before_start() {
        let mut h = harness();
        h.app.handle(UiEvent::MenuHover { section: Section::Skills }).unwrap();
        h.app.handle(UiEvent::Hover { target: Hotspot::Button }).unwrap();
        assert!(h.audio.is_empty());
    }

    #[test]
    fn test_second_start_ignored() {
        let mut h = harness();
        assert!(h.app.start());
        assert!(!h.app.start());
        h.app.advance(0);
        assert_eq!(h.audio.len(), 1);
        assert!(h.app.state().started);
    }

    #[test]
    fn test_mute_restored_from_preference() {
        let h = harness_with(
            PageLayout::default(),
            MemoryStore::with(AMBIENT_MUTE_KEY, "true"),
            MemoryClipboard::new(),
        );
        assert!(h.app.state().audio.ambient_muted);
        assert_eq!(h.app.page().mute_button().unwrap().label, "UFO SOUND OFF");
    }

    #[test]
    fn test_toggle_mute_persists_and_releases() {
        let mut h = harness();
        h.app.handle(UiEvent::ToggleMute).unwrap();

        assert!(h.app.state().audio.ambient_muted);
        assert_eq!(h.prefs.get(AMBIENT_MUTE_KEY).unwrap().as_deref(), Some("true"));
        let button = h.app.page().mute_button().unwrap();
        assert_eq!(button.label, "UFO SOUND OFF");
        assert!(button.pressed);

        h.app.advance(200);
        assert!(!h.app.page().mute_button().unwrap().pressed);

        h.app.handle(UiEvent::ToggleMute).unwrap();
        assert_eq!(h.prefs.get(AMBIENT_MUTE_KEY).unwrap().as_deref(), Some("false"));
    }

    #[test]
    fn test_copy_notifications() {
        let mut h = harness();
        h.app.start();
        h.app
            .handle(UiEvent::Copy {
                text: "ada@example.com".to_string(),
            })
            .unwrap();
        assert_eq!(h.clipboard.contents().as_deref(), Some("ada@example.com"));
        assert_eq!(h.app.page().notifications()[0].message, COPIED_MESSAGE);

        h.app.advance(3000);
        assert!(h.app.page().notifications().is_empty());

        let mut refused = harness_with(
            PageLayout::default(),
            MemoryStore::new(),
            MemoryClipboard::refusing(),
        );
        refused
            .app
            .handle(UiEvent::Copy {
                text: "x".to_string(),
            })
            .unwrap();
        let note = &refused.app.page().notifications()[0];
        assert_eq!(note.kind, NotificationKind::Error);
        assert_eq!(note.message, "Failed to copy");
    }

    #[test]
    fn test_konami_palette() {
        let mut h = harness_with(PageLayout::minimal(), MemoryStore::new(), MemoryClipboard::new());
        for code in [
            "ArrowUp", "ArrowUp", "ArrowDown", "ArrowDown", "ArrowLeft", "ArrowRight",
            "ArrowLeft", "ArrowRight", "KeyB", "KeyA",
        ] {
            h.app
                .handle(UiEvent::Key {
                    code: code.to_string(),
                })
                .unwrap();
        }
        assert_eq!(h.app.state().palette, Palette::Rainbow);

        h.app.advance(3000);
        assert_eq!(h.app.state().palette, Palette::Standard);
    }

    #[test]
    fn test_stat_click_bursts() {
        let mut h = harness();
        h.app
            .handle(UiEvent::Click {
                target: Hotspot::StatItem { index: 0 },
            })
            .unwrap();
        assert_eq!(h.app.page().elements().len(), 12);
        h.app.advance(1000);
        assert!(h.app.page().elements().is_empty());
    }

    #[test]
    fn test_events_deserialize() {
        let event: UiEvent =
            serde_json::from_str(r#"{"type": "menu-click", "section": "skills"}"#).unwrap();
        assert_eq!(
            event,
            UiEvent::MenuClick {
                section: Section::Skills
            }
        );

        let event: UiEvent = serde_json::from_str(
            r#"{"type": "hover", "target": {"kind": "planet", "index": 2}}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            UiEvent::Hover {
                target: Hotspot::Planet { index: 2 }
            }
        );
    }
}
