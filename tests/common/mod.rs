//! Shared test fixtures

#![allow(dead_code)]

use rand::rngs::SmallRng;
use rand::SeedableRng;

use starport::audio::RecordingBackend;
use starport::clipboard::MemoryClipboard;
use starport::form::RecordingEmailService;
use starport::page::{MemoryPage, PageLayout};
use starport::state::{MemoryStore, PreferenceStore};
use starport::{AppConfig, Collaborators, PortfolioApp};

/// An app wired to in-memory doubles, plus handles on them
pub struct Visit {
    pub app: PortfolioApp,
    pub audio: RecordingBackend,
    pub email: RecordingEmailService,
    pub clipboard: MemoryClipboard,
}

pub struct VisitBuilder {
    layout: PageLayout,
    config: AppConfig,
    email: RecordingEmailService,
    prefs: Box<dyn PreferenceStore>,
    seed: u64,
}

impl VisitBuilder {
    pub fn new() -> Self {
        Self {
            layout: PageLayout::default(),
            config: AppConfig::default(),
            email: RecordingEmailService::new(),
            prefs: Box::new(MemoryStore::new()),
            seed: 11,
        }
    }

    pub fn layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn email(mut self, email: RecordingEmailService) -> Self {
        self.email = email;
        self
    }

    pub fn prefs(mut self, prefs: Box<dyn PreferenceStore>) -> Self {
        self.prefs = prefs;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> Visit {
        let audio = RecordingBackend::new();
        let clipboard = MemoryClipboard::new();
        let app = PortfolioApp::new(
            self.config,
            Collaborators {
                page: Box::new(MemoryPage::new(self.layout)),
                backend: Box::new(audio.clone()),
                email: Box::new(self.email.clone()),
                prefs: self.prefs,
                clipboard: Box::new(clipboard.clone()),
                rng: Box::new(SmallRng::seed_from_u64(self.seed)),
            },
        );
        Visit {
            app,
            audio,
            email: self.email,
            clipboard,
        }
    }
}

/// A started visit with the splash already gone
pub fn entered(builder: VisitBuilder) -> Visit {
    let mut visit = builder.build();
    visit.app.start();
    visit.app.advance(800);
    visit
}
