//! Starport - Headless Portfolio Presentation Engine
//!
//! Drives the interactive behaviour of a single-page portfolio without a
//! browser: section navigation, procedurally synthesized UI sounds, the
//! ambient decoration layer and the contact form.
//!
//! # Architecture
//!
//! The browser is reduced to a handful of seams:
//! - [`page::Page`]: the document (sections, menu, counters, decorations)
//! - [`audio::AudioBackend`]: where synthesized tone graphs are played
//! - [`form::EmailService`], [`state::PreferenceStore`], [`clipboard::Clipboard`]
//!
//! Time is virtual. Everything deferred goes through one
//! [`engine::Timeline`], and [`app::PortfolioApp`] dispatches due timers when
//! the host advances the clock.

pub mod animation;
pub mod app;
pub mod audio;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod effects;
pub mod engine;
pub mod error;
pub mod form;
pub mod nav;
pub mod page;
pub mod state;

pub use app::{AppState, Collaborators, Hotspot, PortfolioApp, UiEvent};
pub use audio::{AudioFlags, SoundCue, ToneRequest, ToneSynthesizer};
pub use config::AppConfig;
pub use effects::EffectScheduler;
pub use error::{PortfolioError, Result};
pub use form::FormSubmitter;
pub use nav::{NavigationController, Section};
