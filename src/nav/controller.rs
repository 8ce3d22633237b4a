//! Navigation controller
//!
//! Owns which section is shown and sequences the hide/show transition
//! between two sections. A transition is a 300 ms fade of the outgoing
//! section followed by a 300 ms entrance of the incoming one; while it runs
//! every further request is ignored.

use std::fmt;

use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use super::keyboard::Key;
use super::section::Section;
use crate::audio::SoundCue;
use crate::engine::{Millis, NavEvent, Stage, TimerEvent};
use crate::error::{PortfolioError, Result};
use crate::page::SectionAnimation;

/// Duration of the outgoing fade (ms)
pub const HIDE_MS: Millis = 300;

/// Duration of the incoming entrance (ms)
pub const SHOW_MS: Millis = 300;

/// Which section is shown and whether a transition is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    pub current: Section,
    /// True for the whole hide + show pair
    pub is_animating: bool,
}

/// Step of the in-flight transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransitionPhase {
    #[default]
    Idle,
    Hiding { from: Section, to: Section },
    Showing { to: Section },
}

/// Why a navigation request did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    AlreadyCurrent,
    Animating,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::AlreadyCurrent => write!(f, "already showing"),
            IgnoreReason::Animating => write!(f, "transition in progress"),
        }
    }
}

/// Result of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Started { from: Section, to: Section },
    Ignored(IgnoreReason),
}

impl NavOutcome {
    pub fn is_started(&self) -> bool {
        matches!(self, NavOutcome::Started { .. })
    }
}

/// Section navigation state machine
#[derive(Debug, Clone)]
pub struct NavigationController {
    state: NavigationState,
    phase: TransitionPhase,
    hide_ms: Millis,
    show_ms: Millis,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationController {
    /// Start on About with no transition running
    pub fn new() -> Self {
        Self::with_timing(HIDE_MS, SHOW_MS)
    }

    pub fn with_timing(hide_ms: Millis, show_ms: Millis) -> Self {
        Self {
            state: NavigationState::default(),
            phase: TransitionPhase::Idle,
            hide_ms,
            show_ms,
        }
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    pub fn current(&self) -> Section {
        self.state.current
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Begin a transition to `target`
    ///
    /// Ignored when `target` is already shown or a transition is running.
    ///
    /// # Errors
    /// * `MissingSection` - the page has no container for `target`; nothing
    ///   is changed
    pub fn navigate_to(&mut self, stage: &mut Stage, target: Section) -> Result<NavOutcome> {
        if target == self.state.current {
            return Ok(NavOutcome::Ignored(IgnoreReason::AlreadyCurrent));
        }
        if self.state.is_animating {
            debug!("navigation to {} ignored: transition in progress", target);
            return Ok(NavOutcome::Ignored(IgnoreReason::Animating));
        }
        if !stage.page.has_section(target) {
            if cfg!(debug_assertions) {
                error!("section container #{} not found", target);
            }
            return Err(PortfolioError::MissingSection { section: target });
        }

        let from = self.state.current;
        self.state.is_animating = true;
        self.phase = TransitionPhase::Hiding { from, to: target };
        debug!("navigating {} -> {}", from, target);

        stage.cue(SoundCue::SectionChange);
        highlight_only(stage, target);
        stage
            .page
            .set_section_animation(from, Some(SectionAnimation::FadeOut));
        stage.after(
            self.hide_ms,
            TimerEvent::Nav(NavEvent::HideComplete { from, to: target }),
        );

        Ok(NavOutcome::Started { from, to: target })
    }

    /// Advance the transition
    ///
    /// Returns the section that just became visible, so the caller can run
    /// its entrance animation.
    pub fn on_event(&mut self, stage: &mut Stage, event: NavEvent) -> Option<Section> {
        match event {
            NavEvent::HideComplete { from, to } => {
                if self.phase != (TransitionPhase::Hiding { from, to }) {
                    warn!("stale hide completion {} -> {}", from, to);
                    return None;
                }
                stage.page.set_section_active(from, false);
                stage.page.set_section_animation(from, None);
                stage.page.set_section_active(to, true);
                self.state.current = to;
                self.phase = TransitionPhase::Showing { to };
                stage.after(
                    self.show_ms,
                    TimerEvent::Nav(NavEvent::TransitionComplete),
                );
                Some(to)
            }
            NavEvent::TransitionComplete => {
                self.state.is_animating = false;
                self.phase = TransitionPhase::Idle;
                None
            }
        }
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Arrow keys step through the sections, wrapping at both ends
    ///
    /// Returns `None` for keys that do not navigate.
    pub fn handle_key(&mut self, stage: &mut Stage, key: &Key) -> Result<Option<NavOutcome>> {
        let target = match key {
            Key::ArrowRight | Key::ArrowDown => self.state.current.next(),
            Key::ArrowLeft | Key::ArrowUp => self.state.current.prev(),
            _ => return Ok(None),
        };
        if self.state.is_animating {
            return Ok(Some(NavOutcome::Ignored(IgnoreReason::Animating)));
        }
        self.navigate_to(stage, target).map(Some)
    }

    /// A menu entry was clicked
    pub fn menu_click(&mut self, stage: &mut Stage, target: Section) -> Result<NavOutcome> {
        stage.cue(SoundCue::NavClick);
        self.navigate_to(stage, target)
    }

    /// The pointer entered a menu entry
    pub fn menu_hover(&self, stage: &mut Stage, section: Section) {
        stage.cue(SoundCue::NavHover);
        highlight_only(stage, section);
    }

    /// The pointer left a menu entry
    pub fn menu_leave(&self, stage: &mut Stage) {
        highlight_only(stage, self.state.current);
    }
}

fn highlight_only(stage: &mut Stage, section: Section) {
    for entry in stage.page.menu_sections() {
        stage.page.set_menu_active(entry, entry == section);
    }
}
