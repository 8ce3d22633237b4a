//! Timer events
//!
//! Everything the page defers (animation steps, ambient loops, element
//! removal, button restores) is one of these, queued on the timeline and
//! dispatched by the app when it comes due.

use crate::audio::ToneRequest;
use crate::nav::Section;
use crate::page::{ElementId, NotificationId};

/// Navigation transition steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// The outgoing section finished fading out
    HideComplete { from: Section, to: Section },
    /// The incoming section finished its entrance
    TransitionComplete,
}

/// Recurring ambient-layer timers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbientEvent {
    StarTwinkle,
    UfoEngine { ufo: usize },
    UfoBeam { ufo: usize },
    UfoPass { ufo: usize },
    EarthRotate,
    PlanetRotate { planet: usize },
    SpawnUfo,
    EarthAtmosphere,
    PlanetAtmosphere { planet: usize },
}

/// Contact form button restores
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// After a successful send: restore the button and clear the fields
    Reset,
    /// After a failed send: restore the button, keep the fields
    Restore,
}

/// A deferred action on the timeline
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    Nav(NavEvent),
    /// One tone of a chord or sequence
    Tone(ToneRequest),
    /// One tone of an ambient sequence, gated by the ambient mute
    AmbientTone(ToneRequest),
    /// The splash overlay finished fading
    SplashDismissed,
    Ambient(AmbientEvent),
    /// A transient element reached the end of its life
    Despawn(ElementId),
    /// Roll-up step of one stat counter
    CounterTick { counter: usize },
    /// One sparkle of a counter's completion burst
    Sparkle { counter: usize },
    /// Fill one skill bar to its level
    SkillFill { bar: usize },
    /// Reveal the next character of the typing line
    TypeNext,
    /// The typing line settled after its last character
    TypingFinished,
    NotificationExpired(NotificationId),
    Form(FormEvent),
    /// The mute button press animation ended
    MuteReleased,
    /// The easter-egg palette ran out
    PaletteRestore,
}
