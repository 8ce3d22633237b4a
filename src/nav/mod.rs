//! Section navigation
//!
//! Sections, keyboard input and the transition state machine.

pub mod controller;
pub mod keyboard;
pub mod section;

pub use controller::{
    IgnoreReason, NavOutcome, NavigationController, NavigationState, TransitionPhase, HIDE_MS,
    SHOW_MS,
};
pub use keyboard::{Key, KonamiDetector, KONAMI};
pub use section::Section;
