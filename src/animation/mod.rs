//! Section and page animations
//!
//! Counter roll-up, skill bars, project cards, the typing line, the
//! starfield and the scroll progress bar.

pub mod counters;
pub mod projects;
pub mod scroll;
pub mod skills;
pub mod stars;
pub mod typing;

pub use counters::CounterAnimator;
pub use scroll::ScrollProgress;
pub use typing::TypingEffect;
