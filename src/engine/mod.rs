//! Runtime engine
//!
//! Virtual clock, deferred events and the shared stage the controllers run
//! against.

pub mod events;
pub mod stage;
pub mod timeline;

pub use events::{AmbientEvent, FormEvent, NavEvent, TimerEvent};
pub use stage::{Stage, DEFAULT_NOTIFICATION_MS};
pub use timeline::{Millis, TimerId, Timeline};
