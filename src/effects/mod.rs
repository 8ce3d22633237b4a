//! Decorative effects
//!
//! The ambient timer layer, particle builders and frame-rate tiering.

pub mod ambient;
pub mod particles;
pub mod performance;

pub use ambient::EffectScheduler;
pub use particles::{BurstShape, PLANET_BURST, STAT_BURST, STAT_CARD_BURST};
pub use performance::{EffectQuality, FpsSample, PerformanceMonitor};
