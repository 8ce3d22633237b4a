//! Frame-rate tiering
//!
//! Counts frames over windows of at least one second and maps the measured
//! rate to an effect tier. Low drops particle effects entirely.

use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};

use crate::engine::Millis;

/// Minimum measurement window (ms)
pub const WINDOW_MS: Millis = 1000;

/// Visual effect tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectQuality {
    #[default]
    High,
    Medium,
    Low,
}

impl EffectQuality {
    /// Tier for a measured frame rate
    pub fn from_fps(fps: u32) -> Self {
        if fps < 30 {
            EffectQuality::Low
        } else if fps < 45 {
            EffectQuality::Medium
        } else {
            EffectQuality::High
        }
    }

    /// Whether particle spawns run at this tier
    pub fn allows_particles(self) -> bool {
        self != EffectQuality::Low
    }
}

impl fmt::Display for EffectQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectQuality::High => write!(f, "high"),
            EffectQuality::Medium => write!(f, "medium"),
            EffectQuality::Low => write!(f, "low"),
        }
    }
}

/// A completed measurement window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FpsSample {
    pub fps: u32,
    pub quality: EffectQuality,
}

#[derive(Debug, Clone, Default)]
pub struct PerformanceMonitor {
    window_start: Option<Millis>,
    frames: u32,
    quality: EffectQuality,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quality(&self) -> EffectQuality {
        self.quality
    }

    /// Record a frame presented at `now`
    ///
    /// Returns a sample whenever a window of at least [`WINDOW_MS`] closes.
    pub fn frame(&mut self, now: Millis) -> Option<FpsSample> {
        let start = *self.window_start.get_or_insert(now);
        self.frames += 1;

        let elapsed = now.saturating_sub(start);
        if elapsed < WINDOW_MS {
            return None;
        }

        let fps = ((self.frames as f64 * 1000.0) / elapsed as f64).round() as u32;
        let quality = EffectQuality::from_fps(fps);
        if quality != self.quality {
            info!("effect quality {} -> {} at {} fps", self.quality, quality, fps);
        }
        self.quality = quality;
        self.frames = 0;
        self.window_start = Some(now);

        Some(FpsSample { fps, quality })
    }
}
