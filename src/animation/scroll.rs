//! Scroll progress bar

use crate::audio::SoundCue;
use crate::engine::{Millis, Stage};

/// Minimum gap between two loading ticks (ms)
pub const TICK_GAP_MS: Millis = 100;

#[derive(Debug, Clone, Default)]
pub struct ScrollProgress {
    last_tick: Option<Millis>,
}

impl ScrollProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the bar for a scroll to `offset` out of `max_offset` pixels
    ///
    /// Returns the new percentage, or `None` when the page has no bar.
    pub fn on_scroll(&mut self, stage: &mut Stage, offset: f64, max_offset: f64) -> Option<f64> {
        if !stage.page.has_progress_bar() {
            return None;
        }
        let percent = if max_offset > 0.0 {
            (offset / max_offset * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        stage.page.set_scroll_progress(percent);

        let now = stage.now();
        let due = self
            .last_tick
            .map_or(true, |last| now.saturating_sub(last) > TICK_GAP_MS);
        if due {
            stage.cue(SoundCue::LoadingTick);
            self.last_tick = Some(now);
        }
        Some(percent)
    }
}
