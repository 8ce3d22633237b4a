//! Skill bar fill

use crate::audio::SoundCue;
use crate::engine::{Millis, Stage, TimerEvent};

/// Delay between consecutive bars (ms)
pub const FILL_SPACING_MS: Millis = 200;

/// Empty every bar, then fill bar `i` to its level after `200 i` ms
pub fn start(stage: &mut Stage) {
    let levels = stage.page.skill_levels();
    for bar in 0..levels.len() {
        stage.page.set_skill_width(bar, 0);
        stage.after(bar as Millis * FILL_SPACING_MS, TimerEvent::SkillFill { bar });
    }
}

pub fn on_fill(stage: &mut Stage, bar: usize) {
    if let Some(level) = stage.page.skill_levels().get(bar).copied() {
        stage.page.set_skill_width(bar, level);
        stage.cue(SoundCue::SkillFill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stage::test_stage;
    use crate::page::{MemoryPage, PageLayout};

    #[test]
    fn test_bars_fill_in_order() {
        let layout = PageLayout {
            skills: vec![90, 60, 30],
            ..PageLayout::minimal()
        };
        let (mut stage, recorder) = test_stage(MemoryPage::new(layout));
        stage.page.set_skill_width(0, 90);
        start(&mut stage);
        assert_eq!(stage.page.skill_width(0), Some(0));

        let mut fills = Vec::new();
        while let Some(TimerEvent::SkillFill { bar }) = stage.timeline.pop_due(1000) {
            fills.push((stage.now(), bar));
            on_fill(&mut stage, bar);
        }

        assert_eq!(fills, vec![(0, 0), (200, 1), (400, 2)]);
        assert_eq!(stage.page.skill_width(2), Some(30));
        assert_eq!(recorder.len(), 3);
    }
}
