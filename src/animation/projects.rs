//! Project cards: staggered entrance and category filter

use log::debug;

use crate::audio::SoundCue;
use crate::engine::{Millis, Stage};
use crate::page::CardState;

/// Entrance delay step between cards (ms)
pub const CARD_SPACING_MS: Millis = 100;

/// Filter value that shows every card
pub const ALL: &str = "all";

/// Fade every visible card in, card `i` delayed by `0.1 i` s
pub fn animate_cards(stage: &mut Stage) {
    let count = stage.page.project_categories().len();
    for index in 0..count {
        let visible = stage
            .page
            .project_card(index)
            .map_or(true, |card| card.visible);
        stage.page.set_project_card(
            index,
            CardState {
                visible,
                fade_delay: Some(index as Millis * CARD_SPACING_MS),
            },
        );
    }
}

/// Show only cards of `filter` (or all), re-running the entrance on the
/// survivors
///
/// Returns the number of visible cards.
pub fn apply_filter(stage: &mut Stage, filter: &str) -> usize {
    stage.cue(SoundCue::FilterClick);
    stage.page.set_active_filter(filter);

    let mut shown = 0;
    for (index, category) in stage.page.project_categories().iter().enumerate() {
        let visible = filter == ALL || category == filter;
        if visible {
            shown += 1;
        }
        stage.page.set_project_card(
            index,
            CardState {
                visible,
                fade_delay: visible.then_some(index as Millis * CARD_SPACING_MS),
            },
        );
    }
    debug!("filter '{}' shows {} cards", filter, shown);
    shown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::stage::test_stage;
    use crate::page::MemoryPage;

    #[test]
    fn test_entrance_delays() {
        let (mut stage, _) = test_stage(MemoryPage::default());
        animate_cards(&mut stage);

        let delays: Vec<Option<Millis>> = (0..4)
            .map(|i| stage.page.project_card(i).unwrap().fade_delay)
            .collect();
        assert_eq!(delays, vec![Some(0), Some(100), Some(200), Some(300)]);
    }

    #[test]
    fn test_filter_by_category() {
        let (mut stage, recorder) = test_stage(MemoryPage::default());

        assert_eq!(apply_filter(&mut stage, "web"), 2);
        assert!(stage.page.project_card(0).unwrap().visible);
        assert!(!stage.page.project_card(1).unwrap().visible);
        assert_eq!(stage.page.project_card(1).unwrap().fade_delay, None);
        assert_eq!(stage.page.active_filter().as_deref(), Some("web"));
        assert_eq!(recorder.len(), 1);

        assert_eq!(apply_filter(&mut stage, ALL), 4);
        assert_eq!(apply_filter(&mut stage, "games"), 0);
    }
}
