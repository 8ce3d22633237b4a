//! Navigation Tests
//!
//! Section transitions driven through the public app surface.

mod common;

use pretty_assertions::assert_eq;

use common::{entered, VisitBuilder};
use starport::app::UiEvent;
use starport::page::{ElementKind, PageLayout, SectionAnimation};
use starport::Section;

fn key(code: &str) -> UiEvent {
    UiEvent::Key {
        code: code.to_string(),
    }
}

#[test]
fn test_reentrant_navigation_is_ignored() {
    let mut visit = entered(VisitBuilder::new().layout(PageLayout::minimal()));

    visit
        .app
        .handle(UiEvent::MenuClick {
            section: Section::Skills,
        })
        .unwrap();

    // Every further request inside the 600ms window changes nothing
    for (elapsed, target) in [(0, Section::Projects), (299, Section::Contact), (150, Section::About)] {
        visit.app.advance(elapsed);
        visit
            .app
            .handle(UiEvent::MenuClick { section: target })
            .unwrap();
        assert!(visit.app.state().navigation.is_animating);
    }
    assert!(visit.app.page().is_menu_active(Section::Skills));

    visit.app.advance(600 - 449);
    let state = visit.app.state();
    assert_eq!(state.navigation.current, Section::Skills);
    assert!(!state.navigation.is_animating);
    assert!(visit.app.page().is_section_active(Section::Skills));
    assert!(!visit.app.page().is_section_active(Section::About));
}

#[test]
fn test_hide_then_show_sequence() {
    let mut visit = entered(VisitBuilder::new().layout(PageLayout::minimal()));
    visit
        .app
        .handle(UiEvent::MenuClick {
            section: Section::Contact,
        })
        .unwrap();

    assert_eq!(
        visit.app.page().section_animation(Section::About),
        Some(SectionAnimation::FadeOut)
    );
    assert!(visit.app.page().is_section_active(Section::About));

    visit.app.advance(300);
    assert_eq!(visit.app.page().section_animation(Section::About), None);
    assert!(visit.app.page().is_section_active(Section::Contact));
    assert!(visit.app.state().navigation.is_animating);

    visit.app.advance(300);
    assert!(!visit.app.state().navigation.is_animating);
}

#[test]
fn test_keyboard_wraps_both_ends() {
    let mut visit = entered(VisitBuilder::new().layout(PageLayout::minimal()));

    visit.app.handle(key("ArrowLeft")).unwrap();
    visit.app.advance(600);
    assert_eq!(visit.app.state().navigation.current, Section::Contact);

    visit.app.handle(key("ArrowDown")).unwrap();
    visit.app.advance(600);
    assert_eq!(visit.app.state().navigation.current, Section::About);

    visit.app.handle(key("ArrowUp")).unwrap();
    visit.app.advance(600);
    assert_eq!(visit.app.state().navigation.current, Section::Contact);

    visit.app.handle(key("ArrowRight")).unwrap();
    visit.app.advance(600);
    assert_eq!(visit.app.state().navigation.current, Section::About);
}

#[test]
fn test_keys_during_transition_are_dropped() {
    let mut visit = entered(VisitBuilder::new().layout(PageLayout::minimal()));

    visit.app.handle(key("ArrowRight")).unwrap();
    visit.app.handle(key("ArrowRight")).unwrap();
    visit.app.handle(key("ArrowRight")).unwrap();
    visit.app.advance(600);

    // Only the first press is honoured while a transition is in flight
    assert_eq!(visit.app.state().navigation.current, Section::Projects);
    for section in Section::ALL {
        assert_eq!(
            visit.app.page().is_menu_active(section),
            section == Section::Projects
        );
    }
}

#[test]
fn test_missing_section_is_an_error_without_side_effects() {
    let mut layout = PageLayout::minimal();
    layout.sections.retain(|s| *s != Section::Projects);
    let mut visit = entered(VisitBuilder::new().layout(layout));

    let err = visit
        .app
        .handle(UiEvent::MenuClick {
            section: Section::Projects,
        })
        .unwrap_err();
    assert_eq!(err.error_code(), "MISSING_SECTION");

    let state = visit.app.state();
    assert_eq!(state.navigation.current, Section::About);
    assert!(!state.navigation.is_animating);
    assert!(visit.app.page().is_menu_active(Section::About));
}

#[test]
fn test_entering_skills_fills_bars() {
    let mut visit = entered(VisitBuilder::new());
    visit
        .app
        .handle(UiEvent::MenuClick {
            section: Section::Skills,
        })
        .unwrap();
    visit.app.advance(300);

    let levels = visit.app.page().skill_levels();
    assert_eq!(visit.app.page().skill_width(0), Some(levels[0]));
    assert_eq!(visit.app.page().skill_width(1), Some(0));
    visit.app.advance(5 * 200);
    for (i, level) in levels.iter().enumerate() {
        assert_eq!(visit.app.page().skill_width(i), Some(*level));
    }
}

#[test]
fn test_returning_to_about_replays_counters_quietly() {
    let mut visit = entered(VisitBuilder::new());
    visit.app.advance(5000);

    for section in [Section::Projects, Section::About] {
        visit.app.handle(UiEvent::MenuClick { section }).unwrap();
        visit.app.advance(600);
    }
    let targets = visit.app.page().counter_targets();
    assert!(visit.app.page().counter_value(0).unwrap() < targets[0]);

    let sparkled = (0..30).any(|_| {
        visit.app.advance(100);
        visit
            .app
            .page()
            .elements()
            .iter()
            .any(|(_, e)| e.kind == ElementKind::Sparkle)
    });
    assert!(!sparkled);

    for (i, target) in targets.iter().enumerate() {
        assert_eq!(visit.app.page().counter_value(i), Some(*target));
    }
}
