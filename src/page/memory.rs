//! In-memory page
//!
//! A [`Page`] built from a serde-loadable [`PageLayout`]. Used by the CLI
//! simulator and by tests in place of a browser document.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    ButtonState, CardState, Element, ElementId, MuteButtonState, Notification, NotificationId,
    NotificationKind, Page, Palette, Rect, SectionAnimation, SplashState, Star, TypedChar,
    TypingState,
};
use crate::effects::EffectQuality;
use crate::error::{PortfolioError, Result};
use crate::form::ContactFields;
use crate::nav::Section;

/// A stat counter: its `data-target` and the bounds of its stat item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterSpec {
    pub target: u32,
    #[serde(default)]
    pub bounds: Rect,
}

/// Static description of which elements a page carries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    /// Section containers present in the document
    pub sections: Vec<Section>,
    /// Menu entries, in document order
    pub menu: Vec<Section>,
    pub counters: Vec<CounterSpec>,
    /// Skill levels (percent)
    pub skills: Vec<u8>,
    /// Project card categories
    pub projects: Vec<String>,
    pub ufos: Vec<Rect>,
    pub planets: Vec<Rect>,
    pub earth: Option<Rect>,
    pub viewport: (f64, f64),
    pub typing_text: Option<String>,
    pub splash: bool,
    pub mute_button: bool,
    pub progress_bar: bool,
    pub submit_label: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            sections: Section::ALL.to_vec(),
            menu: Section::ALL.to_vec(),
            counters: [50, 30, 5, 100]
                .iter()
                .enumerate()
                .map(|(i, &target)| CounterSpec {
                    target,
                    bounds: Rect::new(100.0 + i as f64 * 160.0, 400.0, 140.0, 90.0),
                })
                .collect(),
            skills: vec![90, 85, 80, 75, 70, 65],
            projects: ["web", "mobile", "web", "design"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ufos: vec![
                Rect::new(120.0, 80.0, 40.0, 20.0),
                Rect::new(620.0, 140.0, 40.0, 20.0),
                Rect::new(980.0, 60.0, 40.0, 20.0),
            ],
            planets: vec![
                Rect::new(60.0, 500.0, 50.0, 50.0),
                Rect::new(300.0, 620.0, 36.0, 36.0),
                Rect::new(1100.0, 420.0, 70.0, 70.0),
                Rect::new(880.0, 660.0, 30.0, 30.0),
            ],
            earth: Some(Rect::new(1040.0, 560.0, 120.0, 120.0)),
            viewport: (1280.0, 800.0),
            typing_text: Some(
                "Hello! I'm a developer building awesome, interactive solutions.".to_string(),
            ),
            splash: true,
            mute_button: true,
            progress_bar: true,
            submit_label: "Send Message".to_string(),
        }
    }
}

impl PageLayout {
    /// Only the section containers and menu; no optional decor
    pub fn minimal() -> Self {
        Self {
            sections: Section::ALL.to_vec(),
            menu: Section::ALL.to_vec(),
            counters: Vec::new(),
            skills: Vec::new(),
            projects: Vec::new(),
            ufos: Vec::new(),
            planets: Vec::new(),
            earth: None,
            viewport: (1280.0, 800.0),
            typing_text: None,
            splash: false,
            mute_button: false,
            progress_bar: false,
            submit_label: "Send Message".to_string(),
        }
    }

    /// Load a layout from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| PortfolioError::InvalidConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Document state held in plain collections
#[derive(Debug, Clone)]
pub struct MemoryPage {
    layout: PageLayout,
    active_sections: HashSet<Section>,
    animations: HashMap<Section, SectionAnimation>,
    active_menu: HashSet<Section>,
    counters: Vec<(u32, bool)>,
    skill_widths: Vec<u8>,
    cards: Vec<CardState>,
    filter: String,
    elements: BTreeMap<ElementId, Element>,
    next_element: u64,
    stars: Vec<Star>,
    quality: EffectQuality,
    progress: f64,
    palette: Palette,
    typing_state: TypingState,
    typed: Vec<TypedChar>,
    splash: SplashState,
    content_visible: bool,
    fields: ContactFields,
    button: ButtonState,
    mute: Option<MuteButtonState>,
    notifications: Vec<Notification>,
    next_notification: u64,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new(PageLayout::default())
    }
}

impl MemoryPage {
    /// Build the initial document: the About section and its menu entry are
    /// active, the splash (if any) covers the content.
    pub fn new(layout: PageLayout) -> Self {
        let mut active_sections = HashSet::new();
        if layout.sections.contains(&Section::About) {
            active_sections.insert(Section::About);
        }
        let mut active_menu = HashSet::new();
        if layout.menu.contains(&Section::About) {
            active_menu.insert(Section::About);
        }

        Self {
            active_sections,
            animations: HashMap::new(),
            active_menu,
            counters: vec![(0, false); layout.counters.len()],
            skill_widths: vec![0; layout.skills.len()],
            cards: vec![CardState::default(); layout.projects.len()],
            filter: "all".to_string(),
            elements: BTreeMap::new(),
            next_element: 0,
            stars: Vec::new(),
            quality: EffectQuality::default(),
            progress: 0.0,
            palette: Palette::default(),
            typing_state: TypingState::default(),
            typed: Vec::new(),
            splash: if layout.splash {
                SplashState::Visible
            } else {
                SplashState::Hidden
            },
            content_visible: !layout.splash,
            fields: ContactFields::default(),
            button: ButtonState::enabled(&layout.submit_label),
            mute: None,
            notifications: Vec::new(),
            next_notification: 0,
            layout,
        }
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// The typing line as currently revealed
    pub fn typed_text(&self) -> String {
        self.typed.iter().map(|c| c.ch).collect()
    }
}

impl Page for MemoryPage {
    fn has_section(&self, section: Section) -> bool {
        self.layout.sections.contains(&section)
    }

    fn set_section_active(&mut self, section: Section, active: bool) {
        if !self.has_section(section) {
            return;
        }
        if active {
            self.active_sections.insert(section);
        } else {
            self.active_sections.remove(&section);
        }
    }

    fn is_section_active(&self, section: Section) -> bool {
        self.active_sections.contains(&section)
    }

    fn set_section_animation(&mut self, section: Section, animation: Option<SectionAnimation>) {
        match animation {
            Some(animation) if self.has_section(section) => {
                self.animations.insert(section, animation);
            }
            _ => {
                self.animations.remove(&section);
            }
        }
    }

    fn section_animation(&self, section: Section) -> Option<SectionAnimation> {
        self.animations.get(&section).copied()
    }

    fn menu_sections(&self) -> Vec<Section> {
        self.layout.menu.clone()
    }

    fn set_menu_active(&mut self, section: Section, active: bool) {
        if !self.layout.menu.contains(&section) {
            return;
        }
        if active {
            self.active_menu.insert(section);
        } else {
            self.active_menu.remove(&section);
        }
    }

    fn is_menu_active(&self, section: Section) -> bool {
        self.active_menu.contains(&section)
    }

    fn counter_targets(&self) -> Vec<u32> {
        self.layout.counters.iter().map(|c| c.target).collect()
    }

    fn set_counter_value(&mut self, index: usize, value: u32, counting: bool) {
        if let Some(slot) = self.counters.get_mut(index) {
            *slot = (value, counting);
        }
    }

    fn counter_value(&self, index: usize) -> Option<u32> {
        self.counters.get(index).map(|(value, _)| *value)
    }

    fn counter_bounds(&self, index: usize) -> Option<Rect> {
        self.layout.counters.get(index).map(|c| c.bounds)
    }

    fn skill_levels(&self) -> Vec<u8> {
        self.layout.skills.clone()
    }

    fn set_skill_width(&mut self, index: usize, width: u8) {
        if let Some(slot) = self.skill_widths.get_mut(index) {
            *slot = width;
        }
    }

    fn skill_width(&self, index: usize) -> Option<u8> {
        self.skill_widths.get(index).copied()
    }

    fn project_categories(&self) -> Vec<String> {
        self.layout.projects.clone()
    }

    fn set_project_card(&mut self, index: usize, state: CardState) {
        if let Some(slot) = self.cards.get_mut(index) {
            *slot = state;
        }
    }

    fn project_card(&self, index: usize) -> Option<CardState> {
        self.cards.get(index).copied()
    }

    fn set_active_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
    }

    fn active_filter(&self) -> Option<String> {
        if self.layout.projects.is_empty() {
            None
        } else {
            Some(self.filter.clone())
        }
    }

    fn viewport(&self) -> (f64, f64) {
        self.layout.viewport
    }

    fn ufo_bounds(&self) -> Vec<Rect> {
        self.layout.ufos.clone()
    }

    fn planet_bounds(&self) -> Vec<Rect> {
        self.layout.planets.clone()
    }

    fn earth_bounds(&self) -> Option<Rect> {
        self.layout.earth
    }

    fn spawn(&mut self, element: Element) -> ElementId {
        let id = ElementId(self.next_element);
        self.next_element += 1;
        self.elements.insert(id, element);
        id
    }

    fn despawn(&mut self, id: ElementId) -> bool {
        self.elements.remove(&id).is_some()
    }

    fn elements(&self) -> Vec<(ElementId, Element)> {
        self.elements.iter().map(|(id, el)| (*id, *el)).collect()
    }

    fn add_star(&mut self, star: Star) {
        self.stars.push(star);
    }

    fn stars(&self) -> Vec<Star> {
        self.stars.clone()
    }

    fn set_star_offset(&mut self, index: usize, offset: (f64, f64)) {
        if let Some(star) = self.stars.get_mut(index) {
            star.offset = offset;
        }
    }

    fn set_effect_quality(&mut self, quality: EffectQuality) {
        self.quality = quality;
    }

    fn effect_quality(&self) -> EffectQuality {
        self.quality
    }

    fn has_progress_bar(&self) -> bool {
        self.layout.progress_bar
    }

    fn set_scroll_progress(&mut self, percent: f64) {
        if self.layout.progress_bar {
            self.progress = percent;
        }
    }

    fn scroll_progress(&self) -> Option<f64> {
        self.layout.progress_bar.then_some(self.progress)
    }

    fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    fn palette(&self) -> Palette {
        self.palette
    }

    fn typing_source(&self) -> Option<String> {
        self.layout.typing_text.clone()
    }

    fn set_typing_state(&mut self, state: TypingState) {
        if state == TypingState::Typing {
            self.typed.clear();
        }
        self.typing_state = state;
    }

    fn typing_state(&self) -> TypingState {
        self.typing_state
    }

    fn push_typed_char(&mut self, ch: TypedChar) {
        self.typed.push(ch);
    }

    fn typed_chars(&self) -> Vec<TypedChar> {
        self.typed.clone()
    }

    fn has_splash(&self) -> bool {
        self.layout.splash
    }

    fn set_splash(&mut self, state: SplashState) {
        if self.layout.splash {
            self.splash = state;
        }
    }

    fn splash(&self) -> SplashState {
        self.splash
    }

    fn set_content_visible(&mut self, visible: bool) {
        self.content_visible = visible;
    }

    fn content_visible(&self) -> bool {
        self.content_visible
    }

    fn form_fields(&self) -> ContactFields {
        self.fields.clone()
    }

    fn set_form_fields(&mut self, fields: ContactFields) {
        self.fields = fields;
    }

    fn submit_button(&self) -> ButtonState {
        self.button.clone()
    }

    fn set_submit_button(&mut self, state: ButtonState) {
        self.button = state;
    }

    fn has_mute_button(&self) -> bool {
        self.layout.mute_button
    }

    fn set_mute_button(&mut self, state: MuteButtonState) {
        if self.layout.mute_button {
            self.mute = Some(state);
        }
    }

    fn mute_button(&self) -> Option<MuteButtonState> {
        self.mute.clone()
    }

    fn show_notification(&mut self, kind: NotificationKind, message: &str) -> NotificationId {
        let id = NotificationId(self.next_notification);
        self.next_notification += 1;
        self.notifications.push(Notification {
            id,
            kind,
            message: message.to_string(),
        });
        id
    }

    fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|n| n.id != id);
        self.notifications.len() != before
    }

    fn notifications(&self) -> Vec<Notification> {
        self.notifications.clone()
    }
}
