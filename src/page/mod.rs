//! Page contract
//!
//! The [`Page`] trait is everything the presentation layer reads from or
//! writes to the document: section containers and menu entries, stat
//! counters, skill bars, project cards, decorative elements, the typing
//! line, the splash overlay, the contact form and notifications.
//!
//! Optional decorative elements may be absent; callers skip them. Section
//! containers are required for navigation.

mod memory;

pub use memory::{CounterSpec, MemoryPage, PageLayout};

use serde::{Deserialize, Serialize};

use crate::effects::EffectQuality;
use crate::engine::Millis;
use crate::form::ContactFields;
use crate::nav::Section;

/// Axis-aligned element bounds in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Handle of a transient element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

/// Kinds of self-removing decorative elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    UfoTrail,
    RandomUfo,
    AtmosphereParticle,
    PlanetParticle,
    Sparkle,
    BurstParticle,
}

/// A transient element appended to the page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub kind: ElementKind,
    /// Position in viewport pixels
    pub x: f64,
    pub y: f64,
    /// Where a burst particle flies to, if it moves
    pub target: Option<(f64, f64)>,
    /// How long the element lives before it is removed
    pub lifetime: Millis,
}

/// A background star
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Star {
    /// Horizontal position, percent of the viewport
    pub left: f64,
    /// Vertical position, percent of the viewport
    pub top: f64,
    /// Twinkle animation delay (s)
    pub delay: f64,
    /// Twinkle animation duration (s)
    pub duration: f64,
    /// Current parallax translation (px)
    pub offset: (f64, f64),
}

/// Animation applied to a section container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionAnimation {
    /// 300 ms fade out and lift
    FadeOut,
}

/// Display state of one project card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardState {
    pub visible: bool,
    /// Fade-in delay when the card is animating in
    pub fade_delay: Option<Millis>,
}

impl Default for CardState {
    fn default() -> Self {
        Self {
            visible: true,
            fade_delay: None,
        }
    }
}

/// Splash overlay lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplashState {
    #[default]
    Visible,
    FadingOut,
    Hidden,
}

/// Typing line lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TypingState {
    #[default]
    Idle,
    Typing,
    Complete,
}

/// Character classes of the typing line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CharClass {
    Letter,
    Space,
    Punctuation,
}

/// One revealed character of the typing line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedChar {
    pub ch: char,
    pub class: CharClass,
    /// Part of a highlighted keyword
    pub keyword: bool,
}

/// Colour scheme of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Palette {
    #[default]
    Standard,
    Rainbow,
}

/// Visual tone of the submit button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ButtonTone {
    #[default]
    Normal,
    Success,
    Failure,
}

/// Submit button state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    pub label: String,
    pub disabled: bool,
    pub tone: ButtonTone,
}

impl ButtonState {
    pub fn enabled(label: &str) -> Self {
        Self {
            label: label.to_string(),
            disabled: false,
            tone: ButtonTone::Normal,
        }
    }
}

/// Ambient mute button state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuteButtonState {
    pub label: String,
    pub muted: bool,
    /// Press animation running
    pub pressed: bool,
}

/// Kinds of on-screen notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// Handle of a visible notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

/// A transient on-screen message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
}

/// Document contract of the portfolio page
pub trait Page {
    // ------------------------------------------------------------------
    // Sections and menu
    // ------------------------------------------------------------------

    /// Whether the container `#<section>` exists
    fn has_section(&self, section: Section) -> bool;
    fn set_section_active(&mut self, section: Section, active: bool);
    fn is_section_active(&self, section: Section) -> bool;
    fn set_section_animation(&mut self, section: Section, animation: Option<SectionAnimation>);
    fn section_animation(&self, section: Section) -> Option<SectionAnimation>;
    /// Sections that have a menu entry, in document order
    fn menu_sections(&self) -> Vec<Section>;
    fn set_menu_active(&mut self, section: Section, active: bool);
    fn is_menu_active(&self, section: Section) -> bool;

    // ------------------------------------------------------------------
    // Stats, skills, projects
    // ------------------------------------------------------------------

    /// `data-target` of every stat counter
    fn counter_targets(&self) -> Vec<u32>;
    fn set_counter_value(&mut self, index: usize, value: u32, counting: bool);
    fn counter_value(&self, index: usize) -> Option<u32>;
    /// Bounds of the stat item around a counter
    fn counter_bounds(&self, index: usize) -> Option<Rect>;

    /// `data-level` of every skill bar (percent)
    fn skill_levels(&self) -> Vec<u8>;
    fn set_skill_width(&mut self, index: usize, width: u8);
    fn skill_width(&self, index: usize) -> Option<u8>;

    /// `data-category` of every project card
    fn project_categories(&self) -> Vec<String>;
    fn set_project_card(&mut self, index: usize, state: CardState);
    fn project_card(&self, index: usize) -> Option<CardState>;
    fn set_active_filter(&mut self, filter: &str);
    fn active_filter(&self) -> Option<String>;

    // ------------------------------------------------------------------
    // Decor
    // ------------------------------------------------------------------

    /// Viewport size in pixels
    fn viewport(&self) -> (f64, f64);
    fn ufo_bounds(&self) -> Vec<Rect>;
    fn planet_bounds(&self) -> Vec<Rect>;
    fn earth_bounds(&self) -> Option<Rect>;
    fn spawn(&mut self, element: Element) -> ElementId;
    /// Remove a transient element; false if it was already gone
    fn despawn(&mut self, id: ElementId) -> bool;
    fn elements(&self) -> Vec<(ElementId, Element)>;
    fn add_star(&mut self, star: Star);
    fn stars(&self) -> Vec<Star>;
    fn set_star_offset(&mut self, index: usize, offset: (f64, f64));
    fn set_effect_quality(&mut self, quality: EffectQuality);
    fn effect_quality(&self) -> EffectQuality;
    fn has_progress_bar(&self) -> bool;
    fn set_scroll_progress(&mut self, percent: f64);
    fn scroll_progress(&self) -> Option<f64>;
    fn set_palette(&mut self, palette: Palette);
    fn palette(&self) -> Palette;

    // ------------------------------------------------------------------
    // Typing line
    // ------------------------------------------------------------------

    /// Full text of the typing line, if the page has one
    fn typing_source(&self) -> Option<String>;
    fn set_typing_state(&mut self, state: TypingState);
    fn typing_state(&self) -> TypingState;
    fn push_typed_char(&mut self, ch: TypedChar);
    fn typed_chars(&self) -> Vec<TypedChar>;

    // ------------------------------------------------------------------
    // Splash
    // ------------------------------------------------------------------

    fn has_splash(&self) -> bool;
    fn set_splash(&mut self, state: SplashState);
    fn splash(&self) -> SplashState;
    fn set_content_visible(&mut self, visible: bool);
    fn content_visible(&self) -> bool;

    // ------------------------------------------------------------------
    // Contact form and mute button
    // ------------------------------------------------------------------

    fn form_fields(&self) -> ContactFields;
    fn set_form_fields(&mut self, fields: ContactFields);
    fn submit_button(&self) -> ButtonState;
    fn set_submit_button(&mut self, state: ButtonState);
    fn has_mute_button(&self) -> bool;
    fn set_mute_button(&mut self, state: MuteButtonState);
    fn mute_button(&self) -> Option<MuteButtonState>;

    // ------------------------------------------------------------------
    // Notifications
    // ------------------------------------------------------------------

    fn show_notification(&mut self, kind: NotificationKind, message: &str) -> NotificationId;
    /// Remove a notification; false if it was already gone
    fn dismiss_notification(&mut self, id: NotificationId) -> bool;
    fn notifications(&self) -> Vec<Notification>;
}
