//! Sound cue catalog
//!
//! Every UI sound on the page is a named cue with fixed tone parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::tone::{ToneGraph, ToneRequest};
use super::voices::{self, Voicing};
use crate::error::PortfolioError;

/// Named UI sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundCue {
    // Typing
    Type,
    Space,
    Punctuation,
    // Navigation
    NavHover,
    NavClick,
    SectionChange,
    // Buttons
    ButtonHover,
    ButtonClick,
    ButtonSuccess,
    // Counters
    CounterTick,
    CounterComplete,
    // Skills
    SkillHover,
    SkillFill,
    // Projects
    ProjectHover,
    FilterClick,
    // Form
    InputFocus,
    FormSubmit,
    // Decor
    StarTwinkle,
    LoadingTick,
    LoadingComplete,
    UfoEngine,
    UfoBeam,
    UfoPass,
    EarthRotate,
    Invasion,
    // Planets
    PlanetHover,
    PlanetRotate,
    SaturnRings,
    // Experience
    TimelineHover,
    TimelineClick,
    StatCardHover,
    AchievementHover,
    // Contact
    ContactHover,
    CopyClick,
}

impl SoundCue {
    pub const ALL: [SoundCue; 34] = [
        SoundCue::Type,
        SoundCue::Space,
        SoundCue::Punctuation,
        SoundCue::NavHover,
        SoundCue::NavClick,
        SoundCue::SectionChange,
        SoundCue::ButtonHover,
        SoundCue::ButtonClick,
        SoundCue::ButtonSuccess,
        SoundCue::CounterTick,
        SoundCue::CounterComplete,
        SoundCue::SkillHover,
        SoundCue::SkillFill,
        SoundCue::ProjectHover,
        SoundCue::FilterClick,
        SoundCue::InputFocus,
        SoundCue::FormSubmit,
        SoundCue::StarTwinkle,
        SoundCue::LoadingTick,
        SoundCue::LoadingComplete,
        SoundCue::UfoEngine,
        SoundCue::UfoBeam,
        SoundCue::UfoPass,
        SoundCue::EarthRotate,
        SoundCue::Invasion,
        SoundCue::PlanetHover,
        SoundCue::PlanetRotate,
        SoundCue::SaturnRings,
        SoundCue::TimelineHover,
        SoundCue::TimelineClick,
        SoundCue::StatCardHover,
        SoundCue::AchievementHover,
        SoundCue::ContactHover,
        SoundCue::CopyClick,
    ];

    /// Tone parameters for single-tone cues; `None` for chords
    pub fn tone(self) -> Option<ToneRequest> {
        let (start, end, volume, duration) = match self {
            SoundCue::Type => (800.0, 600.0, 0.015, 0.05),
            SoundCue::Space => (400.0, 300.0, 0.01, 0.1),
            SoundCue::Punctuation => (1000.0, 800.0, 0.02, 0.08),
            SoundCue::NavHover => (600.0, 500.0, 0.01, 0.1),
            SoundCue::NavClick => (800.0, 600.0, 0.015, 0.15),
            SoundCue::SectionChange => (400.0, 300.0, 0.025, 0.3),
            SoundCue::ButtonHover => (500.0, 400.0, 0.008, 0.08),
            SoundCue::ButtonClick => (700.0, 500.0, 0.012, 0.12),
            SoundCue::CounterTick => (300.0, 250.0, 0.008, 0.05),
            SoundCue::CounterComplete => (600.0, 400.0, 0.02, 0.2),
            SoundCue::SkillHover => (450.0, 350.0, 0.008, 0.06),
            SoundCue::SkillFill => (350.0, 300.0, 0.01, 0.1),
            SoundCue::ProjectHover => (550.0, 450.0, 0.008, 0.07),
            SoundCue::FilterClick => (650.0, 550.0, 0.01, 0.1),
            SoundCue::InputFocus => (350.0, 300.0, 0.005, 0.06),
            SoundCue::FormSubmit => (500.0, 400.0, 0.012, 0.2),
            SoundCue::StarTwinkle => (800.0, 600.0, 0.005, 0.1),
            SoundCue::LoadingTick => (200.0, 150.0, 0.005, 0.03),
            SoundCue::LoadingComplete => (800.0, 600.0, 0.025, 0.4),
            SoundCue::UfoEngine => (200.0, 150.0, 0.008, 0.2),
            SoundCue::UfoBeam => (800.0, 600.0, 0.01, 0.3),
            SoundCue::UfoPass => (400.0, 300.0, 0.015, 0.5),
            SoundCue::EarthRotate => (100.0, 80.0, 0.005, 0.1),
            SoundCue::PlanetHover => (300.0, 250.0, 0.01, 0.2),
            SoundCue::PlanetRotate => (150.0, 120.0, 0.008, 0.15),
            SoundCue::SaturnRings => (400.0, 350.0, 0.008, 0.3),
            SoundCue::TimelineHover => (450.0, 350.0, 0.008, 0.1),
            SoundCue::TimelineClick => (600.0, 500.0, 0.012, 0.15),
            SoundCue::StatCardHover => (350.0, 300.0, 0.006, 0.08),
            SoundCue::AchievementHover => (500.0, 400.0, 0.008, 0.1),
            SoundCue::ContactHover => (400.0, 300.0, 0.006, 0.08),
            SoundCue::CopyClick => (600.0, 500.0, 0.01, 0.12),
            SoundCue::ButtonSuccess | SoundCue::Invasion => return None,
        };
        Some(ToneRequest::unchecked(start, end, volume, duration))
    }

    /// Build the cue
    pub fn voicing(self) -> Voicing {
        match self {
            SoundCue::ButtonSuccess => Voicing::Sequence(voices::success_chord()),
            SoundCue::Invasion => Voicing::Sequence(voices::invasion()),
            cue => match cue.tone() {
                Some(request) => Voicing::Single(ToneGraph::from_request(&request)),
                None => Voicing::Sequence(Vec::new()),
            },
        }
    }

    /// Kebab-case name used on the command line and in scripts
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Type => "type",
            SoundCue::Space => "space",
            SoundCue::Punctuation => "punctuation",
            SoundCue::NavHover => "nav-hover",
            SoundCue::NavClick => "nav-click",
            SoundCue::SectionChange => "section-change",
            SoundCue::ButtonHover => "button-hover",
            SoundCue::ButtonClick => "button-click",
            SoundCue::ButtonSuccess => "button-success",
            SoundCue::CounterTick => "counter-tick",
            SoundCue::CounterComplete => "counter-complete",
            SoundCue::SkillHover => "skill-hover",
            SoundCue::SkillFill => "skill-fill",
            SoundCue::ProjectHover => "project-hover",
            SoundCue::FilterClick => "filter-click",
            SoundCue::InputFocus => "input-focus",
            SoundCue::FormSubmit => "form-submit",
            SoundCue::StarTwinkle => "star-twinkle",
            SoundCue::LoadingTick => "loading-tick",
            SoundCue::LoadingComplete => "loading-complete",
            SoundCue::UfoEngine => "ufo-engine",
            SoundCue::UfoBeam => "ufo-beam",
            SoundCue::UfoPass => "ufo-pass",
            SoundCue::EarthRotate => "earth-rotate",
            SoundCue::Invasion => "invasion",
            SoundCue::PlanetHover => "planet-hover",
            SoundCue::PlanetRotate => "planet-rotate",
            SoundCue::SaturnRings => "saturn-rings",
            SoundCue::TimelineHover => "timeline-hover",
            SoundCue::TimelineClick => "timeline-click",
            SoundCue::StatCardHover => "stat-card-hover",
            SoundCue::AchievementHover => "achievement-hover",
            SoundCue::ContactHover => "contact-hover",
            SoundCue::CopyClick => "copy-click",
        }
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SoundCue {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoundCue::ALL
            .into_iter()
            .find(|cue| cue.name() == s)
            .ok_or_else(|| PortfolioError::UnknownCue {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_tones_are_valid() {
        for cue in SoundCue::ALL {
            if let Some(request) = cue.tone() {
                assert!(request.validate().is_ok(), "{} has invalid tone", cue);
            }
        }
    }

    #[test]
    fn test_chords_have_no_single_tone() {
        assert!(SoundCue::ButtonSuccess.tone().is_none());
        assert!(matches!(
            SoundCue::ButtonSuccess.voicing(),
            Voicing::Sequence(tones) if tones.len() == 4
        ));
        assert!(matches!(
            SoundCue::Invasion.voicing(),
            Voicing::Sequence(tones) if tones.len() == 5
        ));
    }

    #[test]
    fn test_later_definitions_win() {
        let focus = SoundCue::InputFocus.tone().unwrap();
        assert_eq!((focus.start_freq, focus.volume), (350.0, 0.005));

        let submit = SoundCue::FormSubmit.tone().unwrap();
        assert_eq!(submit.volume, 0.012);
    }

    #[test]
    fn test_names_parse_back() {
        for cue in SoundCue::ALL {
            assert_eq!(cue.name().parse::<SoundCue>().unwrap(), cue);
        }
        let err = "laser".parse::<SoundCue>().unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_CUE");
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&SoundCue::SectionChange).unwrap();
        assert_eq!(json, "\"section-change\"");
    }
}
