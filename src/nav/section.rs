//! Content sections

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PortfolioError;

/// One of the five content panels, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    About,
    Projects,
    Skills,
    Experience,
    Contact,
}

impl Section {
    /// All sections in declaration (keyboard) order
    pub const ALL: [Section; 5] = [
        Section::About,
        Section::Projects,
        Section::Skills,
        Section::Experience,
        Section::Contact,
    ];

    /// Position in [`Section::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The following section, wrapping from the last to the first
    pub fn next(self) -> Section {
        Section::ALL[(self.index() + 1) % Section::ALL.len()]
    }

    /// The preceding section, wrapping from the first to the last
    pub fn prev(self) -> Section {
        let len = Section::ALL.len();
        Section::ALL[(self.index() + len - 1) % len]
    }

    /// Element id of the section container (and `data-section` value of its
    /// menu entry)
    pub fn id(self) -> &'static str {
        match self {
            Section::About => "about",
            Section::Projects => "projects",
            Section::Skills => "skills",
            Section::Experience => "experience",
            Section::Contact => "contact",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Section {
    type Err = PortfolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|section| section.id() == s)
            .ok_or_else(|| PortfolioError::UnknownSection {
                name: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wraps() {
        assert_eq!(Section::About.next(), Section::Projects);
        assert_eq!(Section::Contact.next(), Section::About);
    }

    #[test]
    fn test_prev_wraps() {
        assert_eq!(Section::About.prev(), Section::Contact);
        assert_eq!(Section::Skills.prev(), Section::Projects);
    }

    #[test]
    fn test_full_cycle_returns_home() {
        let mut section = Section::About;
        for _ in 0..Section::ALL.len() {
            section = section.next();
        }
        assert_eq!(section, Section::About);
    }

    #[test]
    fn test_parse() {
        assert_eq!("experience".parse::<Section>().unwrap(), Section::Experience);
        assert!("blog".parse::<Section>().is_err());
    }
}
