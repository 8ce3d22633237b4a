//! Application configuration
//!
//! Every timing constant, the email account ids and the ambient-layer
//! settings live here. Defaults match the stock page; a JSON file may
//! override any subset of fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::Millis;
use crate::error::{PortfolioError, Result};

/// Timer lengths (ms)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Outgoing section fade
    pub hide_ms: Millis,
    /// Incoming section entrance
    pub show_ms: Millis,
    /// Splash fade before the page comes alive
    pub splash_fade_ms: Millis,
    pub notification_ms: Millis,
    /// Submit button label restore after a send
    pub form_restore_ms: Millis,
    pub mute_press_ms: Millis,
    /// Easter-egg palette duration
    pub palette_ms: Millis,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            hide_ms: 300,
            show_ms: 300,
            splash_fade_ms: 800,
            notification_ms: 3000,
            form_restore_ms: 2000,
            mute_press_ms: 200,
            palette_ms: 3000,
        }
    }
}

/// Email account used by the contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailSettings {
    pub service_id: String,
    pub template_id: String,
    /// Recipient name placed in every payload
    pub to_name: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            service_id: "YOUR_SERVICE_ID".to_string(),
            template_id: "YOUR_TEMPLATE_ID".to_string(),
            to_name: "Your Name".to_string(),
        }
    }
}

/// Ambient layer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientConfig {
    /// Play the shaped ambient voices instead of the plain cues
    pub voiced: bool,
    pub star_count: usize,
    /// Chance that a twinkle tick makes a sound
    pub twinkle_chance: f64,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            voiced: false,
            star_count: 100,
            twinkle_chance: 0.1,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub timing: TimingConfig,
    pub email: EmailSettings,
    pub ambient: AmbientConfig,
    /// Preference key of the ambient mute flag
    pub preference_key: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            email: EmailSettings::default(),
            ambient: AmbientConfig::default(),
            preference_key: "ufoSoundMuted".to_string(),
        }
    }
}

impl AppConfig {
    /// Load a configuration file; missing fields take their defaults
    ///
    /// # Errors
    /// * `Io` - the file cannot be read
    /// * `InvalidConfig` - the file is not valid JSON for this shape, or a
    ///   value is out of range
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: AppConfig =
            serde_json::from_str(&text).map_err(|e| PortfolioError::InvalidConfig {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if !(0.0..=1.0).contains(&config.ambient.twinkle_chance) {
            return Err(PortfolioError::InvalidConfig {
                path: path.to_path_buf(),
                reason: format!(
                    "twinkle_chance must be within 0..=1, got {}",
                    config.ambient.twinkle_chance
                ),
            });
        }
        Ok(config)
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
