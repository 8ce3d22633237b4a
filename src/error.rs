//! Error handling for Starport
//!
//! Every failure the presentation layer can hit is a variant here, together
//! with a stable code, a recoverability flag and a user-facing message.

use std::path::PathBuf;

use thiserror::Error;

use crate::nav::Section;

/// Result type alias for Starport operations
pub type Result<T> = std::result::Result<T, PortfolioError>;

/// Main error type for Starport operations
#[derive(Error, Debug)]
pub enum PortfolioError {
    // Navigation Errors
    #[error("Section container not found: #{section}")]
    MissingSection { section: Section },

    #[error("Unknown section: {name}")]
    UnknownSection { name: String },

    // Audio Errors
    #[error("Invalid tone: {reason}")]
    InvalidTone { reason: String },

    #[error("Unknown sound cue: {name}")]
    UnknownCue { name: String },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    // Form Errors
    #[error("Required field is empty: {field}")]
    MissingField { field: &'static str },

    #[error("Email delivery failed: {reason}")]
    Delivery { reason: String },

    // Clipboard Errors
    #[error("Clipboard write failed: {reason}")]
    Clipboard { reason: String },

    // Configuration Errors
    #[error("Invalid configuration in {path}: {reason}")]
    InvalidConfig { path: PathBuf, reason: String },

    #[error("Preference store error for '{key}': {reason}")]
    Preference { key: String, reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Audio File Errors
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

impl PortfolioError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            PortfolioError::MissingSection { .. } => "MISSING_SECTION",
            PortfolioError::UnknownSection { .. } => "UNKNOWN_SECTION",
            PortfolioError::InvalidTone { .. } => "INVALID_TONE",
            PortfolioError::UnknownCue { .. } => "UNKNOWN_CUE",
            PortfolioError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            PortfolioError::MissingField { .. } => "MISSING_FIELD",
            PortfolioError::Delivery { .. } => "DELIVERY_FAILED",
            PortfolioError::Clipboard { .. } => "CLIPBOARD_FAILED",
            PortfolioError::InvalidConfig { .. } => "INVALID_CONFIG",
            PortfolioError::Preference { .. } => "PREFERENCE_ERROR",
            PortfolioError::Io(_) => "IO_ERROR",
            PortfolioError::Serialization(_) => "SERIALIZATION_ERROR",
            PortfolioError::Wav(_) => "WAV_ERROR",
        }
    }

    /// Check if this error is recovered locally (shown to the visitor
    /// instead of aborting the operation)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PortfolioError::MissingField { .. }
                | PortfolioError::Delivery { .. }
                | PortfolioError::Clipboard { .. }
                | PortfolioError::Preference { .. }
        )
    }

    /// Get a user-friendly message for this error
    ///
    /// These are the strings shown in on-screen notifications.
    pub fn friendly_message(&self) -> String {
        match self {
            PortfolioError::MissingField { .. } => "Please fill in all fields!".to_string(),
            PortfolioError::Delivery { .. } => {
                "Failed to send message. Please try again!".to_string()
            }
            PortfolioError::Clipboard { .. } => "Failed to copy".to_string(),
            _ => self.to_string(),
        }
    }
}
