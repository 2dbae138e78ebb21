//! Transliteration options, optionally loaded from TOML.
//!
//! - [`Options::default`] matches the embedded `default_settings.toml`
//! - [`parse_settings_toml`] validates a custom TOML document
//! - [`Settings::load`] reads one from disk

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TransliterationError;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read settings: {0}")]
    Io(#[from] io::Error),
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Knobs of the EPA pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Voiceless alveolar fricative marker (rules X and VAF).
    pub vaf: char,
    /// Voiceless velar fricative marker (rule GJ).
    pub vvf: char,
    /// Shield URLs, mentions, hashtags and Roman numerals.
    pub escape_links: bool,
    /// Emit the text after every rule as a DEBUG event.
    pub debug: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            vaf: 'ç',
            vvf: 'h',
            escape_links: false,
            debug: false,
        }
    }
}

impl Options {
    /// Reject marker characters the pipeline cannot carry. ASCII digits are
    /// reserved for link placeholders.
    pub fn validate(&self) -> Result<(), TransliterationError> {
        check_marker("vaf", self.vaf)?;
        check_marker("vvf", self.vvf)
    }
}

fn check_marker(field: &'static str, c: char) -> Result<(), TransliterationError> {
    let reason = if c.is_control() {
        "must be printable"
    } else if c.is_whitespace() {
        "must not be whitespace"
    } else if c.is_ascii_digit() {
        "must not be an ASCII digit"
    } else {
        return Ok(());
    };
    Err(TransliterationError::InvalidOption {
        field,
        reason: reason.to_string(),
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub epa: Options,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Settings, SettingsError> {
        let content = fs::read_to_string(path)?;
        parse_settings_toml(&content)
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    s.epa.validate().map_err(|e| match e {
        TransliterationError::InvalidOption { field, reason } => SettingsError::InvalidValue {
            field: format!("epa.{field}"),
            reason,
        },
        other => SettingsError::InvalidValue {
            field: "epa".to_string(),
            reason: other.to_string(),
        },
    })?;
    Ok(s)
}
