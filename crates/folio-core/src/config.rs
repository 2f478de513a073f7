#![forbid(unsafe_code)]

//! Page behavior configuration.
//!
//! Every field has a default matching the shipped portfolio markup, so hosts
//! only override what differs. With the `serde` feature enabled the whole
//! tree deserializes from partial JSON.

use std::collections::HashSet;
use std::fmt;

use crate::theme::{ThemeSequence, ThemeSpec};

/// Configuration validation or parse failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The theme sequence has no entries.
    EmptyThemeSequence,
    /// Two theme entries share a name.
    DuplicateTheme(String),
    /// The preference storage key is empty.
    EmptyStorageKey,
    /// JSON input could not be decoded.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyThemeSequence => write!(f, "theme sequence must not be empty"),
            Self::DuplicateTheme(name) => write!(f, "duplicate theme name: {name}"),
            Self::EmptyStorageKey => write!(f, "theme storage key must not be empty"),
            Self::Parse(reason) => write!(f, "invalid config json: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Theme toggle configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThemeConfig {
    /// Key under which the explicit user choice is persisted.
    pub storage_key: String,
    /// Ordered theme sequence the toggle cycles through.
    pub themes: Vec<ThemeSpec>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "portfolio-theme".to_owned(),
            themes: vec![
                ThemeSpec::new("sunrise", "sunny-outline", "Sunrise"),
                ThemeSpec::new("twilight", "moon-outline", "Twilight"),
                ThemeSpec::new("aurora", "sparkles-outline", "Aurora"),
            ],
        }
    }
}

impl ThemeConfig {
    /// Validate and build the theme sequence.
    pub fn sequence(&self) -> Result<ThemeSequence, ConfigError> {
        if self.storage_key.is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        ThemeSequence::new(self.themes.clone())
    }
}

/// Project modal configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModalConfig {
    /// Alt text used when a card image carries none.
    pub fallback_alt: String,
    /// CSS custom property receiving the scrollbar width while locked.
    pub compensation_property: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            fallback_alt: "Project image".to_owned(),
            compensation_property: "--scrollbar-compensation".to_owned(),
        }
    }
}

/// Category filter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterConfig {
    /// Filter value that shows every item.
    pub all_value: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            all_value: "all".to_owned(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FolioConfig {
    /// Theme sequence and preference key.
    pub theme: ThemeConfig,
    /// Project modal text and scroll compensation.
    pub modal: ModalConfig,
    /// Category filter values.
    pub filter: FilterConfig,
}

impl FolioConfig {
    /// Check every invariant the controllers rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.theme.sequence().map(|_| ())
    }

    /// Decode a (possibly partial) JSON override and validate it.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

pub(crate) fn check_unique_names(themes: &[ThemeSpec]) -> Result<(), ConfigError> {
    let mut seen = HashSet::with_capacity(themes.len());
    for theme in themes {
        if !seen.insert(theme.name.as_str()) {
            return Err(ConfigError::DuplicateTheme(theme.name.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(FolioConfig::default().validate(), Ok(()));
    }

    #[test]
    fn empty_sequence_rejected() {
        let mut config = FolioConfig::default();
        config.theme.themes.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyThemeSequence));
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut config = FolioConfig::default();
        config
            .theme
            .themes
            .push(ThemeSpec::new("sunrise", "sunny", "Again"));
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateTheme("sunrise".to_owned()))
        );
    }

    #[test]
    fn empty_storage_key_rejected() {
        let mut config = FolioConfig::default();
        config.theme.storage_key.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyStorageKey));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_keeps_defaults() {
        let config = FolioConfig::from_json(r#"{"theme":{"storage_key":"site-theme"}}"#)
            .expect("partial config should parse");
        assert_eq!(config.theme.storage_key, "site-theme");
        assert_eq!(config.theme.themes.len(), 3);
        assert_eq!(config.modal, ModalConfig::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            FolioConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
