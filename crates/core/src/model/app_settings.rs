use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AppSettingsError {
    #[error("unknown theme: {0}")]
    UnknownTheme(String),
}

/// Display theme preference persisted between sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = AppSettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(AppSettingsError::UnknownTheme(other.to_string())),
        }
    }
}

/// Persisted display preferences.
///
/// These live entirely outside the learning core; losing them never affects
/// session state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppSettings {
    theme: ThemeMode,
}

#[derive(Clone, Debug, Default)]
pub struct AppSettingsDraft {
    pub theme: Option<String>,
}

impl AppSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft into persisted settings.
    ///
    /// A missing theme falls back to the default.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsError` if the theme string is present but not a
    /// known mode.
    pub fn validate(self) -> Result<AppSettings, AppSettingsError> {
        let theme = match normalize_optional(self.theme) {
            Some(raw) => raw.parse::<ThemeMode>()?,
            None => ThemeMode::default(),
        };

        Ok(AppSettings { theme })
    }
}

impl AppSettings {
    #[must_use]
    pub fn new(theme: ThemeMode) -> Self {
        Self { theme }
    }

    /// Rehydrate settings from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsError` if the persisted theme is unknown.
    pub fn from_persisted(theme: Option<String>) -> Result<Self, AppSettingsError> {
        AppSettingsDraft { theme }.validate()
    }

    #[must_use]
    pub fn theme(&self) -> ThemeMode {
        self.theme
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_ascii_lowercase())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_theme_falls_back_to_light() {
        let settings = AppSettingsDraft::new().validate().unwrap();
        assert_eq!(settings.theme(), ThemeMode::Light);
    }

    #[test]
    fn theme_string_is_normalized() {
        let settings = AppSettings::from_persisted(Some("  Dark ".to_string())).unwrap();
        assert_eq!(settings.theme(), ThemeMode::Dark);
    }

    #[test]
    fn unknown_theme_is_rejected() {
        let err = AppSettings::from_persisted(Some("sepia".to_string())).unwrap_err();
        assert!(matches!(err, AppSettingsError::UnknownTheme(ref s) if s == "sepia"));
    }

    #[test]
    fn theme_roundtrips_through_str() {
        for theme in [ThemeMode::Light, ThemeMode::Dark] {
            assert_eq!(theme.as_str().parse::<ThemeMode>().unwrap(), theme);
        }
    }
}
