//! The light/dark preference value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The user's light/dark appearance selection.
///
/// The textual form (`"light"` / `"dark"`) is what gets persisted, applied as
/// the root class and used as the color-scheme hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    /// Both preferences, light first.
    pub const ALL: [ThemePreference; 2] = [ThemePreference::Light, ThemePreference::Dark];

    /// Returns the persisted / class / hint string.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
        }
    }

    /// Returns the other preference.
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::Light,
        }
    }

    /// Parses a stored value, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` for anything that is not `light` or `dark`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("light") {
            Some(ThemePreference::Light)
        } else if value.eq_ignore_ascii_case("dark") {
            Some(ThemePreference::Dark)
        } else {
            None
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown preference string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme preference '{0}' (expected 'light' or 'dark')")]
pub struct ParsePreferenceError(pub String);

impl FromStr for ThemePreference {
    type Err = ParsePreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParsePreferenceError(s.to_string()))
    }
}
