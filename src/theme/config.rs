//! Resolver configuration.

use serde::Deserialize;

use super::preference::{ResolvedTheme, ThemePreference};

/// Store key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "theme";

/// Settings for a [`ThemeResolver`](super::ThemeResolver).
///
/// Every field has a default, so a partial config file deserializes cleanly.
///
/// # Example
///
/// ```rust
/// use tonality::{ResolverConfig, ThemePreference};
///
/// let config = ResolverConfig::new()
///     .storage_key("app.theme")
///     .classes("theme-light", "theme-dark")
///     .default_preference(ThemePreference::Dark);
///
/// assert_eq!(config.storage_key, "app.theme");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Key the raw preference is stored under.
    pub storage_key: String,
    /// Marker applied to the style target for the light theme.
    pub light_class: String,
    /// Marker applied to the style target for the dark theme.
    pub dark_class: String,
    /// Preference used when nothing valid is persisted.
    pub default_preference: ThemePreference,
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Sets the light and dark markers.
    pub fn classes(mut self, light: impl Into<String>, dark: impl Into<String>) -> Self {
        self.light_class = light.into();
        self.dark_class = dark.into();
        self
    }

    pub fn default_preference(mut self, preference: ThemePreference) -> Self {
        self.default_preference = preference;
        self
    }

    /// The marker that represents `theme` on the style target.
    pub fn class_for(&self, theme: ResolvedTheme) -> &str {
        match theme {
            ResolvedTheme::Light => &self.light_class,
            ResolvedTheme::Dark => &self.dark_class,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            light_class: ResolvedTheme::Light.as_str().to_string(),
            dark_class: ResolvedTheme::Dark.as_str().to_string(),
            default_preference: ThemePreference::System,
        }
    }
}
