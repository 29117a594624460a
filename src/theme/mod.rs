//! Theme preference handling.
//!
//! This module provides:
//!
//! - [`ThemePreference`]: The user's light/dark/system intent
//! - [`ResolvedTheme`]: The concrete light or dark theme that gets applied
//! - [`ThemeResolver`]: Loads, resolves, applies and persists the preference
//! - [`ResolverConfig`]: Storage key, markers and fallback preference

mod config;
mod preference;
mod resolver;

pub use config::{ResolverConfig, DEFAULT_STORAGE_KEY};
pub use preference::{ParsePreferenceError, ResolvedTheme, ThemePreference};
pub use resolver::ThemeResolver;
