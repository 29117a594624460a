//! # Tonality - persisted light/dark/system theme resolution
//!
//! Tonality keeps a document's light or dark styling in line with what the
//! user asked for. The user picks one of three [`ThemePreference`]s:
//!
//! - `light` or `dark` apply as-is
//! - `system` follows the environment's color-scheme signal, and keeps
//!   following it as it changes
//!
//! The raw preference (never the resolved theme) is persisted, so a
//! `system` choice keeps tracking the OS across restarts.
//!
//! ## Seams
//!
//! The resolver touches nothing global. The host supplies three pieces:
//!
//! - a [`PreferenceStore`] ([`MemoryStore`], [`FileStore`], or its own)
//! - a [`ColorSchemeSignal`] ([`OsSignal`], [`ManualSignal`], or its own)
//! - a [`StyleTarget`] for the root markers ([`ClassList`], or its own)
//!
//! ## Quick Start
//!
//! ```rust
//! use tonality::{
//!     ClassList, ManualSignal, MemoryStore, PreferenceStore, ThemePreference, ThemeResolver,
//! };
//!
//! let store = MemoryStore::new();
//! let signal = ManualSignal::new(false);
//! let root = ClassList::new();
//!
//! let mut resolver = ThemeResolver::new(store.clone(), signal.clone(), root.clone());
//! assert_eq!(root.classes(), vec!["light"]);
//!
//! // Following the system: a signal change is applied without any call.
//! signal.set_dark(true);
//! assert_eq!(root.classes(), vec!["dark"]);
//!
//! resolver.set_theme(ThemePreference::Light);
//! assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
//! ```
//!
//! ## Failure handling
//!
//! Storage is best-effort. An unreadable or unavailable store means "no
//! preference" (so `system`), and a failed write is logged through
//! `tracing` and otherwise ignored.

pub mod document;
pub mod signal;
pub mod store;
pub mod theme;

pub use document::{ClassList, StyleTarget};
pub use signal::{
    os_prefers_dark, ColorSchemeSignal, ManualSignal, OsSignal, Subscription, ThemeDetector,
};
pub use store::{FileStore, MemoryStore, PreferenceStore, StoreError};
pub use theme::{
    ParsePreferenceError, ResolvedTheme, ResolverConfig, ThemePreference, ThemeResolver,
    DEFAULT_STORAGE_KEY,
};
