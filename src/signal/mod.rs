//! The environment's color-scheme signal.
//!
//! This module provides:
//!
//! - [`ColorSchemeSignal`]: An observable "is dark preferred" query
//! - [`ManualSignal`]: A host-driven signal, also used as a test fake
//! - [`OsSignal`]: The operating system's setting, via `dark-light`
//! - [`Subscription`]: A guard that unsubscribes its listener on drop

mod listeners;
mod manual;
mod os;

pub(crate) use listeners::Listeners;
pub use listeners::Subscription;
pub use manual::ManualSignal;
pub use os::{os_prefers_dark, OsSignal, ThemeDetector};

/// A boolean "dark mode preferred" query that can be observed for changes.
pub trait ColorSchemeSignal {
    /// Whether the environment currently prefers a dark color scheme.
    fn prefers_dark(&self) -> bool;

    /// Registers `listener` to be called with the new value whenever it
    /// changes. The listener stays registered until the returned
    /// [`Subscription`] is dropped.
    fn subscribe(&self, listener: Box<dyn FnMut(bool)>) -> Subscription;
}
