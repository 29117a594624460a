//! Color-scheme signal backed by the operating system setting.

use std::cell::Cell;

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};

use super::{ColorSchemeSignal, Listeners, Subscription};

/// Function used to query whether the environment prefers dark mode.
pub type ThemeDetector = Box<dyn Fn() -> bool>;

/// Queries the OS through `dark-light`. An undetermined mode reads as light.
#[allow(unreachable_patterns)]
pub fn os_prefers_dark() -> bool {
    match detect_os_theme() {
        OsThemeMode::Dark => true,
        OsThemeMode::Light => false,
        _ => false,
    }
}

/// The OS light/dark setting as an observable signal.
///
/// The OS offers no portable change notification, so the host drives
/// observation by calling [`refresh`](OsSignal::refresh) from its event
/// loop or a timer. Every [`prefers_dark`](ColorSchemeSignal::prefers_dark)
/// query also re-reads the OS. Listeners fire only when the detected value
/// changes.
///
/// # Example
///
/// ```rust
/// use tonality::{ColorSchemeSignal, OsSignal};
///
/// // Force a specific mode, e.g. in tests.
/// let signal = OsSignal::with_detector(|| true);
/// assert!(signal.prefers_dark());
/// ```
pub struct OsSignal {
    detector: ThemeDetector,
    current: Cell<bool>,
    listeners: Listeners,
}

impl OsSignal {
    /// Creates a signal reading the real OS setting.
    pub fn new() -> Self {
        Self::with_detector(os_prefers_dark)
    }

    /// Creates a signal that uses `detector` instead of the OS query.
    pub fn with_detector(detector: impl Fn() -> bool + 'static) -> Self {
        let current = detector();
        Self {
            detector: Box::new(detector),
            current: Cell::new(current),
            listeners: Listeners::default(),
        }
    }

    /// Re-queries the detector, notifying listeners on change.
    ///
    /// Returns whether the value changed.
    pub fn refresh(&self) -> bool {
        let detected = (self.detector)();
        if self.current.replace(detected) == detected {
            return false;
        }
        tracing::debug!(prefers_dark = detected, "OS color scheme changed");
        self.listeners.notify(detected);
        true
    }
}

impl Default for OsSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorSchemeSignal for OsSignal {
    /// Queries the detector, notifying listeners first if the value moved.
    fn prefers_dark(&self) -> bool {
        self.refresh();
        self.current.get()
    }

    fn subscribe(&self, listener: Box<dyn FnMut(bool)>) -> Subscription {
        self.listeners.subscribe(listener)
    }
}

impl std::fmt::Debug for OsSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsSignal")
            .field("prefers_dark", &self.current.get())
            .finish_non_exhaustive()
    }
}
