//! Host-driven color-scheme signal.

use std::cell::Cell;
use std::rc::Rc;

use super::{ColorSchemeSignal, Listeners, Subscription};

/// A signal whose value the host sets directly, for example from a
/// `prefers-color-scheme` media query callback. Clones share one value and
/// one set of listeners.
///
/// # Example
///
/// ```rust
/// use tonality::{ColorSchemeSignal, ManualSignal};
///
/// let signal = ManualSignal::new(false);
/// let host = signal.clone();
/// host.set_dark(true);
/// assert!(signal.prefers_dark());
/// ```
#[derive(Clone, Default)]
pub struct ManualSignal {
    dark: Rc<Cell<bool>>,
    listeners: Listeners,
}

impl ManualSignal {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            dark: Rc::new(Cell::new(prefers_dark)),
            listeners: Listeners::default(),
        }
    }

    /// Updates the value, notifying listeners if it changed.
    pub fn set_dark(&self, prefers_dark: bool) {
        if self.dark.replace(prefers_dark) != prefers_dark {
            tracing::debug!(prefers_dark, "color scheme signal changed");
            self.listeners.notify(prefers_dark);
        }
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl ColorSchemeSignal for ManualSignal {
    fn prefers_dark(&self) -> bool {
        self.dark.get()
    }

    fn subscribe(&self, listener: Box<dyn FnMut(bool)>) -> Subscription {
        self.listeners.subscribe(listener)
    }
}

impl std::fmt::Debug for ManualSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualSignal")
            .field("prefers_dark", &self.dark.get())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
