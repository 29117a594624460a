//! Listener bookkeeping shared by the signal implementations.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Listener = Rc<RefCell<dyn FnMut(bool)>>;

/// Redeliveries to one listener within a single pass before giving up on a
/// signal that keeps flipping.
const MAX_REDELIVERIES: usize = 4;

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
    /// Value of the most recent notify, nested ones included.
    latest: bool,
}

impl Registry {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }
}

/// Registered change listeners. Clones share one registry.
#[derive(Clone, Default)]
pub(crate) struct Listeners {
    registry: Rc<RefCell<Registry>>,
}

impl Listeners {
    pub(crate) fn subscribe(&self, listener: impl FnMut(bool) + 'static) -> Subscription {
        let listener: Listener = Rc::new(RefCell::new(listener));
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push((id, listener));
            id
        };

        let registry: Weak<RefCell<Registry>> = Rc::downgrade(&self.registry);
        Subscription::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().entries.retain(|(entry, _)| *entry != id);
            }
        })
    }

    /// Calls every listener with `prefers_dark`.
    ///
    /// Listeners may subscribe, unsubscribe or notify again while being
    /// notified. Each listener always receives the latest value: if a nested
    /// notify changes it, the rest of the outer pass delivers the new value,
    /// and a listener that was busy during the nested pass is called again.
    /// A listener removed mid-pass is skipped.
    pub(crate) fn notify(&self, prefers_dark: bool) {
        let snapshot: Vec<(u64, Listener)> = {
            let mut registry = self.registry.borrow_mut();
            registry.latest = prefers_dark;
            registry
                .entries
                .iter()
                .map(|(id, listener)| (*id, Rc::clone(listener)))
                .collect()
        };

        for (id, listener) in snapshot {
            for _ in 0..=MAX_REDELIVERIES {
                let value = {
                    let registry = self.registry.borrow();
                    if !registry.contains(id) {
                        break;
                    }
                    registry.latest
                };
                match listener.try_borrow_mut() {
                    Ok(mut call) => (*call)(value),
                    Err(_) => {
                        tracing::debug!(
                            listener = id,
                            "listener busy; it is redelivered when it returns"
                        );
                        break;
                    }
                }
                if self.registry.borrow().latest == value {
                    break;
                }
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }
}

/// Keeps a listener registered; dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes the listener immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Unsubscribes now rather than at drop.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
