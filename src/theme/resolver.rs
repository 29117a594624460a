//! Preference state, resolution and application.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use super::config::ResolverConfig;
use super::preference::{ResolvedTheme, ThemePreference};
use crate::document::StyleTarget;
use crate::signal::{ColorSchemeSignal, Subscription};
use crate::store::PreferenceStore;

/// Holds the user's theme preference and keeps the style target in sync
/// with it.
///
/// On creation the resolver reads the persisted preference, subscribes to
/// the color-scheme signal, and applies the resolved theme. Afterwards the
/// target is re-applied whenever the preference changes and, while the
/// preference is `System`, whenever the signal changes. Dropping the
/// resolver unsubscribes from the signal.
///
/// Storage failures never surface: an unreadable store yields the default
/// preference and a failed write leaves only the in-memory state updated.
///
/// # Example
///
/// ```rust
/// use tonality::{ClassList, ManualSignal, MemoryStore, ThemePreference, ThemeResolver};
///
/// let store = MemoryStore::new();
/// let signal = ManualSignal::new(true);
/// let root = ClassList::new();
///
/// let mut resolver = ThemeResolver::new(store.clone(), signal.clone(), root.clone());
/// assert_eq!(resolver.theme(), ThemePreference::System);
/// assert_eq!(root.classes(), vec!["dark"]);
///
/// resolver.set_theme(ThemePreference::Light);
/// assert_eq!(root.classes(), vec!["light"]);
/// ```
pub struct ThemeResolver<S, E, T>
where
    S: PreferenceStore + 'static,
    E: ColorSchemeSignal,
    T: StyleTarget + 'static,
{
    state: Rc<RefCell<State<S, T>>>,
    signal: E,
    _subscription: Subscription,
}

struct State<S, T> {
    config: ResolverConfig,
    preference: ThemePreference,
    resolved: ResolvedTheme,
    store: S,
    target: T,
}

impl<S, E, T> ThemeResolver<S, E, T>
where
    S: PreferenceStore + 'static,
    E: ColorSchemeSignal,
    T: StyleTarget + 'static,
{
    /// Creates a resolver with the default [`ResolverConfig`].
    pub fn new(store: S, signal: E, target: T) -> Self {
        Self::with_config(ResolverConfig::default(), store, signal, target)
    }

    pub fn with_config(config: ResolverConfig, store: S, signal: E, target: T) -> Self {
        let preference = load_preference(&store, &config);
        let resolved = preference.resolve_with(signal.prefers_dark());
        let mut state = State {
            config,
            preference,
            resolved,
            store,
            target,
        };
        state.apply(resolved);

        let state = Rc::new(RefCell::new(state));
        let weak = Rc::downgrade(&state);
        let subscription = signal.subscribe(Box::new(move |prefers_dark: bool| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            // Already borrowed means the change came from inside the
            // resolver, which resolves on its own.
            if let Ok(mut state) = state.try_borrow_mut() {
                state.on_signal(prefers_dark);
            };
        }));

        Self {
            state,
            signal,
            _subscription: subscription,
        }
    }

    /// The current preference.
    pub fn theme(&self) -> ThemePreference {
        self.state.borrow().preference
    }

    /// Alias of [`theme`](Self::theme).
    pub fn preference(&self) -> ThemePreference {
        self.theme()
    }

    /// The theme currently applied to the style target.
    pub fn resolved(&self) -> ResolvedTheme {
        self.state.borrow().resolved
    }

    /// The signal this resolver follows, e.g. to call
    /// [`OsSignal::refresh`](crate::OsSignal::refresh) on it.
    pub fn signal(&self) -> &E {
        &self.signal
    }

    /// Sets the preference, re-applies the theme and persists the choice.
    pub fn set_theme(&mut self, preference: ThemePreference) {
        let prefers_dark = self.signal.prefers_dark();
        let mut state = self.state.borrow_mut();
        state.preference = preference;
        state.apply(preference.resolve_with(prefers_dark));
        state.persist();
    }

    /// Alias of [`set_theme`](Self::set_theme).
    pub fn set_preference(&mut self, preference: ThemePreference) {
        self.set_theme(preference);
    }

    /// Re-resolves against the signal's current value and re-applies.
    ///
    /// Only needed for a signal that can change without notifying, since
    /// subscribed changes are applied automatically.
    pub fn resolve(&mut self) -> ResolvedTheme {
        let prefers_dark = self.signal.prefers_dark();
        let mut state = self.state.borrow_mut();
        let resolved = state.preference.resolve_with(prefers_dark);
        state.apply(resolved);
        resolved
    }
}

impl<S, T> State<S, T>
where
    S: PreferenceStore,
    T: StyleTarget,
{
    fn on_signal(&mut self, prefers_dark: bool) {
        if self.preference == ThemePreference::System {
            self.apply(ResolvedTheme::from_dark(prefers_dark));
        }
    }

    /// Replaces whichever theme marker is present with the one for `resolved`.
    fn apply(&mut self, resolved: ResolvedTheme) {
        self.target.remove_class(&self.config.light_class);
        self.target.remove_class(&self.config.dark_class);
        self.target.add_class(self.config.class_for(resolved));
        self.resolved = resolved;
        debug!(preference = %self.preference, theme = %resolved, "applied theme");
    }

    fn persist(&mut self) {
        let key = &self.config.storage_key;
        if let Err(e) = self.store.set(key, self.preference.as_str()) {
            warn!(key = %key, error = %e, "could not persist theme preference");
        }
    }
}

fn load_preference<S: PreferenceStore>(store: &S, config: &ResolverConfig) -> ThemePreference {
    let key = &config.storage_key;
    match store.get(key) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
            debug!(key = %key, error = %e, "ignoring stored theme preference");
            config.default_preference
        }),
        Ok(None) => config.default_preference,
        Err(e) => {
            debug!(key = %key, error = %e, "theme preference store unreadable");
            config.default_preference
        }
    }
}

impl<S, E, T> std::fmt::Debug for ThemeResolver<S, E, T>
where
    S: PreferenceStore + 'static,
    E: ColorSchemeSignal,
    T: StyleTarget + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ThemeResolver")
            .field("preference", &state.preference)
            .field("resolved", &state.resolved)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClassList, ManualSignal, MemoryStore};

    fn resolver(
        store: &MemoryStore,
        signal: &ManualSignal,
        root: &ClassList,
    ) -> ThemeResolver<MemoryStore, ManualSignal, ClassList> {
        ThemeResolver::new(store.clone(), signal.clone(), root.clone())
    }

    #[test]
    fn test_empty_store_defaults_to_system() {
        let root = ClassList::new();
        let r = resolver(&MemoryStore::new(), &ManualSignal::new(false), &root);
        assert_eq!(r.theme(), ThemePreference::System);
        assert_eq!(r.resolved(), ResolvedTheme::Light);
        assert_eq!(root.classes(), vec!["light"]);
    }

    #[test]
    fn test_empty_store_with_dark_signal_starts_dark() {
        let root = ClassList::new();
        let r = resolver(&MemoryStore::new(), &ManualSignal::new(true), &root);
        assert_eq!(r.resolved(), ResolvedTheme::Dark);
        assert_eq!(root.classes(), vec!["dark"]);
    }

    #[test]
    fn test_stored_preference_is_loaded() {
        let store = MemoryStore::with_entries([("theme", "dark")]);
        let r = resolver(&store, &ManualSignal::new(false), &ClassList::new());
        assert_eq!(r.theme(), ThemePreference::Dark);
        assert_eq!(r.resolved(), ResolvedTheme::Dark);
    }

    #[test]
    fn test_invalid_stored_value_falls_back() {
        let store = MemoryStore::with_entries([("theme", "purple")]);
        let r = resolver(&store, &ManualSignal::new(false), &ClassList::new());
        assert_eq!(r.theme(), ThemePreference::System);
    }

    #[test]
    fn test_unavailable_store_defaults_and_still_applies() {
        let root = ClassList::new();
        let mut r = resolver(&MemoryStore::unavailable(), &ManualSignal::new(false), &root);
        assert_eq!(r.theme(), ThemePreference::System);

        r.set_theme(ThemePreference::Dark);
        assert_eq!(r.theme(), ThemePreference::Dark);
        assert_eq!(root.classes(), vec!["dark"]);
    }

    #[test]
    fn test_set_theme_persists_raw_preference() {
        let store = MemoryStore::new();
        let mut r = resolver(&store, &ManualSignal::new(true), &ClassList::new());

        r.set_theme(ThemePreference::System);
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("system"));
        assert_eq!(r.resolved(), ResolvedTheme::Dark);
    }

    #[test]
    fn test_apply_keeps_unrelated_classes() {
        let root = ClassList::from_classes(["app", "dark"]);
        let mut r = resolver(&MemoryStore::new(), &ManualSignal::new(false), &root);
        assert_eq!(root.classes(), vec!["app", "light"]);

        r.set_theme(ThemePreference::Dark);
        assert_eq!(root.classes(), vec!["app", "dark"]);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let root = ClassList::new();
        let mut r = resolver(&MemoryStore::new(), &ManualSignal::new(true), &root);
        let before = root.classes();
        r.resolve();
        r.resolve();
        assert_eq!(root.classes(), before);
    }

    #[test]
    fn test_signal_ignored_for_explicit_preference() {
        let signal = ManualSignal::new(false);
        let root = ClassList::new();
        let mut r = resolver(&MemoryStore::new(), &signal, &root);
        r.set_theme(ThemePreference::Light);

        signal.set_dark(true);
        assert_eq!(root.classes(), vec!["light"]);
        assert_eq!(r.resolved(), ResolvedTheme::Light);
    }

    #[test]
    fn test_custom_config() {
        let store = MemoryStore::new();
        let root = ClassList::new();
        let config = ResolverConfig::new()
            .storage_key("ui.theme")
            .classes("theme-day", "theme-night")
            .default_preference(ThemePreference::Dark);
        let mut r = ThemeResolver::with_config(
            config,
            store.clone(),
            ManualSignal::new(false),
            root.clone(),
        );
        assert_eq!(root.classes(), vec!["theme-night"]);

        r.set_theme(ThemePreference::Light);
        assert_eq!(root.classes(), vec!["theme-day"]);
        assert_eq!(store.get("ui.theme").unwrap().as_deref(), Some("light"));
        assert!(store.get("theme").unwrap().is_none());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let signal = ManualSignal::new(false);
        let root = ClassList::new();
        let r = resolver(&MemoryStore::new(), &signal, &root);
        assert_eq!(signal.listener_count(), 1);

        drop(r);
        assert_eq!(signal.listener_count(), 0);
        signal.set_dark(true);
        assert_eq!(root.classes(), vec!["light"]);
    }
}
