//! The theme controller.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::config::ShadeConfig;

use super::ambient::AmbientSignal;
use super::listeners::{ListenerSet, Subscription};
use super::preference::ThemePreference;
use super::presentation::Presentation;
use super::store::PreferenceStore;

/// Where the current preference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceSource {
    /// Read from the store, or chosen explicitly by the user.
    Stored,
    /// Taken from the ambient signal.
    Ambient,
    /// Neither was available; the configured fallback is in use.
    Fallback,
}

/// Whether the controller follows the ambient signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    /// No preference is persisted; ambient changes are applied.
    Tracking,
    /// A preference is persisted; ambient changes are ignored.
    Fixed,
}

struct ThemeState {
    preference: ThemePreference,
    source: PreferenceSource,
    last_ambient: Option<ThemePreference>,
    config: ShadeConfig,
    store: Box<dyn PreferenceStore>,
    presentation: Box<dyn Presentation>,
}

impl ThemeState {
    /// The stored preference. Unrecognized values count as absent.
    fn persisted(&self) -> Option<ThemePreference> {
        let raw = self.store.get(&self.config.storage_key)?;
        ThemePreference::parse(&raw)
    }

    /// Pushes the current preference to the presentation, and to the store
    /// when `persist` is set.
    fn sync(&self, persist: bool) {
        let value = self.preference.as_str();
        for preference in ThemePreference::ALL {
            self.presentation.remove_class(preference.as_str());
        }
        self.presentation.add_class(value);
        self.presentation.set_color_scheme(value);
        if persist {
            self.store.set(&self.config.storage_key, value);
        }
    }
}

/// Owns the light/dark preference and keeps the root element, the
/// color-scheme hint and the persisted record in sync with it.
///
/// A persisted preference always wins over the ambient signal. Without one,
/// the controller follows ambient change notifications until the user makes
/// an explicit choice with [`toggle`](Self::toggle) or [`set`](Self::set).
///
/// # Example
///
/// ```rust
/// use shade::{
///     ManualSignal, MemoryStore, PreferenceStore, RootElement, ShadeConfig, ThemeController,
///     ThemePreference, TrackingState,
/// };
///
/// let store = MemoryStore::new();
/// let signal = ManualSignal::new(ThemePreference::Light);
/// let root = RootElement::new();
/// let config = ShadeConfig::new().with_persist_on_startup(false);
///
/// let mut theme = ThemeController::mount(store.clone(), &signal, root.clone(), config);
/// assert_eq!(theme.tracking_state(), TrackingState::Tracking);
///
/// // Follows the OS until the user chooses.
/// signal.emit(ThemePreference::Dark);
/// assert!(root.has_class("dark"));
///
/// theme.toggle();
/// assert_eq!(store.get("theme").as_deref(), Some("light"));
///
/// signal.emit(ThemePreference::Dark);
/// assert_eq!(theme.preference(), ThemePreference::Light);
/// ```
pub struct ThemeController {
    state: Rc<RefCell<ThemeState>>,
    observers: ListenerSet<ThemePreference>,
    ambient: Option<Subscription>,
}

impl ThemeController {
    /// Resolves the initial preference and applies it.
    ///
    /// Resolution order: the persisted value, then the ambient signal's
    /// current state, then [`ShadeConfig::fallback`]. The presentation always
    /// reflects the result. The store is written when the value came from it,
    /// or when [`ShadeConfig::persist_on_startup`] is set.
    ///
    /// This does not register for ambient changes; see
    /// [`watch_ambient_signal`](Self::watch_ambient_signal) and
    /// [`mount`](Self::mount).
    pub fn initialize(
        store: impl PreferenceStore + 'static,
        ambient: &dyn AmbientSignal,
        presentation: impl Presentation + 'static,
        config: ShadeConfig,
    ) -> Self {
        let last_ambient = ambient.current();
        let mut state = ThemeState {
            preference: config.fallback,
            source: PreferenceSource::Fallback,
            last_ambient,
            config,
            store: Box::new(store),
            presentation: Box::new(presentation),
        };

        let raw = state.store.get(&state.config.storage_key);
        if let Some(stored) = raw.as_deref().and_then(ThemePreference::parse) {
            state.preference = stored;
            state.source = PreferenceSource::Stored;
        } else {
            if let Some(raw) = &raw {
                tracing::warn!(
                    key = %state.config.storage_key,
                    value = %raw,
                    "ignoring unrecognized stored theme"
                );
            }
            if let Some(ambient) = last_ambient {
                state.preference = ambient;
                state.source = PreferenceSource::Ambient;
            }
        }

        let persist =
            state.config.persist_on_startup || state.source == PreferenceSource::Stored;
        state.sync(persist);

        tracing::debug!(
            preference = %state.preference,
            source = ?state.source,
            persisted = persist,
            "theme initialized"
        );

        Self {
            state: Rc::new(RefCell::new(state)),
            observers: ListenerSet::new(),
            ambient: None,
        }
    }

    /// Initializes and starts watching `ambient` in one step.
    pub fn mount(
        store: impl PreferenceStore + 'static,
        ambient: &dyn AmbientSignal,
        presentation: impl Presentation + 'static,
        config: ShadeConfig,
    ) -> Self {
        let mut controller = Self::initialize(store, ambient, presentation, config);
        controller.watch_ambient_signal(ambient);
        controller
    }

    /// Registers for ambient change notifications.
    ///
    /// A notification is applied only while no preference is persisted;
    /// otherwise it is ignored. Any previous registration is released first.
    /// If `ambient` cannot deliver notifications this is a no-op.
    pub fn watch_ambient_signal(&mut self, ambient: &dyn AmbientSignal) {
        self.ambient = None;

        let state = Rc::downgrade(&self.state);
        let observers = self.observers.clone();
        self.ambient = ambient.subscribe(Box::new(move |preference| {
            // The controller may already be gone.
            if let Some(state) = state.upgrade() {
                handle_ambient(&state, &observers, preference);
            }
        }));

        if self.ambient.is_none() {
            tracing::debug!("ambient signal unavailable, not watching");
        }
    }

    /// Returns `true` while an ambient registration is held.
    pub fn is_watching(&self) -> bool {
        self.ambient.is_some()
    }

    /// Releases the ambient registration. Calling it again does nothing.
    ///
    /// Dropping the controller has the same effect.
    pub fn teardown(&mut self) {
        if let Some(subscription) = self.ambient.take() {
            subscription.cancel();
            tracing::debug!("ambient signal released");
        }
    }

    /// Returns the current preference.
    pub fn preference(&self) -> ThemePreference {
        self.state.borrow().preference
    }

    /// Returns where the current preference came from.
    pub fn source(&self) -> PreferenceSource {
        self.state.borrow().source
    }

    /// Returns whether ambient changes are currently followed.
    pub fn tracking_state(&self) -> TrackingState {
        if self.state.borrow().persisted().is_some() {
            TrackingState::Fixed
        } else {
            TrackingState::Tracking
        }
    }

    /// Returns the configuration the controller was built with.
    pub fn config(&self) -> ShadeConfig {
        self.state.borrow().config.clone()
    }

    /// Re-applies the current preference to the presentation.
    ///
    /// The store is written only if a preference is already persisted or
    /// [`ShadeConfig::persist_on_startup`] is set, so re-applying while
    /// tracking never turns the ambient value into a user choice.
    pub fn apply_preference(&self) {
        let state = self.state.borrow();
        let persist = state.config.persist_on_startup || state.persisted().is_some();
        state.sync(persist);
    }

    /// Flips light and dark, persisting the result.
    ///
    /// This is an explicit user choice, so ambient tracking stops.
    pub fn toggle(&mut self) -> ThemePreference {
        let next = self.preference().toggled();
        self.update(next, PreferenceSource::Stored, true);
        next
    }

    /// Chooses `preference` explicitly, persisting it.
    pub fn set(&mut self, preference: ThemePreference) {
        self.update(preference, PreferenceSource::Stored, true);
    }

    /// Forgets the persisted preference and resumes ambient tracking.
    ///
    /// The preference falls back to the last ambient value seen, or the
    /// configured fallback. The result is applied but not persisted.
    pub fn clear(&mut self) -> ThemePreference {
        let (preference, source) = {
            let state = self.state.borrow();
            state.store.remove(&state.config.storage_key);
            match state.last_ambient {
                Some(ambient) => (ambient, PreferenceSource::Ambient),
                None => (state.config.fallback, PreferenceSource::Fallback),
            }
        };
        tracing::debug!(%preference, "persisted theme cleared");
        self.update(preference, source, false);
        preference
    }

    /// Registers `listener` to be called after every preference change.
    ///
    /// Change notifications carry the new preference; re-applying an
    /// unchanged preference does not notify.
    pub fn subscribe(&self, listener: impl Fn(ThemePreference) + 'static) -> Subscription {
        self.observers.add(listener)
    }

    fn update(&mut self, preference: ThemePreference, source: PreferenceSource, persist: bool) {
        let changed = {
            let mut state = self.state.borrow_mut();
            let changed = state.preference != preference;
            state.preference = preference;
            state.source = source;
            state.sync(persist);
            changed
        };

        tracing::debug!(%preference, ?source, persist, "theme applied");
        if changed {
            self.observers.emit(preference);
        }
    }
}

fn handle_ambient(
    state: &RefCell<ThemeState>,
    observers: &ListenerSet<ThemePreference>,
    preference: ThemePreference,
) {
    {
        let mut state = state.borrow_mut();
        state.last_ambient = Some(preference);

        if state.persisted().is_some() {
            tracing::trace!(%preference, "ambient change ignored, preference is persisted");
            return;
        }
        if state.preference == preference {
            return;
        }

        state.preference = preference;
        state.source = PreferenceSource::Ambient;
        let persist = state.config.persist_on_startup;
        state.sync(persist);
        tracing::debug!(%preference, persist, "theme follows ambient signal");
    }

    observers.emit(preference);
}

impl fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ThemeController")
            .field("preference", &state.preference)
            .field("source", &state.source)
            .field("config", &state.config)
            .field("watching", &self.ambient.is_some())
            .finish()
    }
}
