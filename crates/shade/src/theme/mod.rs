//! Theme state and the platform capabilities it keeps in sync.
//!
//! This module provides:
//!
//! - [`ThemePreference`]: Light or dark, the single source of truth
//! - [`ThemeController`]: Resolves, applies, toggles and tracks the preference
//! - [`PreferenceStore`]: Persisted key-value storage for the chosen preference
//! - [`AmbientSignal`]: The OS color-scheme signal with change notifications
//! - [`Presentation`]: The root element that receives the class and hint
//! - [`Subscription`]: Cancellable handle returned by every registration

mod ambient;
mod controller;
mod listeners;
mod preference;
mod presentation;
mod store;

pub use ambient::{
    reset_ambient_detector, set_ambient_detector, AmbientSignal, ManualSignal, NoSignal,
    SystemSignal,
};
pub use controller::{PreferenceSource, ThemeController, TrackingState};
pub use listeners::Subscription;
pub use preference::{ParsePreferenceError, ThemePreference};
pub use presentation::{Presentation, RootElement};
pub use store::{default_store_path, FileStore, MemoryStore, PreferenceStore};
