//! # Shade - theme state for an application shell
//!
//! `shade` keeps a single light/dark [`ThemePreference`] in sync with the
//! places that care about it: the root presentation element, the
//! color-scheme hint used by form controls and scrollbars, and a persisted
//! preference record. It also carries the shell's static route table.
//!
//! ## Core Concepts
//!
//! - [`ThemeController`]: Owns the preference and synchronizes side effects
//! - [`PreferenceStore`]: Durable key-value storage ([`MemoryStore`], [`FileStore`])
//! - [`AmbientSignal`]: The OS light/dark signal ([`SystemSignal`], [`ManualSignal`], [`NoSignal`])
//! - [`Presentation`]: The root element receiving the class and hint ([`RootElement`])
//! - [`RouteTable`] / [`Router`]: Static path to view mapping with history navigation
//!
//! ## Quick Start
//!
//! ```rust
//! use shade::{
//!     ManualSignal, MemoryStore, PreferenceStore, RootElement, ShadeConfig, ThemeController,
//!     ThemePreference,
//! };
//!
//! let store = MemoryStore::new();
//! let signal = ManualSignal::new(ThemePreference::Dark);
//! let root = RootElement::new();
//!
//! let config = ShadeConfig::default();
//! let mut theme = ThemeController::mount(store.clone(), &signal, root.clone(), config);
//! assert_eq!(theme.preference(), ThemePreference::Dark);
//! assert!(root.has_class("dark"));
//!
//! theme.toggle();
//! assert_eq!(store.get("theme").as_deref(), Some("light"));
//! assert_eq!(root.color_scheme().as_deref(), Some("light"));
//! ```
//!
//! ## Startup persistence
//!
//! By default [`ThemeController::initialize`] writes the resolved preference
//! to the store even when it came from the ambient signal, which stops ambient
//! tracking after the first run. Set
//! [`ShadeConfig::persist_on_startup`] to `false` to keep tracking the OS
//! signal until the user makes an explicit choice.

pub mod config;
pub mod error;
pub mod router;
pub mod theme;

pub use config::ShadeConfig;
pub use error::{ConfigError, RouteError, StoreError};
pub use router::{Route, RouteTable, Router, View, ROUTES};
pub use theme::{
    default_store_path, reset_ambient_detector, set_ambient_detector, AmbientSignal, FileStore,
    ManualSignal, MemoryStore, NoSignal, ParsePreferenceError, PreferenceSource, PreferenceStore,
    Presentation, RootElement, Subscription, SystemSignal, ThemeController, ThemePreference,
    TrackingState,
};
