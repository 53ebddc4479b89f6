//! Route table for the application shell.
//!
//! The shell's routes are static configuration: an ordered list of
//! `{path, name, view}` entries. This module provides:
//!
//! - [`Route`] and [`View`]: one entry and the view it shows
//! - [`ROUTES`]: the shell's route list
//! - [`RouteTable`]: a validated table with path and name lookup
//! - [`Router`]: history-style navigation over a table

mod history;
mod table;

pub use history::Router;
pub use table::{normalize_path, Route, RouteTable, View, ROUTES};
