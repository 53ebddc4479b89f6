//! Static route table.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::error::RouteError;

/// A page of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Home,
    People,
    Projects,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            View::Home => "home",
            View::People => "people",
            View::Projects => "projects",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Absolute path, e.g. `/people`.
    pub path: &'static str,
    /// Unique route name, e.g. `People`.
    pub name: &'static str,
    /// The view shown at this path.
    pub view: View,
}

impl Route {
    pub const fn new(path: &'static str, name: &'static str, view: View) -> Self {
        Self { path, name, view }
    }
}

/// The shell's routes, in match order.
pub const ROUTES: &[Route] = &[
    Route::new("/", "Home", View::Home),
    Route::new("/people", "People", View::People),
    Route::new("/projects", "Projects", View::Projects),
];

/// Strips the query string, fragment and trailing slashes from `path`.
///
/// The root path stays `/`.
///
/// ```rust
/// use shade::router::normalize_path;
///
/// assert_eq!(normalize_path("/people/?sort=name#top"), "/people");
/// assert_eq!(normalize_path("/"), "/");
/// ```
pub fn normalize_path(path: &str) -> &str {
    let end = path.find(|c: char| c == '?' || c == '#').unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// A validated, ordered route table.
///
/// Paths must start with `/`; paths and names must be unique. Lookups match
/// the normalized path exactly.
///
/// # Example
///
/// ```rust
/// use shade::{RouteTable, View};
///
/// let table = RouteTable::standard();
/// assert_eq!(table.resolve("/projects?page=2").map(|r| r.view), Some(View::Projects));
/// assert!(table.resolve("/admin").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    by_path: HashMap<&'static str, usize>,
    by_name: HashMap<&'static str, usize>,
}

impl RouteTable {
    /// Builds a table from routes in match order.
    ///
    /// # Errors
    ///
    /// Returns an error if a path does not start with `/`, or if two routes
    /// share a path or a name.
    pub fn new(routes: impl IntoIterator<Item = Route>) -> Result<Self, RouteError> {
        let routes: Vec<Route> = routes.into_iter().collect();
        let mut by_path = HashMap::new();
        let mut by_name = HashMap::new();

        for (index, route) in routes.iter().enumerate() {
            if !route.path.starts_with('/') {
                return Err(RouteError::InvalidPath {
                    name: route.name.to_string(),
                    path: route.path.to_string(),
                });
            }
            if let Some(&existing) = by_path.get(normalize_path(route.path)) {
                let existing: &Route = &routes[existing];
                return Err(RouteError::DuplicatePath {
                    path: route.path.to_string(),
                    first: existing.name.to_string(),
                    second: route.name.to_string(),
                });
            }
            if by_name.contains_key(route.name) {
                return Err(RouteError::DuplicateName {
                    name: route.name.to_string(),
                });
            }
            by_path.insert(normalize_path(route.path), index);
            by_name.insert(route.name, index);
        }

        Ok(Self {
            routes,
            by_path,
            by_name,
        })
    }

    /// The table built from [`ROUTES`].
    pub fn standard() -> Self {
        let mut by_path = HashMap::new();
        let mut by_name = HashMap::new();
        for (index, route) in ROUTES.iter().enumerate() {
            by_path.insert(route.path, index);
            by_name.insert(route.name, index);
        }
        Self {
            routes: ROUTES.to_vec(),
            by_path,
            by_name,
        }
    }

    /// Finds the route for `path` after normalization.
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        self.by_path
            .get(normalize_path(path))
            .map(|&index| &self.routes[index])
    }

    /// Finds a route by name.
    pub fn by_name(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&index| &self.routes[index])
    }

    pub(crate) fn position(&self, path: &str) -> Option<usize> {
        self.by_path.get(normalize_path(path)).copied()
    }

    pub(crate) fn get(&self, index: usize) -> &Route {
        &self.routes[index]
    }

    /// Returns the routes in match order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}
