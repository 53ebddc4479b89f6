//! History-style navigation over a route table.

use crate::error::RouteError;

use super::table::{Route, RouteTable};

/// Navigator with browser-like back/forward history.
///
/// Pushing a new path drops any forward entries. Unknown paths are rejected
/// and leave the history untouched.
///
/// # Example
///
/// ```rust
/// use shade::{Router, View};
///
/// let mut router = Router::standard();
/// router.push("/people").unwrap();
/// router.push("/projects").unwrap();
///
/// assert_eq!(router.back().map(|r| r.view), Some(View::People));
/// assert_eq!(router.forward().map(|r| r.view), Some(View::Projects));
/// assert!(router.push("/nowhere").is_err());
/// assert_eq!(router.current().view, View::Projects);
/// ```
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    entries: Vec<usize>,
    index: usize,
}

impl Router {
    /// Creates a router positioned at `initial`.
    pub fn new(table: RouteTable, initial: &str) -> Result<Self, RouteError> {
        let start = table.position(initial).ok_or_else(|| RouteError::NotFound {
            path: initial.to_string(),
        })?;
        Ok(Self {
            table,
            entries: vec![start],
            index: 0,
        })
    }

    /// A router over [`RouteTable::standard`], starting at `/`.
    pub fn standard() -> Self {
        Self {
            table: RouteTable::standard(),
            entries: vec![0],
            index: 0,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Returns the route currently shown.
    pub fn current(&self) -> &Route {
        self.table.get(self.entries[self.index])
    }

    /// Navigates to `path`, adding a history entry.
    pub fn push(&mut self, path: &str) -> Result<&Route, RouteError> {
        let target = self.lookup(path)?;
        self.entries.truncate(self.index + 1);
        self.entries.push(target);
        self.index += 1;
        tracing::debug!(path = self.current().path, "navigated");
        Ok(self.current())
    }

    /// Navigates to `path`, replacing the current history entry.
    pub fn replace(&mut self, path: &str) -> Result<&Route, RouteError> {
        let target = self.lookup(path)?;
        self.entries[self.index] = target;
        Ok(self.current())
    }

    /// Moves one entry back. Returns `None` at the start of history.
    pub fn back(&mut self) -> Option<&Route> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    /// Moves one entry forward. Returns `None` at the end of history.
    pub fn forward(&mut self) -> Option<&Route> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Number of history entries, including the current one.
    pub fn history_len(&self) -> usize {
        self.entries.len()
    }

    fn lookup(&self, path: &str) -> Result<usize, RouteError> {
        self.table.position(path).ok_or_else(|| RouteError::NotFound {
            path: path.to_string(),
        })
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::View;

    #[test]
    fn test_starts_at_home() {
        let router = Router::standard();
        assert_eq!(router.current().view, View::Home);
        assert!(!router.can_go_back());
        assert!(!router.can_go_forward());
    }

    #[test]
    fn test_new_with_unknown_initial_path() {
        let err = Router::new(RouteTable::standard(), "/missing").unwrap_err();
        assert_eq!(
            err,
            RouteError::NotFound {
                path: "/missing".to_string()
            }
        );
    }

    #[test]
    fn test_new_with_initial_path() {
        let router = Router::new(RouteTable::standard(), "/projects/").unwrap();
        assert_eq!(router.current().name, "Projects");
    }

    #[test]
    fn test_push_truncates_forward_history() {
        let mut router = Router::standard();
        router.push("/people").unwrap();
        router.push("/projects").unwrap();
        router.back();
        router.back();
        assert_eq!(router.current().view, View::Home);

        router.push("/projects").unwrap();
        assert_eq!(router.history_len(), 2);
        assert!(!router.can_go_forward());
        assert_eq!(router.back().map(|r| r.view), Some(View::Home));
    }

    #[test]
    fn test_unknown_push_leaves_history() {
        let mut router = Router::standard();
        router.push("/people").unwrap();
        assert!(router.push("/admin").is_err());
        assert_eq!(router.history_len(), 2);
        assert_eq!(router.current().view, View::People);
    }

    #[test]
    fn test_back_and_forward_stop_at_ends() {
        let mut router = Router::standard();
        assert!(router.back().is_none());
        router.push("/people").unwrap();
        assert!(router.forward().is_none());
        assert_eq!(router.current().view, View::People);
    }

    #[test]
    fn test_replace_keeps_length() {
        let mut router = Router::standard();
        router.push("/people").unwrap();
        router.replace("/projects").unwrap();
        assert_eq!(router.history_len(), 2);
        assert_eq!(router.back().map(|r| r.view), Some(View::Home));
        assert_eq!(router.forward().map(|r| r.view), Some(View::Projects));
    }
}
