//! The root presentation element.

use std::cell::RefCell;
use std::rc::Rc;

/// The element that carries the visual theme.
///
/// Mirrors the two effects a theme has on a document root: a class in its
/// class list and a color-scheme hint used by native form controls and
/// scrollbars. Like DOM handles, methods take `&self`.
pub trait Presentation {
    /// Removes `class` from the class list. Removing an absent class does nothing.
    fn remove_class(&self, class: &str);

    /// Adds `class` to the class list. Adding a present class does nothing.
    fn add_class(&self, class: &str);

    /// Sets the color-scheme hint.
    fn set_color_scheme(&self, scheme: &str);
}

#[derive(Debug, Default)]
struct RootState {
    classes: Vec<String>,
    color_scheme: Option<String>,
}

/// In-process model of a document root element.
///
/// Class order is insertion order. Clones refer to the same element.
#[derive(Debug, Clone, Default)]
pub struct RootElement {
    state: Rc<RefCell<RootState>>,
}

impl RootElement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an element that already carries some classes.
    pub fn with_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let root = Self::new();
        for class in classes {
            root.add_class(class.as_ref());
        }
        root
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.state.borrow().classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> Vec<String> {
        self.state.borrow().classes.clone()
    }

    pub fn color_scheme(&self) -> Option<String> {
        self.state.borrow().color_scheme.clone()
    }
}

impl Presentation for RootElement {
    fn remove_class(&self, class: &str) {
        self.state.borrow_mut().classes.retain(|c| c != class);
    }

    fn add_class(&self, class: &str) {
        let mut state = self.state.borrow_mut();
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_string());
        }
    }

    fn set_color_scheme(&self, scheme: &str) {
        self.state.borrow_mut().color_scheme = Some(scheme.to_string());
    }
}
