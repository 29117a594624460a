//! The document root's style classification.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// A set of style markers on the document root, such as the class list of
/// an `<html>` element.
pub trait StyleTarget {
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
}

/// An ordered marker set. Clones share the same set, so a host (or a test)
/// can keep a handle while the resolver owns another.
///
/// # Example
///
/// ```rust
/// use tonality::{ClassList, StyleTarget};
///
/// let mut root = ClassList::from_classes(["app"]);
/// root.add_class("dark");
/// assert_eq!(root.classes(), vec!["app", "dark"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClassList {
    classes: Rc<RefCell<BTreeSet<String>>>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_classes<I, S>(classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = Self::new();
        list.classes
            .borrow_mut()
            .extend(classes.into_iter().map(Into::into));
        list
    }

    /// Snapshot of the current markers, sorted.
    pub fn classes(&self) -> Vec<String> {
        self.classes.borrow().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.classes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.borrow().is_empty()
    }
}

impl StyleTarget for ClassList {
    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    fn add_class(&mut self, class: &str) {
        self.classes.borrow_mut().insert(class.to_string());
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.borrow_mut().remove(class);
    }
}
