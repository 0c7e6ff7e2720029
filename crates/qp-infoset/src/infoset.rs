//! In-memory infoset document
//!
//! Provides [`Infoset`], a thread-safe element tree rooted at `<Data>`. Each
//! part stores its properties as attributes of a top-level element named
//! after the part.

use crate::document::AttributeDocument;
use crate::element::Element;
use crate::error::InfosetError;
use crate::xml;
use parking_lot::RwLock;

/// Name of the root element
pub const ROOT_ELEMENT: &str = "Data";

/// Thread-safe infoset document
///
/// Reads take a shared lock, writes an exclusive one. Each `get`/`set` is
/// atomic on its own; sequences of calls are not.
#[derive(Debug)]
pub struct Infoset {
    root: RwLock<Element>,
}

impl Infoset {
    /// Create empty infoset (`<Data/>`)
    #[must_use]
    pub fn new() -> Self {
        Self::from_root(Element::new(ROOT_ELEMENT))
    }

    /// Wrap an existing root element
    #[must_use]
    pub fn from_root(root: Element) -> Self {
        Self {
            root: RwLock::new(root),
        }
    }

    /// Load from XML text
    ///
    /// Blank text yields an empty infoset.
    ///
    /// # Errors
    /// Returns [`InfosetError`] when the text is not a single well-formed element
    pub fn from_xml(text: &str) -> Result<Self, InfosetError> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        xml::read_element(text).map(Self::from_root)
    }

    /// Serialize to XML text
    ///
    /// # Errors
    /// Returns [`InfosetError::Xml`] if the writer fails
    pub fn to_xml(&self) -> Result<String, InfosetError> {
        xml::write_element(&self.root.read())
    }

    /// Copy of a top-level element
    #[must_use]
    pub fn element(&self, name: &str) -> Option<Element> {
        self.root.read().child(name).cloned()
    }

    /// Names of top-level elements in document order
    #[must_use]
    pub fn element_names(&self) -> Vec<String> {
        self.root
            .read()
            .children()
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Copy of the whole tree
    #[must_use]
    pub fn snapshot(&self) -> Element {
        self.root.read().clone()
    }

    /// Run a closure against the root under the read lock
    pub fn read<R>(&self, f: impl FnOnce(&Element) -> R) -> R {
        f(&self.root.read())
    }

    /// Run a closure against the root under the write lock
    pub fn write<R>(&self, f: impl FnOnce(&mut Element) -> R) -> R {
        f(&mut self.root.write())
    }

    /// True when no top-level element exists
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.read().children().is_empty()
    }
}

impl Default for Infoset {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Infoset {
    fn clone(&self) -> Self {
        Self::from_root(self.snapshot())
    }
}

impl AttributeDocument for Infoset {
    fn get(&self, element: &str, attribute: &str) -> Option<String> {
        self.root
            .read()
            .child(element)
            .and_then(|el| el.attribute(attribute))
            .map(str::to_string)
    }

    fn set(&self, element: &str, attribute: &str, value: String) {
        let mut root = self.root.write();
        if root.child(element).is_none() {
            tracing::trace!(element, "creating infoset element");
        }
        root.child_or_insert(element).set_attribute(attribute, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn get_on_absent_element_does_not_create() {
        let infoset = Infoset::new();
        assert_eq!(infoset.get("BlogPart", "Title"), None);
        assert!(infoset.is_empty());
    }

    #[test]
    fn set_creates_element_lazily() {
        let infoset = Infoset::new();
        infoset.set("BlogPart", "Title", "Hello".to_string());
        infoset.set("BlogPart", "Count", "3".to_string());
        assert_eq!(infoset.element_names(), vec!["BlogPart".to_string()]);
        assert_eq!(infoset.get("BlogPart", "Title").as_deref(), Some("Hello"));
        assert!(infoset.contains("BlogPart", "Count"));
        assert!(!infoset.contains("BlogPart", "Missing"));
    }

    #[test]
    fn elements_are_keyed_by_exact_name() {
        let infoset = Infoset::new();
        infoset.set("BlogPart", "Title", "a".to_string());
        assert_eq!(infoset.get("blogpart", "Title"), None);
        assert_eq!(infoset.get("Blog", "Title"), None);
    }

    #[test]
    fn clone_is_deep() {
        let infoset = Infoset::new();
        infoset.set("A", "x", "1".to_string());
        let copy = infoset.clone();
        infoset.set("A", "x", "2".to_string());
        assert_eq!(copy.get("A", "x").as_deref(), Some("1"));
    }

    #[test]
    fn concurrent_writers_on_distinct_elements() {
        let infoset = Arc::new(Infoset::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let infoset = Arc::clone(&infoset);
                thread::spawn(move || {
                    for j in 0..50 {
                        infoset.set(&format!("Part{i}"), &format!("P{j}"), j.to_string());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(infoset.element_names().len(), 8);
        assert_eq!(infoset.get("Part3", "P49").as_deref(), Some("49"));
    }
}
