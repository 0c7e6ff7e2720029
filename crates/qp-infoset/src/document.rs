//! Attribute document contract
//!
//! The narrow get/set surface the property interceptor persists through.

use std::sync::Arc;

/// Two-level attribute store: element name → attribute name → string
///
/// Implementations create the element on first `set`. `get` never creates
/// anything. No transactional guarantees are made.
pub trait AttributeDocument: Send + Sync {
    /// Read an attribute of a top-level element
    fn get(&self, element: &str, attribute: &str) -> Option<String>;

    /// Write an attribute of a top-level element, creating the element if absent
    fn set(&self, element: &str, attribute: &str, value: String);

    /// True when the attribute has been stored
    fn contains(&self, element: &str, attribute: &str) -> bool {
        self.get(element, attribute).is_some()
    }
}

impl<D: AttributeDocument + ?Sized> AttributeDocument for Arc<D> {
    fn get(&self, element: &str, attribute: &str) -> Option<String> {
        (**self).get(element, attribute)
    }

    fn set(&self, element: &str, attribute: &str, value: String) {
        (**self).set(element, attribute, value);
    }

    fn contains(&self, element: &str, attribute: &str) -> bool {
        (**self).contains(element, attribute)
    }
}

impl<D: AttributeDocument + ?Sized> AttributeDocument for &D {
    fn get(&self, element: &str, attribute: &str) -> Option<String> {
        (**self).get(element, attribute)
    }

    fn set(&self, element: &str, attribute: &str, value: String) {
        (**self).set(element, attribute, value);
    }

    fn contains(&self, element: &str, attribute: &str) -> bool {
        (**self).contains(element, attribute)
    }
}
