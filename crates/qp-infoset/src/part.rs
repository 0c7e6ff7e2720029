//! Per-item infoset pair
//!
//! A content item carries two documents: the item infoset, shared by all
//! versions, and the version infoset, private to one version. Stores and
//! retrieves pick one with [`StorageScope`].

use crate::document::AttributeDocument;
use crate::error::InfosetError;
use crate::infoset::Infoset;
use qp_codec::{CodecError, InfosetValue, ValueCodec};
use std::sync::Arc;

/// Which of the two documents an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageScope {
    /// Item infoset, shared across versions
    #[default]
    Item,

    /// Version infoset
    Version,
}

/// Item and version infosets of one content item
///
/// Cloning shares both documents.
#[derive(Debug, Clone, Default)]
pub struct InfosetPart {
    item: Arc<Infoset>,
    version: Arc<Infoset>,
}

impl InfosetPart {
    /// Create a part with two empty infosets
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing documents
    #[must_use]
    pub fn from_documents(item: Infoset, version: Infoset) -> Self {
        Self {
            item: Arc::new(item),
            version: Arc::new(version),
        }
    }

    /// Load both documents from XML
    ///
    /// # Errors
    /// Returns [`InfosetError`] if either text is malformed
    pub fn from_xml(item: &str, version: &str) -> Result<Self, InfosetError> {
        Ok(Self::from_documents(
            Infoset::from_xml(item)?,
            Infoset::from_xml(version)?,
        ))
    }

    /// Item infoset
    #[inline]
    #[must_use]
    pub fn infoset(&self) -> &Arc<Infoset> {
        &self.item
    }

    /// Version infoset
    #[inline]
    #[must_use]
    pub fn version_infoset(&self) -> &Arc<Infoset> {
        &self.version
    }

    /// Document for a scope
    #[must_use]
    pub fn document(&self, scope: StorageScope) -> &Arc<Infoset> {
        match scope {
            StorageScope::Item => &self.item,
            StorageScope::Version => &self.version,
        }
    }

    /// Encode and store a property of a part
    ///
    /// Nothing is written when encoding fails.
    ///
    /// # Errors
    /// Returns [`CodecError`] if the value cannot be formatted
    pub fn store<T: InfosetValue>(
        &self,
        codec: &ValueCodec,
        part_name: &str,
        property: &str,
        value: &T,
        scope: StorageScope,
    ) -> Result<(), CodecError> {
        let text = codec.format(value)?;
        self.document(scope).set(part_name, property, text);
        Ok(())
    }

    /// Retrieve and decode a property of a part
    ///
    /// Absent properties yield the type's default.
    ///
    /// # Errors
    /// Returns [`CodecError`] if the stored text cannot be parsed
    pub fn retrieve<T: InfosetValue>(
        &self,
        codec: &ValueCodec,
        part_name: &str,
        property: &str,
        scope: StorageScope,
    ) -> Result<T, CodecError> {
        match self.document(scope).get(part_name, property) {
            Some(text) => codec.parse(&text),
            None => T::default_value(),
        }
    }
}

/// Unscoped access goes to the item infoset
impl AttributeDocument for InfosetPart {
    fn get(&self, element: &str, attribute: &str) -> Option<String> {
        self.item.get(element, attribute)
    }

    fn set(&self, element: &str, attribute: &str, value: String) {
        self.item.set(element, attribute, value);
    }
}
