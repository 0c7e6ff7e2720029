//! Typed element accessors
//!
//! Attribute and text helpers on [`Element`] that go through the value
//! codec. Absent attributes and absent text read as the type's default.

use crate::element::Element;
use qp_codec::{CodecError, InfosetValue, ValueCodec};

impl Element {
    /// Read an attribute as `T`
    ///
    /// # Errors
    /// Returns [`CodecError`] if the stored text cannot be parsed
    pub fn attr<T: InfosetValue>(&self, codec: &ValueCodec, name: &str) -> Result<T, CodecError> {
        match self.attribute(name) {
            Some(text) => codec.parse(text),
            None => T::default_value(),
        }
    }

    /// Encode and write an attribute
    ///
    /// # Errors
    /// Returns [`CodecError`] if the value cannot be formatted; the element
    /// is left unchanged
    pub fn set_attr<T: InfosetValue>(
        &mut self,
        codec: &ValueCodec,
        name: &str,
        value: &T,
    ) -> Result<(), CodecError> {
        let text = codec.format(value)?;
        self.set_attribute(name, text);
        Ok(())
    }

    /// Text of the first child with the given name
    ///
    /// A child without text reads as the empty string.
    #[must_use]
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(|c| c.text().unwrap_or_default())
    }

    /// Encode a value as the text of a child, creating the child if absent
    ///
    /// # Errors
    /// Returns [`CodecError`] if the value cannot be formatted
    pub fn set_child_text<T: InfosetValue>(
        &mut self,
        codec: &ValueCodec,
        name: &str,
        value: &T,
    ) -> Result<(), CodecError> {
        let text = codec.format(value)?;
        self.child_or_insert(name).set_text(text);
        Ok(())
    }

    /// Read the element's own text as `T`
    ///
    /// # Errors
    /// Returns [`CodecError`] if the text cannot be parsed
    pub fn value<T: InfosetValue>(&self, codec: &ValueCodec) -> Result<T, CodecError> {
        match self.text() {
            Some(text) => codec.parse(text),
            None => T::default_value(),
        }
    }

    /// Encode a value as the element's own text
    ///
    /// # Errors
    /// Returns [`CodecError`] if the value cannot be formatted
    pub fn set_value<T: InfosetValue>(
        &mut self,
        codec: &ValueCodec,
        value: &T,
    ) -> Result<(), CodecError> {
        let text = codec.format(value)?;
        self.set_text(text);
        Ok(())
    }
}
