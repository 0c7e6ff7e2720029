//! Redirected property storage
//!
//! [`PartStorage`] is where accessor calls land: it encodes values with the
//! codec and reads or writes the part's element in the attribute document.
//! Every access goes straight to the document; nothing is cached.

use crate::accessor::AccessorTable;
use crate::error::PartError;
use crate::schema::{PartSchema, PropertyDescriptor};
use qp_codec::{InfosetValue, Value, ValueCodec};
use qp_infoset::AttributeDocument;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Property storage of one wrapped part
#[derive(Clone)]
pub struct PartStorage {
    accessors: Arc<AccessorTable>,
    document: Arc<dyn AttributeDocument>,
    codec: ValueCodec,
}

impl PartStorage {
    /// Create storage over a document
    #[must_use]
    pub fn new(
        accessors: Arc<AccessorTable>,
        document: Arc<dyn AttributeDocument>,
        codec: ValueCodec,
    ) -> Self {
        Self {
            accessors,
            document,
            codec,
        }
    }

    /// Schema of the stored part
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &'static PartSchema {
        self.accessors.schema()
    }

    /// Accessor table of the stored part
    #[inline]
    #[must_use]
    pub fn accessors(&self) -> &Arc<AccessorTable> {
        &self.accessors
    }

    /// Backing document
    #[inline]
    #[must_use]
    pub fn document(&self) -> &Arc<dyn AttributeDocument> {
        &self.document
    }

    /// Codec used for every value
    #[inline]
    #[must_use]
    pub fn codec(&self) -> &ValueCodec {
        &self.codec
    }

    /// Point at another document
    pub fn attach(&mut self, document: Arc<dyn AttributeDocument>) {
        self.document = document;
    }

    /// True when the property has been stored
    ///
    /// # Errors
    /// Returns [`PartError::MemberNotFound`] for undeclared properties
    pub fn is_stored(&self, property: &str) -> Result<bool, PartError> {
        let descriptor = self.property(property)?;
        Ok(self.document.contains(self.schema().name, descriptor.name))
    }

    /// Read a property as `T`
    ///
    /// # Errors
    /// Returns [`PartError::TypeMismatch`] if `T` is not the declared type,
    /// or a codec error if the stored text cannot be parsed
    pub fn get<T: InfosetValue>(&self, property: &str) -> Result<T, PartError> {
        let descriptor = self.typed_property::<T>(property)?;
        Ok(T::from_value(self.read(descriptor)?)?)
    }

    /// Write a property from `T`
    ///
    /// # Errors
    /// Returns [`PartError::TypeMismatch`] if `T` is not the declared type,
    /// or a codec error if the value cannot be formatted
    pub fn set<T: InfosetValue>(&self, property: &str, value: &T) -> Result<(), PartError> {
        let descriptor = self.typed_property::<T>(property)?;
        self.write(descriptor, &value.to_value())
    }

    /// Read a property, storing a computed default if it was never written
    ///
    /// # Errors
    /// As [`PartStorage::get`] and [`PartStorage::set`]
    pub fn retrieve_or_store<T, F>(&self, property: &str, default: F) -> Result<T, PartError>
    where
        T: InfosetValue,
        F: FnOnce() -> T,
    {
        let descriptor = self.typed_property::<T>(property)?;
        if self.document.contains(self.schema().name, descriptor.name) {
            return Ok(T::from_value(self.read(descriptor)?)?);
        }
        let value = default();
        self.write(descriptor, &value.to_value())?;
        Ok(value)
    }

    /// Decode a property, defaulting when absent
    ///
    /// # Errors
    /// Returns a codec error if the stored text cannot be parsed
    pub fn read(&self, descriptor: &PropertyDescriptor) -> Result<Value, PartError> {
        let part = self.schema().name;
        match self.document.get(part, descriptor.name) {
            Some(text) => {
                debug!(part, property = descriptor.name, len = text.len(), "read property");
                Ok(self.codec.parse_value(&descriptor.declared, &text)?)
            }
            None => {
                debug!(part, property = descriptor.name, "property absent, using default");
                Ok(Value::default_for(&descriptor.declared)?)
            }
        }
    }

    /// Encode and write a property
    ///
    /// The document is only touched once encoding has succeeded.
    ///
    /// # Errors
    /// Returns a codec error if the value cannot be formatted
    pub fn write(&self, descriptor: &PropertyDescriptor, value: &Value) -> Result<(), PartError> {
        let part = self.schema().name;
        let text = self.codec.format_value(&descriptor.declared, value)?;
        debug!(part, property = descriptor.name, len = text.len(), "wrote property");
        self.document.set(part, descriptor.name, text);
        Ok(())
    }

    fn property(&self, property: &str) -> Result<&'static PropertyDescriptor, PartError> {
        let schema = self.schema();
        schema
            .property(property)
            .ok_or_else(|| PartError::member_not_found(schema.name, property))
    }

    fn typed_property<T: InfosetValue>(
        &self,
        property: &str,
    ) -> Result<&'static PropertyDescriptor, PartError> {
        let descriptor = self.property(property)?;
        if descriptor.declared != T::DECLARED {
            return Err(PartError::type_mismatch(
                self.schema().name,
                property,
                descriptor.declared,
                T::DECLARED,
            ));
        }
        Ok(descriptor)
    }
}

impl fmt::Debug for PartStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartStorage")
            .field("part", &self.schema().name)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qp_codec::DeclaredType;
    use qp_infoset::Infoset;

    static PROFILE: PartSchema = PartSchema::new(
        "ProfilePart",
        &[
            PropertyDescriptor::of::<String>("Nick"),
            PropertyDescriptor::of::<Option<i32>>("Age"),
            PropertyDescriptor::new("Avatar", DeclaredType::unsupported("Bitmap")),
        ],
    );

    fn storage() -> (PartStorage, Arc<Infoset>) {
        let infoset = Arc::new(Infoset::new());
        let storage = PartStorage::new(
            Arc::new(AccessorTable::build(&PROFILE)),
            infoset.clone(),
            ValueCodec::new(),
        );
        (storage, infoset)
    }

    #[test]
    fn write_then_read() {
        let (storage, infoset) = storage();
        storage.set("Nick", &"ada".to_string()).unwrap();
        storage.set("Age", &Some(36)).unwrap();
        assert_eq!(infoset.get("ProfilePart", "Age").as_deref(), Some("36"));
        assert_eq!(storage.get::<String>("Nick").unwrap(), "ada");
        assert_eq!(storage.get::<Option<i32>>("Age").unwrap(), Some(36));
    }

    #[test]
    fn absent_reads_default_without_writing() {
        let (storage, infoset) = storage();
        assert_eq!(storage.get::<Option<i32>>("Age").unwrap(), None);
        assert_eq!(storage.get::<String>("Nick").unwrap(), "");
        assert!(infoset.is_empty());
    }

    #[test]
    fn wrong_rust_type_is_rejected() {
        let (storage, _) = storage();
        let err = storage.get::<i32>("Age").unwrap_err();
        assert_eq!(
            err,
            PartError::type_mismatch("ProfilePart", "Age", "int?", "int")
        );
    }

    #[test]
    fn unknown_property() {
        let (storage, _) = storage();
        assert!(matches!(
            storage.get::<String>("Email"),
            Err(PartError::MemberNotFound { .. })
        ));
    }

    #[test]
    fn unsupported_type_never_writes() {
        let (storage, infoset) = storage();
        let avatar = PROFILE.property("Avatar").unwrap();
        let err = storage.write(avatar, &Value::from("pixels")).unwrap_err();
        assert!(matches!(err, PartError::Codec(ref e) if e.is_unsupported()));
        assert!(infoset.is_empty());
    }

    #[test]
    fn retrieve_or_store_persists_default_once() {
        let (storage, infoset) = storage();
        let first = storage
            .retrieve_or_store("Nick", || "anonymous".to_string())
            .unwrap();
        assert_eq!(first, "anonymous");
        assert_eq!(
            infoset.get("ProfilePart", "Nick").as_deref(),
            Some("anonymous")
        );

        let second = storage
            .retrieve_or_store::<String, _>("Nick", || unreachable!("already stored"))
            .unwrap();
        assert_eq!(second, "anonymous");
        assert!(storage.is_stored("Nick").unwrap());
    }
}
