//! Typed instance factory
//!
//! [`PartFactory`] turns a part name into a fresh, wrapped instance.

use crate::error::PartError;
use crate::proxy::{PartProxy, PropertyInterceptor};
use crate::registry::PartTypeRegistry;
use qp_infoset::{AttributeDocument, Infoset};
use std::sync::Arc;

/// Creates wrapped part instances by name
#[derive(Debug, Clone)]
pub struct PartFactory {
    registry: Arc<PartTypeRegistry>,
    interceptor: Arc<PropertyInterceptor>,
}

impl PartFactory {
    /// Create factory
    #[must_use]
    pub fn new(registry: Arc<PartTypeRegistry>, interceptor: Arc<PropertyInterceptor>) -> Self {
        Self {
            registry,
            interceptor,
        }
    }

    /// Registered types
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &PartTypeRegistry {
        &self.registry
    }

    /// Interceptor used for wrapping
    #[inline]
    #[must_use]
    pub fn interceptor(&self) -> &PropertyInterceptor {
        &self.interceptor
    }

    /// Create a wrapped instance over a fresh, empty infoset
    ///
    /// # Errors
    /// Returns [`PartError::TypeNotRegistered`] for unknown names
    pub fn create(&self, name: &str) -> Result<PartProxy, PartError> {
        self.create_attached(name, Arc::new(Infoset::new()))
    }

    /// Create a wrapped instance over an existing document
    ///
    /// Nothing is constructed when the name is unknown.
    ///
    /// # Errors
    /// Returns [`PartError::TypeNotRegistered`] for unknown names
    pub fn create_attached(
        &self,
        name: &str,
        document: Arc<dyn AttributeDocument>,
    ) -> Result<PartProxy, PartError> {
        let part = self.registry.instantiate(name)?;
        tracing::debug!(part = name, "created quick part");
        Ok(self.interceptor.wrap(part, document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::QuickPart;
    use crate::registry::TypeRegistration;
    use crate::schema::{PartSchema, PropertyDescriptor};

    static BADGE: PartSchema =
        PartSchema::new("BadgePart", &[PropertyDescriptor::of::<i32>("Level")]);

    #[derive(Debug, Default)]
    struct BadgePart;

    impl QuickPart for BadgePart {
        fn schema(&self) -> &'static PartSchema {
            &BADGE
        }
    }

    fn factory() -> PartFactory {
        let registry =
            PartTypeRegistry::from_registrations([TypeRegistration::of::<BadgePart>()]).unwrap();
        PartFactory::new(Arc::new(registry), Arc::new(PropertyInterceptor::default()))
    }

    #[test]
    fn creates_wrapped_instances() {
        let factory = factory();
        let badge = factory.create("BadgePart").unwrap();
        assert_eq!(badge.part_name(), "BadgePart");
        assert!(badge.downcast_ref::<BadgePart>().is_some());
        assert_eq!(badge.get::<i32>("Level").unwrap(), 0);
    }

    #[test]
    fn instances_are_independent() {
        let factory = factory();
        let a = factory.create("BadgePart").unwrap();
        let b = factory.create("BadgePart").unwrap();
        a.set("Level", &4).unwrap();
        assert_eq!(b.get::<i32>("Level").unwrap(), 0);
    }

    #[test]
    fn attached_instances_share_the_document() {
        let factory = factory();
        let document = Arc::new(Infoset::new());
        let a = factory.create_attached("BadgePart", document.clone()).unwrap();
        let b = factory.create_attached("BadgePart", document.clone()).unwrap();
        a.set("Level", &9).unwrap();
        assert_eq!(b.get::<i32>("Level").unwrap(), 9);
    }

    #[test]
    fn unknown_name() {
        let err = factory().create("MedalPart").unwrap_err();
        assert_eq!(err, PartError::type_not_registered("MedalPart"));
    }
}
