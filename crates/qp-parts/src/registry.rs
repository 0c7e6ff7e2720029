//! Part type registry
//!
//! Provides [`PartTypeRegistry`], the startup-built map from part name to a
//! constructor. Registration order is kept for listing.

use crate::error::PartError;
use crate::part::QuickPart;
use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

type Constructor = Arc<dyn Fn() -> Box<dyn QuickPart> + Send + Sync>;

/// Part name → constructor
#[derive(Clone)]
pub struct TypeRegistration {
    name: &'static str,
    type_name: &'static str,
    construct: Constructor,
}

impl TypeRegistration {
    /// Register a `Default`-constructible part type
    ///
    /// The part name is taken from the type's schema.
    #[must_use]
    pub fn of<P: QuickPart + Default>() -> Self {
        let name = P::default().schema().name;
        Self {
            name,
            type_name: std::any::type_name::<P>(),
            construct: Arc::new(|| Box::new(P::default()) as Box<dyn QuickPart>),
        }
    }

    /// Register a custom constructor under a name
    #[must_use]
    pub fn with_constructor<F>(name: &'static str, type_name: &'static str, construct: F) -> Self
    where
        F: Fn() -> Box<dyn QuickPart> + Send + Sync + 'static,
    {
        Self {
            name,
            type_name,
            construct: Arc::new(construct),
        }
    }

    /// Part name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rust type name
    #[inline]
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Construct a fresh, unwrapped instance
    #[must_use]
    pub fn construct(&self) -> Box<dyn QuickPart> {
        (self.construct)()
    }
}

impl fmt::Debug for TypeRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistration")
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Registered part types, keyed by part name
#[derive(Debug, Clone, Default)]
pub struct PartTypeRegistry {
    types: IndexMap<&'static str, TypeRegistration>,
}

impl PartTypeRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            types: IndexMap::new(),
        }
    }

    /// Build a registry from registrations
    ///
    /// # Errors
    /// Returns [`PartError::DuplicateType`] if two registrations share a name
    pub fn from_registrations(
        registrations: impl IntoIterator<Item = TypeRegistration>,
    ) -> Result<Self, PartError> {
        let mut registry = Self::new();
        for registration in registrations {
            registry.register(registration)?;
        }
        Ok(registry)
    }

    /// Add a registration
    ///
    /// Constructs one instance to check that its schema carries the
    /// registered name.
    ///
    /// # Errors
    /// - [`PartError::DuplicateType`] if the name is taken
    /// - [`PartError::NameMismatch`] if the constructed part has another schema name
    pub fn register(&mut self, registration: TypeRegistration) -> Result<(), PartError> {
        if self.types.contains_key(registration.name) {
            return Err(PartError::duplicate_type(registration.name));
        }
        let schema_name = registration.construct().schema().name;
        if schema_name != registration.name {
            return Err(PartError::name_mismatch(registration.name, schema_name));
        }
        self.types.insert(registration.name, registration);
        Ok(())
    }

    /// Look up a registration
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeRegistration> {
        self.types.get(name)
    }

    /// Check if a name is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Construct an unwrapped instance by name
    ///
    /// # Errors
    /// Returns [`PartError::TypeNotRegistered`] for unknown names
    pub fn instantiate(&self, name: &str) -> Result<Box<dyn QuickPart>, PartError> {
        self.get(name)
            .map(TypeRegistration::construct)
            .ok_or_else(|| PartError::type_not_registered(name))
    }

    /// Part names in registration order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.types.keys().copied().collect()
    }

    /// Iterate registrations in registration order
    pub fn iter(&self) -> impl Iterator<Item = &TypeRegistration> {
        self.types.values()
    }

    /// Number of registered types
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
