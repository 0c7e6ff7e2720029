//! QuickParts manager
//!
//! [`QuickPartsManager`] is the engine's single entry point. It owns the
//! part type registry, the interceptor (and with it the accessor cache), and
//! the display logic dispatcher. Everything is built once at startup and is
//! read-only afterwards.

use crate::config::QuickPartsConfig;
use crate::error::{QuickPartsError, QuickPartsResult};
use qp_infoset::{AttributeDocument, Infoset};
use qp_logic::{LogicDispatcher, LogicRegistryBuilder, ParameterMap, PartLogic};
use qp_parts::{
    PartError, PartFactory, PartProxy, PartSchema, PartTypeRegistry, PropertyInterceptor,
    QuickPart, TypeRegistration,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Shape name prefix for part display
pub const SHAPE_PREFIX: &str = "Parts_";

/// Summary of a registered part type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartTypeInfo {
    /// Part name
    pub name: &'static str,
    /// Rust type name
    pub type_name: &'static str,
    /// Part name without its `Part` suffix
    pub display_name: &'static str,
    /// Number of persisted properties
    pub property_count: usize,
    /// Number of display logic providers
    pub provider_count: usize,
}

impl PartTypeInfo {
    /// Display shape name
    #[must_use]
    pub fn shape_name(&self) -> String {
        format!("{SHAPE_PREFIX}{}", self.display_name)
    }
}

/// Display shape name for a part schema, e.g. `Parts_Map` for `MapPart`
#[must_use]
pub fn shape_name(schema: &PartSchema) -> String {
    format!("{SHAPE_PREFIX}{}", schema.display_name())
}

/// Factory bound to one registered part type
#[derive(Debug, Clone)]
pub struct TypedFactory {
    registration: TypeRegistration,
    factory: PartFactory,
}

impl TypedFactory {
    /// Part name this factory creates
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.registration.name()
    }

    /// Create a wrapped instance over a fresh infoset
    #[must_use]
    pub fn create(&self) -> PartProxy {
        self.create_attached(Arc::new(Infoset::new()))
    }

    /// Create a wrapped instance over an existing document
    #[must_use]
    pub fn create_attached(&self, document: Arc<dyn AttributeDocument>) -> PartProxy {
        self.factory
            .interceptor()
            .wrap(self.registration.construct(), document)
    }
}

/// Builder for [`QuickPartsManager`]
#[derive(Debug, Default)]
pub struct QuickPartsBuilder {
    config: QuickPartsConfig,
    registrations: Vec<TypeRegistration>,
    logic: LogicRegistryBuilder,
}

impl QuickPartsBuilder {
    /// With configuration
    #[must_use]
    pub fn with_config(mut self, config: QuickPartsConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a part type
    #[must_use]
    pub fn with_part<P: QuickPart + Default>(self) -> Self {
        self.with_registration(TypeRegistration::of::<P>())
    }

    /// Register a part type with a custom constructor
    #[must_use]
    pub fn with_registration(mut self, registration: TypeRegistration) -> Self {
        self.registrations.push(registration);
        self
    }

    /// Register a display logic provider for part type `P`
    #[must_use]
    pub fn with_logic<P, L>(mut self, logic: L) -> Self
    where
        P: QuickPart + Default,
        L: PartLogic<P>,
    {
        self.logic.register::<P, L>(logic);
        self
    }

    /// Build the manager
    ///
    /// # Errors
    /// Returns [`QuickPartsError::Part`] if two part types share a name
    pub fn build(self) -> QuickPartsResult<QuickPartsManager> {
        let registry = PartTypeRegistry::from_registrations(self.registrations)?;
        let logic = self.logic.build();

        for target in logic.targets() {
            if !registry.contains(target) {
                warn!(part = target, "display logic registered for an unknown part type");
            }
        }

        let interceptor =
            PropertyInterceptor::new(self.config.codec.codec(), &self.config.interceptor);
        let registry = Arc::new(registry);
        let interceptor = Arc::new(interceptor);
        let dispatcher = LogicDispatcher::new(Arc::new(logic), self.config.dispatch);

        info!(
            parts = registry.len(),
            providers = dispatcher.registry().len(),
            "built quick parts manager"
        );

        Ok(QuickPartsManager {
            factory: PartFactory::new(registry, interceptor),
            dispatcher,
            config: self.config,
        })
    }
}

/// Entry point for creating parts and computing their display parameters
#[derive(Debug, Clone)]
pub struct QuickPartsManager {
    factory: PartFactory,
    dispatcher: LogicDispatcher,
    config: QuickPartsConfig,
}

impl QuickPartsManager {
    /// Start building a manager
    #[must_use]
    pub fn builder() -> QuickPartsBuilder {
        QuickPartsBuilder::default()
    }

    /// Configuration the manager was built with
    #[inline]
    #[must_use]
    pub fn config(&self) -> &QuickPartsConfig {
        &self.config
    }

    /// Instance factory
    #[inline]
    #[must_use]
    pub fn part_factory(&self) -> &PartFactory {
        &self.factory
    }

    /// Display logic dispatcher
    #[inline]
    #[must_use]
    pub fn dispatcher(&self) -> &LogicDispatcher {
        &self.dispatcher
    }

    /// Registered part types in registration order
    #[must_use]
    pub fn part_types(&self) -> Vec<PartTypeInfo> {
        self.factory
            .registry()
            .iter()
            .map(|registration| {
                let schema = registration.construct().schema();
                PartTypeInfo {
                    name: registration.name(),
                    type_name: registration.type_name(),
                    display_name: schema.display_name(),
                    property_count: schema.properties.len(),
                    provider_count: self
                        .dispatcher
                        .registry()
                        .providers_for(registration.name())
                        .count(),
                }
            })
            .collect()
    }

    /// Registered part names in registration order
    #[must_use]
    pub fn part_names(&self) -> Vec<&'static str> {
        self.factory.registry().names()
    }

    /// Factory for one part type
    ///
    /// # Errors
    /// Returns [`QuickPartsError::Part`] for unknown names
    pub fn factory(&self, name: &str) -> QuickPartsResult<TypedFactory> {
        let registration = self
            .factory
            .registry()
            .get(name)
            .cloned()
            .ok_or_else(|| PartError::type_not_registered(name))?;
        Ok(TypedFactory {
            registration,
            factory: self.factory.clone(),
        })
    }

    /// Create a wrapped instance over a fresh infoset
    ///
    /// # Errors
    /// Returns [`QuickPartsError::Part`] for unknown names
    pub fn create(&self, name: &str) -> QuickPartsResult<PartProxy> {
        Ok(self.factory.create(name)?)
    }

    /// Create a wrapped instance over an existing document
    ///
    /// # Errors
    /// Returns [`QuickPartsError::Part`] for unknown names
    pub fn create_attached(
        &self,
        name: &str,
        document: Arc<dyn AttributeDocument>,
    ) -> QuickPartsResult<PartProxy> {
        Ok(self.factory.create_attached(name, document)?)
    }

    /// Create a wrapped instance over an infoset loaded from XML
    ///
    /// # Errors
    /// Returns [`QuickPartsError::Infoset`] for malformed XML, or
    /// [`QuickPartsError::Part`] for unknown names
    pub fn load(&self, name: &str, xml: &str) -> QuickPartsResult<(PartProxy, Arc<Infoset>)> {
        if !self.factory.registry().contains(name) {
            return Err(PartError::type_not_registered(name).into());
        }
        let infoset = Arc::new(Infoset::from_xml(xml)?);
        let part = self.create_attached(name, infoset.clone())?;
        Ok((part, infoset))
    }

    /// Merged display parameters for a wrapped instance
    ///
    /// # Errors
    /// Returns [`QuickPartsError::Logic`] if a provider fails and failure
    /// isolation is off
    pub fn compute_display_parameters(&self, part: &PartProxy) -> QuickPartsResult<ParameterMap> {
        self.dispatcher
            .compute_parameters(part)
            .map_err(QuickPartsError::from)
    }
}
