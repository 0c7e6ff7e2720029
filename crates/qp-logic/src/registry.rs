//! Logic provider registry
//!
//! Providers are erased at registration into entries that downcast the
//! wrapped part to their target type. Entries keep registration order and
//! are indexed by target part name.

use crate::error::ProviderError;
use crate::logic::{ParameterMap, PartLogic};
use qp_parts::{PartProxy, QuickPart};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type ComputeFn =
    dyn Fn(&PartProxy) -> Option<Result<Option<ParameterMap>, ProviderError>> + Send + Sync;

/// A registered provider, specialized to its target type
#[derive(Clone)]
pub struct LogicEntry {
    target: &'static str,
    target_type: &'static str,
    provider: String,
    compute: Arc<ComputeFn>,
}

impl LogicEntry {
    fn new<P, L>(logic: L) -> Self
    where
        P: QuickPart + Default,
        L: PartLogic<P>,
    {
        let target = P::default().schema().name;
        let provider = logic.name().to_string();
        let compute = move |proxy: &PartProxy| {
            let part = proxy.downcast_ref::<P>()?;
            Some(logic.compute_display_parameters(part, proxy.storage()))
        };
        Self {
            target,
            target_type: std::any::type_name::<P>(),
            provider,
            compute: Arc::new(compute),
        }
    }

    /// Target part name
    #[inline]
    #[must_use]
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// Rust type name of the target part
    #[inline]
    #[must_use]
    pub fn target_type(&self) -> &'static str {
        self.target_type
    }

    /// Provider name
    #[inline]
    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Run the provider
    ///
    /// Returns `None` when the wrapped part is not of the target type.
    #[must_use]
    pub fn compute(&self, proxy: &PartProxy) -> Option<Result<Option<ParameterMap>, ProviderError>> {
        (self.compute)(proxy)
    }
}

impl fmt::Debug for LogicEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogicEntry")
            .field("target", &self.target)
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

/// Immutable, startup-built provider registry
#[derive(Debug, Clone, Default)]
pub struct LogicRegistry {
    entries: Vec<LogicEntry>,
    by_target: HashMap<&'static str, Vec<usize>>,
}

impl LogicRegistry {
    /// Start building a registry
    #[must_use]
    pub fn builder() -> LogicRegistryBuilder {
        LogicRegistryBuilder::default()
    }

    /// Providers for a part name, in registration order
    pub fn providers_for<'a>(&'a self, part_name: &str) -> impl Iterator<Item = &'a LogicEntry> + 'a {
        self.by_target
            .get(part_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|&index| self.entries.get(index))
    }

    /// All providers in registration order
    pub fn iter(&self) -> impl Iterator<Item = &LogicEntry> {
        self.entries.iter()
    }

    /// Part names with at least one provider
    #[must_use]
    pub fn targets(&self) -> Vec<&'static str> {
        let mut targets: Vec<_> = self.by_target.keys().copied().collect();
        targets.sort_unstable();
        targets
    }

    /// Number of providers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for [`LogicRegistry`]
#[derive(Debug, Default)]
pub struct LogicRegistryBuilder {
    entries: Vec<LogicEntry>,
}

impl LogicRegistryBuilder {
    /// Register a provider for part type `P`
    #[must_use]
    pub fn with_logic<P, L>(mut self, logic: L) -> Self
    where
        P: QuickPart + Default,
        L: PartLogic<P>,
    {
        self.register::<P, L>(logic);
        self
    }

    /// Register a provider for part type `P`
    pub fn register<P, L>(&mut self, logic: L) -> &mut Self
    where
        P: QuickPart + Default,
        L: PartLogic<P>,
    {
        self.entries.push(LogicEntry::new::<P, L>(logic));
        self
    }

    /// Freeze the registry
    #[must_use]
    pub fn build(self) -> LogicRegistry {
        let mut by_target: HashMap<&'static str, Vec<usize>> = HashMap::new();
        for (index, entry) in self.entries.iter().enumerate() {
            by_target.entry(entry.target).or_default().push(index);
        }
        tracing::info!(
            providers = self.entries.len(),
            targets = by_target.len(),
            "built logic registry"
        );
        LogicRegistry {
            entries: self.entries,
            by_target,
        }
    }
}
