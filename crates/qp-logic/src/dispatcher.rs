//! Display parameter dispatch
//!
//! [`LogicDispatcher`] runs every provider registered for a part's exact
//! type, in registration order, and merges their maps. Later providers
//! overwrite earlier ones on key collisions.

use crate::error::LogicError;
use crate::logic::ParameterMap;
use crate::registry::LogicRegistry;
use qp_parts::PartProxy;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Dispatch settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Log and skip failing providers instead of aborting
    pub isolate_failures: bool,
}

impl DispatchConfig {
    /// Set failure isolation
    #[inline]
    #[must_use]
    pub fn with_isolate_failures(mut self, isolate: bool) -> Self {
        self.isolate_failures = isolate;
        self
    }
}

/// Computes merged display parameters for wrapped parts
#[derive(Debug, Clone)]
pub struct LogicDispatcher {
    registry: Arc<LogicRegistry>,
    config: DispatchConfig,
}

impl LogicDispatcher {
    /// Create dispatcher
    #[must_use]
    pub fn new(registry: Arc<LogicRegistry>, config: DispatchConfig) -> Self {
        Self { registry, config }
    }

    /// Provider registry
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &LogicRegistry {
        &self.registry
    }

    /// Dispatch settings
    #[inline]
    #[must_use]
    pub fn config(&self) -> DispatchConfig {
        self.config
    }

    /// Merge the parameters of every provider for the part's type
    ///
    /// Parts without providers yield an empty map. Keys keep the position of
    /// their first insertion and the value of their last.
    ///
    /// # Errors
    /// Returns [`LogicError::ProviderInvocationFailure`] for the first
    /// failing provider unless failure isolation is enabled
    pub fn compute_parameters(&self, part: &PartProxy) -> Result<ParameterMap, LogicError> {
        let part_name = part.part_name();
        let mut merged = ParameterMap::new();

        for entry in self.registry.providers_for(part_name) {
            let Some(outcome) = entry.compute(part) else {
                trace!(
                    part = part_name,
                    provider = entry.provider(),
                    "part is not the provider's target type"
                );
                continue;
            };

            match outcome {
                Ok(Some(parameters)) => {
                    debug!(
                        part = part_name,
                        provider = entry.provider(),
                        count = parameters.len(),
                        "merging display parameters"
                    );
                    merged.extend(parameters);
                }
                Ok(None) => {}
                Err(err) if self.config.isolate_failures => {
                    warn!(
                        part = part_name,
                        provider = entry.provider(),
                        error = %err,
                        "skipping failed display logic"
                    );
                }
                Err(err) => {
                    return Err(LogicError::provider_failure(entry.provider(), part_name, err));
                }
            }
        }

        Ok(merged)
    }
}
