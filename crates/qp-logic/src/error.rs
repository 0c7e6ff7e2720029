//! Error types for logic providers and dispatch

use qp_parts::PartError;

/// Error raised inside a logic provider
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Reading a part property failed
    #[error(transparent)]
    Part(#[from] PartError),

    /// A parameter could not be computed
    #[error("invalid parameter {key}: {reason}")]
    InvalidParameter {
        /// Parameter key
        key: String,
        /// What went wrong
        reason: String,
    },

    /// Provider-specific failure
    #[error("{0}")]
    Failed(String),
}

impl ProviderError {
    /// Create invalid-parameter error
    pub fn invalid_parameter(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create generic failure
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Errors raised while computing display parameters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogicError {
    /// A provider failed and failure isolation is off
    #[error("logic {provider} failed for {part}: {source}")]
    ProviderInvocationFailure {
        /// Provider name
        provider: String,
        /// Part name
        part: String,
        /// Underlying failure
        #[source]
        source: ProviderError,
    },
}

impl LogicError {
    /// Create provider failure
    pub fn provider_failure(
        provider: impl Into<String>,
        part: impl Into<String>,
        source: ProviderError,
    ) -> Self {
        Self::ProviderInvocationFailure {
            provider: provider.into(),
            part: part.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = LogicError::provider_failure(
            "ForecastLogic",
            "WeatherPart",
            ProviderError::failed("service unavailable"),
        );
        assert_eq!(
            err.to_string(),
            "logic ForecastLogic failed for WeatherPart: service unavailable"
        );
        assert_eq!(
            ProviderError::invalid_parameter("Zoom", "out of range").to_string(),
            "invalid parameter Zoom: out of range"
        );
    }

    #[test]
    fn source_is_kept() {
        use std::error::Error as _;
        let err = LogicError::provider_failure("L", "P", ProviderError::failed("boom"));
        assert_eq!(err.source().map(ToString::to_string), Some("boom".to_string()));
    }
}
