//! Engine configuration
//!
//! [`QuickPartsConfig`] gathers the codec, interception and dispatch
//! settings. Every section is optional in TOML; missing keys take their
//! defaults.
//!
//! ```toml
//! [codec]
//! null_text_policy = "use_default"
//!
//! [interceptor]
//! excluded_bases = ["ContentPart", "WidgetBase"]
//!
//! [dispatch]
//! isolate_failures = true
//! ```

use crate::error::{QuickPartsError, QuickPartsResult};
use qp_codec::{NullTextPolicy, ValueCodec};
use qp_logic::DispatchConfig;
use qp_parts::InterceptorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Codec settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Handling of `"null"` text read for a non-nullable property
    pub null_text_policy: NullTextPolicy,
}

impl CodecConfig {
    /// Build the configured codec
    #[inline]
    #[must_use]
    pub fn codec(&self) -> ValueCodec {
        ValueCodec::new().with_null_text_policy(self.null_text_policy)
    }
}

/// QuickParts configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickPartsConfig {
    /// Codec settings
    pub codec: CodecConfig,
    /// Interception settings
    pub interceptor: InterceptorConfig,
    /// Display logic settings
    pub dispatch: DispatchConfig,
}

impl QuickPartsConfig {
    /// Create default config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With null text policy
    #[inline]
    #[must_use]
    pub fn with_null_text_policy(mut self, policy: NullTextPolicy) -> Self {
        self.codec.null_text_policy = policy;
        self
    }

    /// With an additional excluded base
    #[must_use]
    pub fn with_excluded_base(mut self, base: impl Into<String>) -> Self {
        self.interceptor = self.interceptor.with_excluded_base(base);
        self
    }

    /// With failure isolation for display logic
    #[inline]
    #[must_use]
    pub fn with_isolate_failures(mut self, isolate: bool) -> Self {
        self.dispatch = self.dispatch.with_isolate_failures(isolate);
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns [`QuickPartsError::Config`] for malformed TOML or unknown values
    pub fn from_toml_str(text: &str) -> QuickPartsResult<Self> {
        toml::from_str(text).map_err(QuickPartsError::config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`QuickPartsError::Io`] if the file cannot be read, or
    /// [`QuickPartsError::Config`] if it does not parse
    pub fn from_file(path: impl AsRef<Path>) -> QuickPartsResult<Self> {
        let path = path.as_ref();
        let text =
            std::fs::read_to_string(path).map_err(|err| QuickPartsError::io_error(path, err))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Serialize to TOML text
    ///
    /// # Errors
    /// Returns [`QuickPartsError::Config`] if serialization fails
    pub fn to_toml_string(&self) -> QuickPartsResult<String> {
        toml::to_string(self).map_err(QuickPartsError::config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = QuickPartsConfig::new();
        assert_eq!(config.codec.null_text_policy, NullTextPolicy::Reject);
        assert_eq!(config.interceptor.excluded_bases, vec!["ContentPart"]);
        assert!(!config.dispatch.isolate_failures);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            QuickPartsConfig::from_toml_str("").unwrap(),
            QuickPartsConfig::default()
        );
    }

    #[test]
    fn partial_toml() {
        let config = QuickPartsConfig::from_toml_str(
            "[codec]\nnull_text_policy = \"use_default\"\n\n[dispatch]\nisolate_failures = true\n",
        )
        .unwrap();
        assert_eq!(config.codec.null_text_policy, NullTextPolicy::UseDefault);
        assert!(config.dispatch.isolate_failures);
        assert_eq!(config.interceptor, InterceptorConfig::default());
    }

    #[test]
    fn builder_survives_toml() {
        let config = QuickPartsConfig::new()
            .with_null_text_policy(NullTextPolicy::UseDefault)
            .with_excluded_base("WidgetBase")
            .with_isolate_failures(true);
        let text = config.to_toml_string().unwrap();
        assert_eq!(QuickPartsConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn bad_policy_is_a_config_error() {
        let err = QuickPartsConfig::from_toml_str("[codec]\nnull_text_policy = \"maybe\"\n")
            .unwrap_err();
        assert!(matches!(err, QuickPartsError::Config(_)));
    }

    #[test]
    fn codec_follows_policy() {
        let codec = CodecConfig {
            null_text_policy: NullTextPolicy::UseDefault,
        }
        .codec();
        assert_eq!(codec.parse::<i32>("null").unwrap(), 0);
    }
}
