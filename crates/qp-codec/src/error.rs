//! Codec error types

/// Errors raised while formatting or parsing infoset values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// Type outside the closed set the codec understands
    #[error("unsupported type {type_name}: {reason}")]
    UnsupportedType {
        /// Declared type name
        type_name: String,
        /// What was asked of it
        reason: String,
    },

    /// Stored text cannot be read as the requested type
    #[error("invalid {type_name} text '{text}': {reason}")]
    InvalidFormat {
        /// Requested type name
        type_name: String,
        /// Offending text
        text: String,
        /// Underlying parser message
        reason: String,
    },

    /// Value does not match the declared type
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Declared type name
        expected: String,
        /// Kind of the value supplied
        actual: String,
    },
}

impl CodecError {
    /// Type is not handled at all
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
            reason: "could not handle type".to_string(),
        }
    }

    /// Infinity sentinel requested for a non-floating type
    pub fn infinity_not_supported(type_name: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
            reason: "infinity not supported".to_string(),
        }
    }

    /// Create invalid format error
    pub fn invalid_format(
        type_name: impl Into<String>,
        text: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::InvalidFormat {
            type_name: type_name.into(),
            text: text.into(),
            reason: reason.to_string(),
        }
    }

    /// Create type mismatch error
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Check if this is an [`CodecError::UnsupportedType`]
    #[inline]
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedType { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_display() {
        let err = CodecError::unsupported("Guid");
        assert_eq!(err.to_string(), "unsupported type Guid: could not handle type");
        assert!(err.is_unsupported());
    }

    #[test]
    fn invalid_format_display() {
        let err = CodecError::invalid_format("int", "abc", "invalid digit found in string");
        assert_eq!(
            err.to_string(),
            "invalid int text 'abc': invalid digit found in string"
        );
        assert!(!err.is_unsupported());
    }
}
