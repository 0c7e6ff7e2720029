//! Error types for infoset documents

use qp_codec::CodecError;

/// Errors raised while loading, saving or reading infosets
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InfosetError {
    /// XML text could not be read or written
    #[error("malformed infoset xml: {reason}")]
    Xml {
        /// What went wrong
        reason: String,
    },

    /// XML text is well-formed but does not describe a single root element
    #[error("invalid infoset structure: {0}")]
    Structure(String),

    /// A stored value could not be encoded or decoded
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl InfosetError {
    /// Create XML error
    pub fn xml(reason: impl ToString) -> Self {
        Self::Xml {
            reason: reason.to_string(),
        }
    }

    /// Create structure error
    pub fn structure(message: impl Into<String>) -> Self {
        Self::Structure(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            InfosetError::xml("unexpected eof").to_string(),
            "malformed infoset xml: unexpected eof"
        );
        assert_eq!(
            InfosetError::structure("no root element").to_string(),
            "invalid infoset structure: no root element"
        );
    }

    #[test]
    fn codec_errors_convert() {
        let err: InfosetError = CodecError::unsupported("Guid").into();
        assert!(matches!(err, InfosetError::Codec(ref e) if e.is_unsupported()));
    }
}
