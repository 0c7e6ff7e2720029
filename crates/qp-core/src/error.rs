//! Error types for the QuickParts facade

use qp_codec::CodecError;
use qp_infoset::InfosetError;
use qp_logic::LogicError;
use qp_parts::PartError;
use std::path::PathBuf;

/// Main QuickParts error type
#[derive(Debug, thiserror::Error)]
pub enum QuickPartsError {
    /// Value encoding or decoding failed
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// Infoset loading or saving failed
    #[error("infoset error: {0}")]
    Infoset(#[from] InfosetError),

    /// Part creation or property access failed
    #[error("part error: {0}")]
    Part(#[from] PartError),

    /// Display logic failed
    #[error("logic error: {0}")]
    Logic(#[from] LogicError),

    /// Configuration could not be parsed or serialized
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl QuickPartsError {
    /// Create configuration error
    pub fn config(message: impl ToString) -> Self {
        Self::Config(message.to_string())
    }

    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if the error is an unknown part name
    #[inline]
    #[must_use]
    pub fn is_type_not_registered(&self) -> bool {
        matches!(self, Self::Part(PartError::TypeNotRegistered { .. }))
    }

    /// Check if the error is an unsupported value type
    #[must_use]
    pub fn is_unsupported_type(&self) -> bool {
        match self {
            Self::Codec(err) | Self::Part(PartError::Codec(err)) => err.is_unsupported(),
            Self::Infoset(InfosetError::Codec(err)) => err.is_unsupported(),
            _ => false,
        }
    }
}

/// Result alias for QuickParts operations
pub type QuickPartsResult<T> = Result<T, QuickPartsError>;
