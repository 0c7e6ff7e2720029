//! Error types for parts, proxies and the type registry

use qp_codec::CodecError;

/// Errors raised by part proxies and the part type registry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartError {
    /// Factory asked for a name nobody registered
    #[error("there is no quick part with the name {name} registered")]
    TypeNotRegistered {
        /// Requested part name
        name: String,
    },

    /// Two registrations share a part name
    #[error("quick part {name} is registered more than once")]
    DuplicateType {
        /// Conflicting part name
        name: String,
    },

    /// Registered name differs from the constructed part's schema name
    #[error("quick part registered as {name} constructs {schema}")]
    NameMismatch {
        /// Registered part name
        name: String,
        /// Schema name of the constructed part
        schema: String,
    },

    /// Member is neither an accessor nor handled by the part itself
    #[error("{part} has no member {member}")]
    MemberNotFound {
        /// Part name
        part: String,
        /// Member name
        member: String,
    },

    /// Typed access with a Rust type other than the property's declared type
    #[error("property {part}.{property} is declared {expected}, accessed as {actual}")]
    TypeMismatch {
        /// Part name
        part: String,
        /// Property name
        property: String,
        /// Declared type
        expected: String,
        /// Requested type
        actual: String,
    },

    /// Member call carried the wrong number of arguments
    #[error("{member} takes {expected} argument(s), got {actual}")]
    ArgumentCount {
        /// Member name
        member: String,
        /// Expected argument count
        expected: usize,
        /// Supplied argument count
        actual: usize,
    },

    /// Value could not be encoded or decoded
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl PartError {
    /// Create type-not-registered error
    pub fn type_not_registered(name: impl Into<String>) -> Self {
        Self::TypeNotRegistered { name: name.into() }
    }

    /// Create duplicate-type error
    pub fn duplicate_type(name: impl Into<String>) -> Self {
        Self::DuplicateType { name: name.into() }
    }

    /// Create name-mismatch error
    pub fn name_mismatch(name: impl Into<String>, schema: impl Into<String>) -> Self {
        Self::NameMismatch {
            name: name.into(),
            schema: schema.into(),
        }
    }

    /// Create member-not-found error
    pub fn member_not_found(part: impl Into<String>, member: impl Into<String>) -> Self {
        Self::MemberNotFound {
            part: part.into(),
            member: member.into(),
        }
    }

    /// Create type-mismatch error
    pub fn type_mismatch(
        part: impl Into<String>,
        property: impl Into<String>,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Self::TypeMismatch {
            part: part.into(),
            property: property.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create argument-count error
    pub fn argument_count(member: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ArgumentCount {
            member: member.into(),
            expected,
            actual,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            PartError::type_not_registered("MapPart").to_string(),
            "there is no quick part with the name MapPart registered"
        );
        assert_eq!(
            PartError::member_not_found("MapPart", "Render").to_string(),
            "MapPart has no member Render"
        );
        assert_eq!(
            PartError::type_mismatch("MapPart", "Zoom", "int", "string").to_string(),
            "property MapPart.Zoom is declared int, accessed as string"
        );
    }

    #[test]
    fn codec_errors_pass_through() {
        let err: PartError = CodecError::unsupported("Guid").into();
        assert_eq!(err.to_string(), CodecError::unsupported("Guid").to_string());
    }
}
