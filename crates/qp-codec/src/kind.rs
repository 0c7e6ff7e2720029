//! Declared property types
//!
//! A [`DeclaredType`] is the static description the codec works from: which
//! scalar a property holds and whether it may be absent. It plays the role a
//! reflected property type plays elsewhere, but is a plain value built at
//! compile time.

use crate::error::CodecError;
use std::fmt;
use std::str::FromStr;

/// Fieldless enumeration known to the codec
///
/// Members are stored by name; the discriminant is accepted when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnumType {
    /// Enum type name
    pub name: &'static str,
    /// `(member name, discriminant)` pairs in declaration order
    pub members: &'static [(&'static str, i64)],
}

impl EnumType {
    /// Create enum description
    #[inline]
    #[must_use]
    pub const fn new(name: &'static str, members: &'static [(&'static str, i64)]) -> Self {
        Self { name, members }
    }

    /// Find member by exact name
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&'static str> {
        self.members
            .iter()
            .find(|(member, _)| *member == name)
            .map(|(member, _)| *member)
    }

    /// Find member by discriminant
    #[must_use]
    pub fn member_by_discriminant(&self, discriminant: i64) -> Option<&'static str> {
        self.members
            .iter()
            .find(|(_, value)| *value == discriminant)
            .map(|(member, _)| *member)
    }

    /// Default member: the one with discriminant zero, else the first
    #[must_use]
    pub fn default_member(&self) -> Option<&'static str> {
        self.member_by_discriminant(0)
            .or_else(|| self.members.first().map(|(member, _)| *member))
    }
}

/// Scalar kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    /// UTF-8 text, stored verbatim
    String,
    /// `true` / `false`
    Bool,
    /// Signed 32-bit integer
    Int32,
    /// 64-bit float
    Double,
    /// 32-bit float
    Single,
    /// Base-10 decimal
    Decimal,
    /// UTC timestamp
    DateTime,
    /// Fieldless enum
    Enum(EnumType),
    /// Anything else; the codec refuses it
    Unsupported(&'static str),
}

impl ScalarType {
    /// Type name used in errors and logs
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Int32 => "int",
            Self::Double => "double",
            Self::Single => "float",
            Self::Decimal => "decimal",
            Self::DateTime => "datetime",
            Self::Enum(e) => e.name,
            Self::Unsupported(name) => name,
        }
    }

    /// Whether the codec handles this scalar
    #[inline]
    #[must_use]
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// Whether this is a floating type (accepts the infinity sentinels)
    #[inline]
    #[must_use]
    pub fn is_floating(&self) -> bool {
        matches!(self, Self::Double | Self::Single)
    }
}

/// Declared type of a property: scalar plus nullability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclaredType {
    /// Underlying scalar
    pub scalar: ScalarType,
    /// Whether absence (`null`) is a legal value
    pub nullable: bool,
}

impl DeclaredType {
    /// Non-nullable declared type
    #[inline]
    #[must_use]
    pub const fn required(scalar: ScalarType) -> Self {
        Self {
            scalar,
            nullable: false,
        }
    }

    /// Nullable declared type
    #[inline]
    #[must_use]
    pub const fn nullable(scalar: ScalarType) -> Self {
        Self {
            scalar,
            nullable: true,
        }
    }

    /// Declared type the codec cannot handle
    #[inline]
    #[must_use]
    pub const fn unsupported(name: &'static str) -> Self {
        Self::required(ScalarType::Unsupported(name))
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.scalar.name())
        } else {
            f.write_str(self.scalar.name())
        }
    }
}

impl FromStr for DeclaredType {
    type Err = CodecError;

    /// Parse a scalar kind name such as `int` or `datetime?`
    ///
    /// Enum types carry their members and cannot be named here.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, nullable) = match s.strip_suffix('?') {
            Some(name) => (name, true),
            None => (s, false),
        };

        let scalar = match name {
            "string" => ScalarType::String,
            "bool" => ScalarType::Bool,
            "int" => ScalarType::Int32,
            "double" => ScalarType::Double,
            "float" => ScalarType::Single,
            "decimal" => ScalarType::Decimal,
            "datetime" => ScalarType::DateTime,
            other => return Err(CodecError::unsupported(other)),
        };

        Ok(Self { scalar, nullable })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MOOD: EnumType = EnumType::new("Mood", &[("Calm", 0), ("Busy", 1), ("Away", 5)]);

    #[test]
    fn enum_member_lookup() {
        assert_eq!(MOOD.member("Busy"), Some("Busy"));
        assert_eq!(MOOD.member("busy"), None);
        assert_eq!(MOOD.member_by_discriminant(5), Some("Away"));
        assert_eq!(MOOD.member_by_discriminant(2), None);
    }

    #[test]
    fn enum_default_member_prefers_zero() {
        assert_eq!(MOOD.default_member(), Some("Calm"));

        let shifted = EnumType::new("Shifted", &[("One", 1), ("Two", 2)]);
        assert_eq!(shifted.default_member(), Some("One"));
    }

    #[test]
    fn declared_type_display() {
        assert_eq!(DeclaredType::required(ScalarType::Int32).to_string(), "int");
        assert_eq!(
            DeclaredType::nullable(ScalarType::DateTime).to_string(),
            "datetime?"
        );
        assert_eq!(DeclaredType::unsupported("Guid").to_string(), "Guid");
    }

    #[test]
    fn declared_type_from_str() {
        let parsed: DeclaredType = "decimal?".parse().unwrap();
        assert_eq!(parsed, DeclaredType::nullable(ScalarType::Decimal));

        let parsed: DeclaredType = "float".parse().unwrap();
        assert_eq!(parsed, DeclaredType::required(ScalarType::Single));

        let err = "uuid".parse::<DeclaredType>().unwrap_err();
        assert!(err.is_unsupported());
    }
}
