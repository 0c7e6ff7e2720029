//! Dynamically typed property values

use crate::error::CodecError;
use crate::kind::{DeclaredType, ScalarType};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use std::fmt;

/// A property value in decoded form
///
/// This is what flows through intercepted accessors: setters receive one,
/// getters produce one. Typed callers convert with [`crate::InfosetValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence, for nullable declared types
    Null,
    /// Text
    String(String),
    /// Boolean
    Bool(bool),
    /// Signed 32-bit integer
    Int32(i32),
    /// 64-bit float
    Double(f64),
    /// 32-bit float
    Single(f32),
    /// Decimal
    Decimal(Decimal),
    /// UTC timestamp
    DateTime(DateTime<Utc>),
    /// Enum member name
    Enum(&'static str),
}

impl Value {
    /// Short name of the value's kind, for mismatch errors
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::String(_) => "string",
            Self::Bool(_) => "bool",
            Self::Int32(_) => "int",
            Self::Double(_) => "double",
            Self::Single(_) => "float",
            Self::Decimal(_) => "decimal",
            Self::DateTime(_) => "datetime",
            Self::Enum(_) => "enum",
        }
    }

    /// Check for [`Value::Null`]
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Default value of a declared type
    ///
    /// Nullable types default to `Null`; value types to their zero; strings
    /// to the empty string; datetimes to `0001-01-01T00:00:00Z`; enums to the
    /// member with discriminant zero (or the first member).
    ///
    /// # Errors
    /// Returns [`CodecError::UnsupportedType`] for unsupported declared types
    pub fn default_for(declared: &DeclaredType) -> Result<Self, CodecError> {
        if let ScalarType::Unsupported(name) = declared.scalar {
            return Err(CodecError::unsupported(name));
        }
        if declared.nullable {
            return Ok(Self::Null);
        }

        let value = match declared.scalar {
            ScalarType::String => Self::String(String::new()),
            ScalarType::Bool => Self::Bool(false),
            ScalarType::Int32 => Self::Int32(0),
            ScalarType::Double => Self::Double(0.0),
            ScalarType::Single => Self::Single(0.0),
            ScalarType::Decimal => Self::Decimal(Decimal::ZERO),
            ScalarType::DateTime => Self::DateTime(min_datetime()),
            ScalarType::Enum(e) => match e.default_member() {
                Some(member) => Self::Enum(member),
                None => return Err(CodecError::unsupported(e.name)),
            },
            ScalarType::Unsupported(name) => return Err(CodecError::unsupported(name)),
        };
        Ok(value)
    }
}

/// Earliest representable datetime in stored data: `0001-01-01T00:00:00Z`
#[must_use]
pub fn min_datetime() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::default())
        .and_utc()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::String(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int32(i) => write!(f, "{i}"),
            Self::Double(d) => write!(f, "{d}"),
            Self::Single(s) => write!(f, "{s}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Enum(member) => f.write_str(member),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int32(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Single(value)
    }
}

impl From<Decimal> for Value {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Self::DateTime(value)
    }
}
