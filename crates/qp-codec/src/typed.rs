//! Rust types with a fixed infoset representation
//!
//! [`InfosetValue`] ties a Rust type to its [`DeclaredType`] and converts to
//! and from [`Value`]. It is implemented for the closed scalar set and, via
//! [`NullableValue`], for `Option` of every value type. Enums opt in with
//! [`crate::infoset_enum!`].

use crate::error::CodecError;
use crate::kind::{DeclaredType, ScalarType};
use crate::value::Value;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Type with a canonical infoset representation
pub trait InfosetValue: Sized {
    /// Declared type used for formatting and parsing
    const DECLARED: DeclaredType;

    /// Convert into a dynamic value
    fn to_value(&self) -> Value;

    /// Convert from a dynamic value
    ///
    /// # Errors
    /// Returns [`CodecError::TypeMismatch`] for values of another kind
    fn from_value(value: Value) -> Result<Self, CodecError>;

    /// Value used when nothing has been stored
    ///
    /// # Errors
    /// Returns [`CodecError::UnsupportedType`] when the declared type has no default
    fn default_value() -> Result<Self, CodecError> {
        Self::from_value(Value::default_for(&Self::DECLARED)?)
    }
}

/// Value types whose `Option` is a nullable infoset value
///
/// Strings are excluded: their absence is the empty string.
pub trait NullableValue: InfosetValue {}

impl InfosetValue for String {
    const DECLARED: DeclaredType = DeclaredType::required(ScalarType::String);

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, CodecError> {
        match value {
            Value::String(s) => Ok(s),
            Value::Null => Ok(String::new()),
            other => Err(CodecError::type_mismatch("string", other.kind_name())),
        }
    }
}

macro_rules! scalar_value {
    ($ty:ty, $scalar:ident, $variant:ident) => {
        impl InfosetValue for $ty {
            const DECLARED: DeclaredType = DeclaredType::required(ScalarType::$scalar);

            fn to_value(&self) -> Value {
                Value::$variant(*self)
            }

            fn from_value(value: Value) -> Result<Self, CodecError> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(CodecError::type_mismatch(
                        Self::DECLARED.to_string(),
                        other.kind_name(),
                    )),
                }
            }
        }

        impl NullableValue for $ty {}
    };
}

scalar_value!(bool, Bool, Bool);
scalar_value!(i32, Int32, Int32);
scalar_value!(f64, Double, Double);
scalar_value!(f32, Single, Single);
scalar_value!(Decimal, Decimal, Decimal);
scalar_value!(DateTime<Utc>, DateTime, DateTime);

impl<T: NullableValue> InfosetValue for Option<T> {
    const DECLARED: DeclaredType = DeclaredType::nullable(T::DECLARED.scalar);

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, CodecError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Implement [`InfosetValue`] for a fieldless enum
///
/// Members are stored by name. The enum also becomes a [`NullableValue`], so
/// `Option<Enum>` works as a nullable property type.
///
/// ```rust
/// use qp_codec::{infoset_enum, ValueCodec};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Mood {
///     Calm,
///     Busy,
/// }
///
/// infoset_enum!(Mood { Calm, Busy });
///
/// let codec = ValueCodec::new();
/// assert_eq!(codec.format(&Mood::Busy).unwrap(), "Busy");
/// assert_eq!(codec.parse::<Mood>("Calm").unwrap(), Mood::Calm);
/// ```
#[macro_export]
macro_rules! infoset_enum {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::InfosetValue for $ty {
            const DECLARED: $crate::DeclaredType = $crate::DeclaredType::required(
                $crate::ScalarType::Enum($crate::EnumType::new(
                    stringify!($ty),
                    &[$((stringify!($variant), $ty::$variant as i64)),+],
                )),
            );

            fn to_value(&self) -> $crate::Value {
                match self {
                    $($ty::$variant => $crate::Value::Enum(stringify!($variant)),)+
                }
            }

            fn from_value(
                value: $crate::Value,
            ) -> ::core::result::Result<Self, $crate::CodecError> {
                if let $crate::Value::Enum(name) = &value {
                    $(
                        if *name == stringify!($variant) {
                            return Ok($ty::$variant);
                        }
                    )+
                }
                Err($crate::CodecError::type_mismatch(
                    stringify!($ty),
                    value.kind_name(),
                ))
            }
        }

        impl $crate::NullableValue for $ty {}
    };
}
