//! Value codec
//!
//! Provides [`ValueCodec`], the single place where property values become
//! attribute text and back. The wire format is fixed:
//!
//! | Declared type | Text                                   |
//! |---------------|----------------------------------------|
//! | string        | verbatim                               |
//! | nullable null | `null`                                 |
//! | bool          | `true` / `false`                       |
//! | int           | base-10 digits                         |
//! | double, float | invariant digits, `infinity`/`-infinity` |
//! | decimal       | invariant digits, scale preserved      |
//! | datetime      | `yyyy-MM-ddTHH:mm:ss[.f…]Z`            |
//! | enum          | member name                            |

use crate::error::CodecError;
use crate::kind::{DeclaredType, EnumType, ScalarType};
use crate::text;
use crate::typed::InfosetValue;
use crate::value::Value;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Text stored for an absent nullable value
pub const NULL_TEXT: &str = "null";

/// Text stored for positive infinity
pub const INFINITY_TEXT: &str = "infinity";

/// Text stored for negative infinity
pub const NEG_INFINITY_TEXT: &str = "-infinity";

/// How `null` text is read back for a non-nullable declared type
///
/// Such text shows up when a property was nullable when written and is not
/// any more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullTextPolicy {
    /// Fail with [`CodecError::InvalidFormat`]
    #[default]
    Reject,
    /// Decode as the declared type's default value
    UseDefault,
}

/// Formats and parses property values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueCodec {
    null_text_policy: NullTextPolicy,
}

impl ValueCodec {
    /// Create codec with the default (rejecting) null policy
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            null_text_policy: NullTextPolicy::Reject,
        }
    }

    /// With null text policy
    #[inline]
    #[must_use]
    pub const fn with_null_text_policy(mut self, policy: NullTextPolicy) -> Self {
        self.null_text_policy = policy;
        self
    }

    /// Current null text policy
    #[inline]
    #[must_use]
    pub fn null_text_policy(&self) -> NullTextPolicy {
        self.null_text_policy
    }

    /// Format a typed value
    ///
    /// # Errors
    /// Returns [`CodecError::UnsupportedType`] if `T` is declared unsupported
    pub fn format<T: InfosetValue>(&self, value: &T) -> Result<String, CodecError> {
        self.format_value(&T::DECLARED, &value.to_value())
    }

    /// Parse text as a typed value
    ///
    /// # Errors
    /// Returns error if the text is malformed for `T`
    pub fn parse<T: InfosetValue>(&self, text: &str) -> Result<T, CodecError> {
        T::from_value(self.parse_value(&T::DECLARED, text)?)
    }

    /// Format a value under its declared type
    ///
    /// # Errors
    /// - [`CodecError::UnsupportedType`] for unsupported declared types
    /// - [`CodecError::TypeMismatch`] if the value is of another kind
    /// - [`CodecError::InvalidFormat`] for timestamps outside years 0001-9999
    pub fn format_value(&self, declared: &DeclaredType, value: &Value) -> Result<String, CodecError> {
        let mismatch = || CodecError::type_mismatch(declared.to_string(), value.kind_name());

        let text = match (declared.scalar, value) {
            (ScalarType::Unsupported(name), _) => return Err(CodecError::unsupported(name)),
            (ScalarType::String, Value::String(s)) => s.clone(),
            (_, Value::Null) if declared.nullable => NULL_TEXT.to_string(),
            (ScalarType::String, Value::Null) => String::new(),
            (ScalarType::Bool, Value::Bool(b)) => (if *b { "true" } else { "false" }).to_string(),
            (ScalarType::Int32, Value::Int32(i)) => i.to_string(),
            (ScalarType::Double, Value::Double(d)) => {
                if d.is_infinite() {
                    infinity_text(d.is_sign_positive())
                } else {
                    text::format_f64(*d)
                }
            }
            (ScalarType::Single, Value::Single(f)) => {
                if f.is_infinite() {
                    infinity_text(f.is_sign_positive())
                } else {
                    text::format_f32(*f)
                }
            }
            (ScalarType::Decimal, Value::Decimal(d)) => d.to_string(),
            (ScalarType::DateTime, Value::DateTime(dt)) => match text::format_datetime(dt) {
                Some(text) => text,
                None => {
                    return Err(CodecError::invalid_format(
                        declared.to_string(),
                        dt.to_string(),
                        "year outside 0001-9999",
                    ))
                }
            },
            (ScalarType::Enum(e), Value::Enum(member)) => match e.member(member) {
                Some(member) => member.to_string(),
                None => return Err(mismatch()),
            },
            _ => return Err(mismatch()),
        };
        Ok(text)
    }

    /// Parse text under a declared type
    ///
    /// # Errors
    /// - [`CodecError::UnsupportedType`] for unsupported declared types, or
    ///   infinity sentinels on non-floating types
    /// - [`CodecError::InvalidFormat`] for malformed text
    pub fn parse_value(&self, declared: &DeclaredType, text: &str) -> Result<Value, CodecError> {
        let scalar = declared.scalar;
        if let ScalarType::Unsupported(name) = scalar {
            return Err(CodecError::unsupported(name));
        }
        if scalar == ScalarType::String {
            return Ok(Value::String(text.to_string()));
        }

        if text == NULL_TEXT {
            if declared.nullable {
                return Ok(Value::Null);
            }
            return match self.null_text_policy {
                NullTextPolicy::UseDefault => {
                    tracing::warn!(declared = %declared, "decoding null text as default value");
                    Value::default_for(declared)
                }
                NullTextPolicy::Reject => Err(CodecError::invalid_format(
                    declared.to_string(),
                    text,
                    "null is not a value of a non-nullable type",
                )),
            };
        }

        if text == INFINITY_TEXT {
            return match scalar {
                ScalarType::Double => Ok(Value::Double(f64::INFINITY)),
                ScalarType::Single => Ok(Value::Single(f32::INFINITY)),
                _ => Err(CodecError::infinity_not_supported(scalar.name())),
            };
        }
        if text == NEG_INFINITY_TEXT {
            return match scalar {
                ScalarType::Double => Ok(Value::Double(f64::NEG_INFINITY)),
                ScalarType::Single => Ok(Value::Single(f32::NEG_INFINITY)),
                _ => Err(CodecError::infinity_not_supported(scalar.name())),
            };
        }

        let invalid = |reason: &dyn ToString| {
            CodecError::invalid_format(declared.to_string(), text, reason.to_string())
        };

        let value = match scalar {
            ScalarType::Bool => Value::Bool(text == "true"),
            ScalarType::Int32 => Value::Int32(text.trim().parse::<i32>().map_err(|e| invalid(&e))?),
            ScalarType::Double => Value::Double(text.trim().parse::<f64>().map_err(|e| invalid(&e))?),
            ScalarType::Single => Value::Single(text.trim().parse::<f32>().map_err(|e| invalid(&e))?),
            ScalarType::Decimal => Value::Decimal(parse_decimal(text).map_err(|e| invalid(&e))?),
            ScalarType::DateTime => {
                Value::DateTime(text::parse_datetime(text).map_err(|e| invalid(&e))?)
            }
            ScalarType::Enum(e) => {
                Value::Enum(parse_enum(&e, text).ok_or_else(|| invalid(&"no such member"))?)
            }
            ScalarType::String | ScalarType::Unsupported(_) => {
                return Err(CodecError::unsupported(scalar.name()))
            }
        };
        Ok(value)
    }
}

fn infinity_text(positive: bool) -> String {
    let text = if positive { INFINITY_TEXT } else { NEG_INFINITY_TEXT };
    text.to_string()
}

fn parse_decimal(text: &str) -> Result<Decimal, rust_decimal::Error> {
    let text = text.trim();
    Decimal::from_str(text).or_else(|err| Decimal::from_scientific(text).map_err(|_| err))
}

fn parse_enum(enum_type: &EnumType, text: &str) -> Option<&'static str> {
    let text = text.trim();
    enum_type.member(text).or_else(|| {
        text.parse::<i64>()
            .ok()
            .and_then(|d| enum_type.member_by_discriminant(d))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    const LEVEL: EnumType = EnumType::new("Level", &[("Low", 0), ("High", 3)]);

    fn required(scalar: ScalarType) -> DeclaredType {
        DeclaredType::required(scalar)
    }

    fn nullable(scalar: ScalarType) -> DeclaredType {
        DeclaredType::nullable(scalar)
    }

    #[test]
    fn string_passes_through() {
        let codec = ValueCodec::new();
        let declared = required(ScalarType::String);
        assert_eq!(codec.format_value(&declared, &Value::from("a <b>")).unwrap(), "a <b>");
        assert_eq!(
            codec.parse_value(&declared, "null").unwrap(),
            Value::String("null".to_string())
        );
    }

    #[test]
    fn null_for_nullable() {
        let codec = ValueCodec::new();
        let declared = nullable(ScalarType::Int32);
        assert_eq!(codec.format_value(&declared, &Value::Null).unwrap(), "null");
        assert!(codec.parse_value(&declared, "null").unwrap().is_null());
    }

    #[test]
    fn null_for_non_nullable_rejected_by_default() {
        let codec = ValueCodec::new();
        let err = codec
            .parse_value(&required(ScalarType::Int32), "null")
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidFormat { .. }));
    }

    #[test]
    fn null_for_non_nullable_as_default() {
        let codec = ValueCodec::new().with_null_text_policy(NullTextPolicy::UseDefault);
        assert_eq!(
            codec.parse_value(&required(ScalarType::Int32), "null").unwrap(),
            Value::Int32(0)
        );
        assert_eq!(
            codec.parse_value(&required(ScalarType::Bool), "null").unwrap(),
            Value::Bool(false)
        );
    }

    #[test]
    fn formatting_null_into_value_type_is_mismatch() {
        let codec = ValueCodec::new();
        let err = codec
            .format_value(&required(ScalarType::Double), &Value::Null)
            .unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn bools_are_lowercase() {
        let codec = ValueCodec::new();
        let declared = required(ScalarType::Bool);
        assert_eq!(codec.format_value(&declared, &Value::Bool(true)).unwrap(), "true");
        assert_eq!(codec.format_value(&declared, &Value::Bool(false)).unwrap(), "false");
        assert_eq!(codec.parse_value(&declared, "true").unwrap(), Value::Bool(true));
        assert_eq!(codec.parse_value(&declared, "True").unwrap(), Value::Bool(false));
    }

    #[test]
    fn infinity_sentinels() {
        let codec = ValueCodec::new();
        let double = required(ScalarType::Double);
        let single = nullable(ScalarType::Single);

        assert_eq!(
            codec.format_value(&double, &Value::Double(f64::INFINITY)).unwrap(),
            "infinity"
        );
        assert_eq!(
            codec.format_value(&single, &Value::Single(f32::NEG_INFINITY)).unwrap(),
            "-infinity"
        );
        assert_eq!(
            codec.parse_value(&double, "-infinity").unwrap(),
            Value::Double(f64::NEG_INFINITY)
        );
        assert_eq!(
            codec.parse_value(&single, "infinity").unwrap(),
            Value::Single(f32::INFINITY)
        );
    }

    #[test]
    fn infinity_on_other_types_is_unsupported() {
        let codec = ValueCodec::new();
        for scalar in [ScalarType::Int32, ScalarType::Decimal, ScalarType::DateTime] {
            assert!(codec
                .parse_value(&required(scalar), "infinity")
                .unwrap_err()
                .is_unsupported());
            assert!(codec
                .parse_value(&nullable(scalar), "-infinity")
                .unwrap_err()
                .is_unsupported());
        }
    }

    #[test]
    fn decimals_keep_scale() {
        let codec = ValueCodec::new();
        let declared = required(ScalarType::Decimal);
        let value = codec.parse_value(&declared, "1.50").unwrap();
        assert_eq!(codec.format_value(&declared, &value).unwrap(), "1.50");
    }

    #[test]
    fn integers_tolerate_whitespace() {
        let codec = ValueCodec::new();
        assert_eq!(
            codec.parse_value(&required(ScalarType::Int32), " -42 ").unwrap(),
            Value::Int32(-42)
        );
    }

    #[test]
    fn malformed_numbers_are_invalid() {
        let codec = ValueCodec::new();
        for scalar in [
            ScalarType::Int32,
            ScalarType::Double,
            ScalarType::Single,
            ScalarType::Decimal,
            ScalarType::DateTime,
        ] {
            let err = codec.parse_value(&required(scalar), "twelve").unwrap_err();
            assert!(matches!(err, CodecError::InvalidFormat { .. }), "{scalar:?}");
        }
    }

    #[test]
    fn int_overflow_is_invalid() {
        let codec = ValueCodec::new();
        let err = codec
            .parse_value(&required(ScalarType::Int32), "2147483648")
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidFormat { .. }));
    }

    #[test]
    fn enums_by_name_or_discriminant() {
        let codec = ValueCodec::new();
        let declared = required(ScalarType::Enum(LEVEL));
        assert_eq!(codec.format_value(&declared, &Value::Enum("High")).unwrap(), "High");
        assert_eq!(codec.parse_value(&declared, "High").unwrap(), Value::Enum("High"));
        assert_eq!(codec.parse_value(&declared, "3").unwrap(), Value::Enum("High"));
        assert!(codec.parse_value(&declared, "Medium").is_err());
    }

    #[test]
    fn enum_member_of_other_enum_is_mismatch() {
        let codec = ValueCodec::new();
        let declared = required(ScalarType::Enum(LEVEL));
        let err = codec.format_value(&declared, &Value::Enum("Calm")).unwrap_err();
        assert!(matches!(err, CodecError::TypeMismatch { .. }));
    }

    #[test]
    fn datetimes_are_utc() {
        let codec = ValueCodec::new();
        let declared = required(ScalarType::DateTime);
        let dt = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(
            codec.format_value(&declared, &Value::DateTime(dt)).unwrap(),
            "2023-12-31T23:59:59Z"
        );
    }

    #[test]
    fn unsupported_types_fail_both_ways() {
        let codec = ValueCodec::new();
        let declared = DeclaredType::unsupported("Guid");
        assert!(codec
            .format_value(&declared, &Value::from("x"))
            .unwrap_err()
            .is_unsupported());
        assert!(codec.parse_value(&declared, "x").unwrap_err().is_unsupported());
    }

    #[test]
    fn mismatched_value_kind() {
        let codec = ValueCodec::new();
        let err = codec
            .format_value(&required(ScalarType::Int32), &Value::from("7"))
            .unwrap_err();
        assert_eq!(err.to_string(), "type mismatch: expected int, got string");
    }

}
