//! QuickParts Value Codec
//!
//! Canonical string encoding for part property values.
//!
//! # Core Concepts
//!
//! - [`DeclaredType`]: what a property holds (scalar + nullability)
//! - [`Value`]: a decoded property value
//! - [`ValueCodec`]: `format`/`parse` between values and attribute text
//! - [`InfosetValue`]: Rust types with a fixed declared type
//!
//! Every supported value round-trips: `parse(format(v)) == v`.
//!
//! # Example
//!
//! ```rust
//! use qp_codec::ValueCodec;
//!
//! let codec = ValueCodec::new();
//! assert_eq!(codec.format(&f64::INFINITY).unwrap(), "infinity");
//! assert_eq!(codec.parse::<Option<i32>>("null").unwrap(), None);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod codec;
mod error;
mod kind;
mod text;
mod typed;
mod value;

// Re-exports
pub use codec::{NullTextPolicy, ValueCodec, INFINITY_TEXT, NEG_INFINITY_TEXT, NULL_TEXT};
pub use error::CodecError;
pub use kind::{DeclaredType, EnumType, ScalarType};
pub use typed::{InfosetValue, NullableValue};
pub use value::{min_datetime, Value};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
