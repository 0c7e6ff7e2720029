//! The part capability trait
//!
//! Provides [`QuickPart`], implemented by every persistable part type, and
//! [`MemberCall`], the shape of a member invocation routed through a proxy.

use crate::error::PartError;
use crate::schema::{PartSchema, GETTER_PREFIX, SETTER_PREFIX};
use crate::storage::PartStorage;
use qp_codec::Value;
use std::any::Any;
use std::fmt;

/// Access to a part as [`Any`], for downcasting through `dyn QuickPart`
pub trait AsAny: Any {
    /// Borrow as `&dyn Any`
    fn as_any(&self) -> &dyn Any;

    /// Borrow as `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A part whose declared properties live in an attribute document
///
/// Implementors describe their properties with a static [`PartSchema`]. Any
/// other behavior goes in [`QuickPart::invoke`], which receives the part's
/// storage so that computed members can read persisted properties.
///
/// # Example
/// ```rust,ignore
/// #[derive(Debug, Default)]
/// pub struct MapPart;
///
/// static MAP: PartSchema = PartSchema::new(
///     "MapPart",
///     &[PropertyDescriptor::of::<f64>("Latitude")],
/// );
///
/// impl QuickPart for MapPart {
///     fn schema(&self) -> &'static PartSchema {
///         &MAP
///     }
/// }
/// ```
pub trait QuickPart: AsAny + Send + Sync + fmt::Debug {
    /// Static description of this part
    fn schema(&self) -> &'static PartSchema;

    /// Real implementation of members the proxy does not redirect
    ///
    /// # Errors
    /// Returns [`PartError::MemberNotFound`] unless overridden
    fn invoke(&mut self, call: &MemberCall, storage: &PartStorage) -> Result<Value, PartError> {
        let _ = storage;
        Err(PartError::member_not_found(self.schema().name, &call.name))
    }

    /// Rust type name of the concrete part
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A member invocation on a part
#[derive(Debug, Clone, PartialEq)]
pub struct MemberCall {
    /// Type that declares the member
    pub declaring_type: String,

    /// Member name; accessors are `get_<Prop>` / `set_<Prop>`
    pub name: String,

    /// Arguments
    pub args: Vec<Value>,
}

impl MemberCall {
    /// Create member call
    pub fn new(declaring_type: impl Into<String>, name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            declaring_type: declaring_type.into(),
            name: name.into(),
            args,
        }
    }

    /// Getter call for a property
    pub fn getter(declaring_type: impl Into<String>, property: &str) -> Self {
        Self::new(declaring_type, format!("{GETTER_PREFIX}{property}"), Vec::new())
    }

    /// Setter call for a property
    pub fn setter(declaring_type: impl Into<String>, property: &str, value: impl Into<Value>) -> Self {
        Self::new(
            declaring_type,
            format!("{SETTER_PREFIX}{property}"),
            vec![value.into()],
        )
    }
}

impl fmt::Display for MemberCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}({} args)", self.declaring_type, self.name, self.args.len())
    }
}
