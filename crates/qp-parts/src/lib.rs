//! QuickParts Parts
//!
//! Transparent persistence for part properties.
//!
//! # Core Concepts
//!
//! - [`QuickPart`]: a part type with a static [`PartSchema`]
//! - [`PartProxy`]: wraps a part; accessor calls read and write the document
//! - [`PropertyInterceptor`]: creates proxies, owns the [`AccessorCache`]
//! - [`PartTypeRegistry`] / [`PartFactory`]: part name → wrapped instance
//!
//! # Example
//!
//! ```rust,ignore
//! let factory = PartFactory::new(Arc::new(registry), Arc::new(PropertyInterceptor::default()));
//! let mut map = factory.create("MapPart")?;
//! map.dispatch(&MemberCall::setter("MapPart", "Zoom", 12))?;
//! assert_eq!(map.get::<i32>("Zoom")?, 12);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod accessor;
mod error;
mod factory;
mod part;
mod proxy;
mod registry;
mod schema;
mod storage;

// Re-exports
pub use accessor::{AccessorCache, AccessorKind, AccessorTable};
pub use error::PartError;
pub use factory::PartFactory;
pub use part::{AsAny, MemberCall, QuickPart};
pub use proxy::{InterceptorConfig, PartProxy, PropertyInterceptor};
pub use registry::{PartTypeRegistry, TypeRegistration};
pub use schema::{PartSchema, PropertyDescriptor, CONTENT_PART, GETTER_PREFIX, SETTER_PREFIX};
pub use storage::PartStorage;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
