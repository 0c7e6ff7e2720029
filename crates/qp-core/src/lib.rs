//! QuickParts Core - transparent part persistence
//!
//! Ties the engine together:
//! - Registers persistable part types by name
//! - Wraps new instances so declared properties live in an attribute document
//! - Dispatches display logic by exact part type
//! - Loads settings from TOML
//!
//! # Example
//!
//! ```rust,ignore
//! use qp_core::prelude::*;
//!
//! let manager = QuickPartsManager::builder()
//!     .with_part::<MapPart>()
//!     .with_logic::<MapPart, _>(MapLogic)
//!     .build()?;
//!
//! let map = manager.create("MapPart")?;
//! map.set("Zoom", &12)?;
//! let parameters = manager.compute_display_parameters(&map)?;
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

// Core modules
pub mod config;
pub mod error;
pub mod manager;

// Re-exports for convenience
pub use config::{CodecConfig, QuickPartsConfig};
pub use error::{QuickPartsError, QuickPartsResult};
pub use manager::{
    shape_name, PartTypeInfo, QuickPartsBuilder, QuickPartsManager, TypedFactory, SHAPE_PREFIX,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for defining and using quick parts
    pub use crate::{QuickPartsConfig, QuickPartsError, QuickPartsManager, QuickPartsResult};
    pub use qp_codec::{infoset_enum, InfosetValue, NullTextPolicy, Value, ValueCodec};
    pub use qp_infoset::{AttributeDocument, Infoset, InfosetPart, StorageScope};
    pub use qp_logic::{ParameterMap, PartLogic, ProviderError};
    pub use qp_parts::{
        MemberCall, PartError, PartProxy, PartSchema, PartStorage, PropertyDescriptor, QuickPart,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
