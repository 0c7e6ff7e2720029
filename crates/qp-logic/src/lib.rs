//! QuickParts Logic
//!
//! Type-indexed display logic for parts.
//!
//! # Core Concepts
//!
//! - [`PartLogic<P>`]: contributes display parameters for parts of type `P`
//! - [`LogicRegistry`]: providers in registration order, indexed by part name
//! - [`LogicDispatcher`]: runs the providers for a part and merges their maps
//!
//! Merging is last-write-wins: when two providers emit the same key, the one
//! registered later decides the value.
//!
//! # Example
//!
//! ```rust,ignore
//! let registry = LogicRegistry::builder()
//!     .with_logic::<MapPart, _>(MapLogic)
//!     .build();
//! let dispatcher = LogicDispatcher::new(Arc::new(registry), DispatchConfig::default());
//! let parameters = dispatcher.compute_parameters(&map_part)?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod dispatcher;
mod error;
mod logic;
mod registry;

// Re-exports
pub use dispatcher::{DispatchConfig, LogicDispatcher};
pub use error::{LogicError, ProviderError};
pub use logic::{ParameterMap, PartLogic};
pub use registry::{LogicEntry, LogicRegistry, LogicRegistryBuilder};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
