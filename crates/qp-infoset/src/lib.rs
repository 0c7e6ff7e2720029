//! QuickParts Infoset
//!
//! Hierarchical attribute documents that back part properties.
//!
//! # Core Concepts
//!
//! - [`AttributeDocument`]: the get/set contract parts persist through
//! - [`Element`]: named node with attributes, children and text
//! - [`Infoset`]: thread-safe element tree rooted at `<Data>`, XML round-trip
//! - [`InfosetPart`]: item + version infosets selected by [`StorageScope`]
//!
//! # Example
//!
//! ```rust
//! use qp_infoset::{AttributeDocument, Infoset};
//!
//! let infoset = Infoset::new();
//! infoset.set("BlogPart", "Title", "Hello".to_string());
//! assert_eq!(infoset.to_xml().unwrap(), r#"<Data><BlogPart Title="Hello"/></Data>"#);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod document;
mod element;
mod error;
mod infoset;
mod part;
mod typed;
mod xml;

// Re-exports
pub use document::AttributeDocument;
pub use element::Element;
pub use error::InfosetError;
pub use infoset::{Infoset, ROOT_ELEMENT};
pub use part::{InfosetPart, StorageScope};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
