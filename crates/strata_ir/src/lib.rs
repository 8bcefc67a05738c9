//! # strata_ir
//!
//! Intermediate Representation (IR) definitions for Strata.
//!
//! This crate provides the node model shared by every format adapter. The IR
//! is a canonical, order-preserving tree that captures a document's content,
//! shape, attributes and inline commentary independently of the format it was
//! written in.
//!
//! ## Architecture
//!
//! - [`IrNode`] is a closed sum type with six kinds: object, array, scalar,
//!   text, cdata and comment
//! - Sibling order in every list is source order, comments included
//! - Comments are standalone nodes, never metadata on another node
//! - [`IrDocument`] wraps the top-level node list with the source format and
//!   an out-of-band metadata map
//!
//! ## Example
//!
//! ```rust
//! use strata_ir::{Attributes, IrDocument, IrNode, Scalar, SourceFormat};
//!
//! let mut doc = IrDocument::new(SourceFormat::Xml);
//! doc.root.push(IrNode::comment("generated"));
//! doc.root.push(IrNode::object(
//!     Some("root".to_string()),
//!     Some(Attributes::new()),
//!     vec![IrNode::scalar(Some("id".to_string()), None, Scalar::Integer(1))],
//! ));
//!
//! assert_eq!(doc.root.len(), 2);
//! ```

mod document;
mod node;
mod node_kind;
mod scalar;
pub mod visitor;

pub use document::{IrDocument, MetaValue, Metadata, SourceFormat};
pub use node::{
    ArrayNode, Attributes, CdataNode, CommentNode, IrNode, ObjectNode, ScalarNode, TextNode,
};
pub use node_kind::NodeKind;
pub use scalar::Scalar;

// Re-export commonly used visitor items for convenience
pub use visitor::{VisitResult, Visitor, walk};
