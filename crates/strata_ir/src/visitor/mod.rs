//! Visitor pattern for IR traversal.
//!
//! [`walk`] visits a node list in pre-order (a node before its children,
//! siblings in source order). It keeps an explicit stack instead of
//! recursing, so arbitrarily deep trees do not consume call stack.
//!
//! # Example
//!
//! ```rust
//! use std::ops::ControlFlow;
//! use strata_ir::{CommentNode, IrNode, Scalar};
//! use strata_ir::visitor::{Visitor, VisitResult, walk};
//!
//! struct CommentCollector {
//!     comments: Vec<String>,
//! }
//!
//! impl Visitor for CommentCollector {
//!     fn visit_comment(&mut self, node: &CommentNode, _depth: usize) -> VisitResult {
//!         self.comments.push(node.value.clone());
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let nodes = vec![
//!     IrNode::comment("first"),
//!     IrNode::object(None, None, vec![IrNode::comment("nested")]),
//! ];
//!
//! let mut collector = CommentCollector { comments: Vec::new() };
//! let _ = walk(&mut collector, &nodes);
//! assert_eq!(collector.comments, vec!["first", "nested"]);
//! ```

use std::ops::ControlFlow;

use crate::{ArrayNode, CdataNode, CommentNode, IrNode, ObjectNode, ScalarNode, TextNode};

/// Result type for visitor methods to control traversal.
///
/// - `ControlFlow::Continue(())` - continue the walk
/// - `ControlFlow::Break(())` - stop traversal early
pub type VisitResult = ControlFlow<()>;

/// Read-only visitor over IR nodes.
///
/// Every method defaults to continuing, so implementors override only the
/// kinds they care about. `depth` is 0 for nodes of the list passed to
/// [`walk`].
pub trait Visitor {
    /// Called for every node before its kind-specific method.
    #[inline]
    fn enter_node(&mut self, _node: &IrNode, _depth: usize) -> VisitResult {
        ControlFlow::Continue(())
    }

    #[inline]
    fn visit_object(&mut self, _node: &ObjectNode, _depth: usize) -> VisitResult {
        ControlFlow::Continue(())
    }

    #[inline]
    fn visit_array(&mut self, _node: &ArrayNode, _depth: usize) -> VisitResult {
        ControlFlow::Continue(())
    }

    #[inline]
    fn visit_scalar(&mut self, _node: &ScalarNode, _depth: usize) -> VisitResult {
        ControlFlow::Continue(())
    }

    #[inline]
    fn visit_text(&mut self, _node: &TextNode, _depth: usize) -> VisitResult {
        ControlFlow::Continue(())
    }

    #[inline]
    fn visit_cdata(&mut self, _node: &CdataNode, _depth: usize) -> VisitResult {
        ControlFlow::Continue(())
    }

    #[inline]
    fn visit_comment(&mut self, _node: &CommentNode, _depth: usize) -> VisitResult {
        ControlFlow::Continue(())
    }
}

/// Walks `nodes` and all their descendants in pre-order.
pub fn walk<V>(visitor: &mut V, nodes: &[IrNode]) -> VisitResult
where
    V: Visitor + ?Sized,
{
    let mut stack: Vec<(&IrNode, usize)> = nodes.iter().rev().map(|node| (node, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        visitor.enter_node(node, depth)?;

        match node {
            IrNode::Object(object) => visitor.visit_object(object, depth)?,
            IrNode::Array(array) => visitor.visit_array(array, depth)?,
            IrNode::Scalar(scalar) => visitor.visit_scalar(scalar, depth)?,
            IrNode::Text(text) => visitor.visit_text(text, depth)?,
            IrNode::Cdata(cdata) => visitor.visit_cdata(cdata, depth)?,
            IrNode::Comment(comment) => visitor.visit_comment(comment, depth)?,
        }

        if let Some(children) = node.children() {
            stack.extend(children.iter().rev().map(|child| (child, depth + 1)));
        }
    }

    ControlFlow::Continue(())
}
