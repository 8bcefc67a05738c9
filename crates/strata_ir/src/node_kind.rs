//! Node kind definitions for the IR.

use serde::{Deserialize, Serialize};

/// The six kinds of [`IrNode`](crate::IrNode).
///
/// The serialized form is the lowercase name used as the `type` tag of a
/// serialized node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Named container with optional attributes and heterogeneous children.
    Object,
    /// Ordered list of unnamed items.
    Array,
    /// Leaf holding a primitive value.
    Scalar,
    /// Inline text mixed among element children.
    Text,
    /// Raw character data.
    Cdata,
    /// Freestanding comment.
    Comment,
}

impl NodeKind {
    /// Returns the lowercase tag name of this kind.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Object => "object",
            NodeKind::Array => "array",
            NodeKind::Scalar => "scalar",
            NodeKind::Text => "text",
            NodeKind::Cdata => "cdata",
            NodeKind::Comment => "comment",
        }
    }

    /// Returns true if nodes of this kind hold nested nodes.
    #[inline]
    pub const fn is_container(&self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::Array)
    }

    /// Returns true if nodes of this kind may carry a name.
    #[inline]
    pub const fn is_nameable(&self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::Array | NodeKind::Scalar)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
