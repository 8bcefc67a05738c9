//! IrNode definition.
//!
//! The core tree node produced by every adapter.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{NodeKind, Scalar};

/// Ordered attribute map. Insertion order is source order.
pub type Attributes = IndexMap<String, Scalar>;

/// A node in the IR tree.
///
/// `IrNode` is a closed sum type: every construct of every supported format
/// is expressed as one of these six kinds. It serializes with an internal
/// `type` tag, so an empty XML element `<root/>` at the top level becomes
/// `{"type":"object","name":"root","attrs":{},"children":[]}`.
///
/// # Example
///
/// ```rust
/// use strata_ir::{IrNode, NodeKind, Scalar};
///
/// let node = IrNode::array(
///     Some("nums".to_string()),
///     vec![
///         IrNode::scalar(None, None, Scalar::Integer(1)),
///         IrNode::scalar(None, None, Scalar::Integer(2)),
///     ],
/// );
///
/// assert_eq!(node.kind(), NodeKind::Array);
/// assert_eq!(node.name(), Some("nums"));
/// assert_eq!(node.children().map(|c| c.len()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IrNode {
    /// A named container with heterogeneous, ordered children.
    Object(ObjectNode),
    /// An ordered list of unnamed items.
    Array(ArrayNode),
    /// A leaf value.
    Scalar(ScalarNode),
    /// Inline text mixed among element children.
    Text(TextNode),
    /// Raw character data, never trimmed or coerced.
    Cdata(CdataNode),
    /// A freestanding comment.
    Comment(CommentNode),
}

/// Payload of [`IrNode::Object`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// XML element attributes. YAML objects carry none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attributes>,
    pub children: Vec<IrNode>,
}

/// Payload of [`IrNode::Array`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArrayNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub value: Vec<IrNode>,
}

// Containers release their descendants through an explicit stack, so
// dropping a deeply nested tree does not overflow the call stack.
impl Drop for ObjectNode {
    fn drop(&mut self) {
        release(std::mem::take(&mut self.children));
    }
}

impl Drop for ArrayNode {
    fn drop(&mut self) {
        release(std::mem::take(&mut self.value));
    }
}

fn release(mut pending: Vec<IrNode>) {
    while let Some(mut node) = pending.pop() {
        match &mut node {
            IrNode::Object(object) => pending.append(&mut object.children),
            IrNode::Array(array) => pending.append(&mut array.value),
            IrNode::Scalar(_) | IrNode::Text(_) | IrNode::Cdata(_) | IrNode::Comment(_) => {}
        }
    }
}

/// Payload of [`IrNode::Scalar`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attrs: Option<Attributes>,
    pub value: Scalar,
}

/// Payload of [`IrNode::Text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub value: String,
}

/// Payload of [`IrNode::Cdata`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdataNode {
    pub value: String,
}

/// Payload of [`IrNode::Comment`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentNode {
    pub value: String,
}

impl IrNode {
    /// Creates an object node.
    #[inline]
    pub fn object(name: Option<String>, attrs: Option<Attributes>, children: Vec<IrNode>) -> Self {
        Self::Object(ObjectNode {
            name,
            attrs,
            children,
        })
    }

    /// Creates an array node.
    #[inline]
    pub fn array(name: Option<String>, value: Vec<IrNode>) -> Self {
        Self::Array(ArrayNode { name, value })
    }

    /// Creates a scalar node.
    #[inline]
    pub fn scalar(name: Option<String>, attrs: Option<Attributes>, value: Scalar) -> Self {
        Self::Scalar(ScalarNode { name, attrs, value })
    }

    /// Creates a text node.
    #[inline]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(TextNode {
            value: value.into(),
        })
    }

    /// Creates a CDATA node.
    #[inline]
    pub fn cdata(value: impl Into<String>) -> Self {
        Self::Cdata(CdataNode {
            value: value.into(),
        })
    }

    /// Creates a comment node.
    #[inline]
    pub fn comment(value: impl Into<String>) -> Self {
        Self::Comment(CommentNode {
            value: value.into(),
        })
    }

    /// Returns the kind of this node.
    pub const fn kind(&self) -> NodeKind {
        match self {
            IrNode::Object(_) => NodeKind::Object,
            IrNode::Array(_) => NodeKind::Array,
            IrNode::Scalar(_) => NodeKind::Scalar,
            IrNode::Text(_) => NodeKind::Text,
            IrNode::Cdata(_) => NodeKind::Cdata,
            IrNode::Comment(_) => NodeKind::Comment,
        }
    }

    /// Returns the name of this node, if it was reached through a named
    /// association.
    pub fn name(&self) -> Option<&str> {
        match self {
            IrNode::Object(node) => node.name.as_deref(),
            IrNode::Array(node) => node.name.as_deref(),
            IrNode::Scalar(node) => node.name.as_deref(),
            IrNode::Text(_) | IrNode::Cdata(_) | IrNode::Comment(_) => None,
        }
    }

    /// Sets the name of a nameable node.
    ///
    /// Returns false (and leaves the node untouched) for text, cdata and
    /// comment nodes.
    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let slot = match self {
            IrNode::Object(node) => &mut node.name,
            IrNode::Array(node) => &mut node.name,
            IrNode::Scalar(node) => &mut node.name,
            IrNode::Text(_) | IrNode::Cdata(_) | IrNode::Comment(_) => return false,
        };
        *slot = Some(name.into());
        true
    }

    /// Returns the attributes of an object or scalar node.
    pub fn attrs(&self) -> Option<&Attributes> {
        match self {
            IrNode::Object(node) => node.attrs.as_ref(),
            IrNode::Scalar(node) => node.attrs.as_ref(),
            IrNode::Array(_) | IrNode::Text(_) | IrNode::Cdata(_) | IrNode::Comment(_) => None,
        }
    }

    /// Returns the nested nodes of a container.
    ///
    /// This is `children` for objects and `value` for arrays.
    pub fn children(&self) -> Option<&[IrNode]> {
        match self {
            IrNode::Object(node) => Some(&node.children),
            IrNode::Array(node) => Some(&node.value),
            IrNode::Scalar(_) | IrNode::Text(_) | IrNode::Cdata(_) | IrNode::Comment(_) => None,
        }
    }

    /// Returns the scalar value of a scalar node.
    pub fn scalar_value(&self) -> Option<&Scalar> {
        match self {
            IrNode::Scalar(node) => Some(&node.value),
            _ => None,
        }
    }

    /// Returns the string payload of a text, cdata or comment node.
    pub fn text_value(&self) -> Option<&str> {
        match self {
            IrNode::Text(node) => Some(&node.value),
            IrNode::Cdata(node) => Some(&node.value),
            IrNode::Comment(node) => Some(&node.value),
            IrNode::Object(_) | IrNode::Array(_) | IrNode::Scalar(_) => None,
        }
    }

    /// Returns true if this is a comment node.
    #[inline]
    pub const fn is_comment(&self) -> bool {
        matches!(self, IrNode::Comment(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_object_serialization() {
        let node = IrNode::object(Some("root".to_string()), Some(Attributes::new()), vec![]);
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(
            json,
            r#"{"type":"object","name":"root","attrs":{},"children":[]}"#
        );
    }

    #[test]
    fn test_optional_fields_omitted() {
        let node = IrNode::scalar(None, None, Scalar::Integer(3));
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"type":"scalar","value":3}"#);
    }

    #[test]
    fn test_attribute_order_preserved() {
        let mut attrs = Attributes::new();
        attrs.insert("z".to_string(), Scalar::from("last"));
        attrs.insert("a".to_string(), Scalar::Integer(1));
        let node = IrNode::scalar(Some("b".to_string()), Some(attrs), Scalar::from(""));

        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(
            json,
            r#"{"type":"scalar","name":"b","attrs":{"z":"last","a":1},"value":""}"#
        );
    }

    #[test]
    fn test_round_trip_mixed_children() {
        let node = IrNode::object(
            Some("root".to_string()),
            Some(Attributes::new()),
            vec![
                IrNode::text("Hello"),
                IrNode::comment("note"),
                IrNode::cdata(" 42 "),
                IrNode::array(None, vec![IrNode::scalar(None, None, Scalar::Null)]),
            ],
        );

        let json = serde_json::to_string(&node).unwrap();
        let back: IrNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_drop_deep_tree() {
        let mut node = IrNode::scalar(None, None, Scalar::Null);
        for depth in 0..200_000 {
            node = if depth % 2 == 0 {
                IrNode::array(None, vec![node])
            } else {
                IrNode::object(None, None, vec![IrNode::comment("c"), node])
            };
        }

        drop(node);
    }

    #[test]
    fn test_accessors() {
        let mut node = IrNode::scalar(None, None, Scalar::Bool(true));
        assert_eq!(node.kind(), NodeKind::Scalar);
        assert_eq!(node.name(), None);
        assert!(node.set_name("flag"));
        assert_eq!(node.name(), Some("flag"));
        assert_eq!(node.scalar_value(), Some(&Scalar::Bool(true)));
        assert!(node.children().is_none());

        let mut comment = IrNode::comment("c");
        assert!(!comment.set_name("nope"));
        assert!(comment.is_comment());
        assert_eq!(comment.text_value(), Some("c"));
        assert_eq!(comment.name(), None);
    }
}
