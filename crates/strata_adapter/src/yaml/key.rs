//! Mapping key rendering.
//!
//! IR names are strings, while YAML keys can be any node. Scalar keys use
//! their text; collection keys are rendered as compact JSON, so
//! `? [a, b, c]` is named `["a","b","c"]`.

use serde_json::{Map, Number, Value};
use strata_ir::{IrNode, Scalar};
use tracing::debug;

/// Returns the name a mapping value receives from its key.
pub(crate) fn key_text(key: &IrNode) -> String {
    match key {
        IrNode::Scalar(scalar) => match &scalar.value {
            Scalar::String(text) => text.clone(),
            other => other.to_string(),
        },
        IrNode::Text(text) => text.value.clone(),
        IrNode::Cdata(cdata) => cdata.value.clone(),
        IrNode::Comment(comment) => comment.value.clone(),
        IrNode::Object(_) | IrNode::Array(_) => to_json(key).to_string(),
    }
}

/// Converts a node to JSON, leaving out comments.
fn to_json(node: &IrNode) -> Value {
    match node {
        IrNode::Object(object) => {
            let entries = without_comments(&object.children)
                .map(|child| (child.name().unwrap_or_default().to_string(), to_json(child)));
            Value::Object(entries.collect::<Map<_, _>>())
        }
        IrNode::Array(array) => Value::Array(without_comments(&array.value).map(to_json).collect()),
        IrNode::Scalar(scalar) => scalar_to_json(&scalar.value),
        IrNode::Text(_) | IrNode::Cdata(_) | IrNode::Comment(_) => {
            Value::String(key_text(node))
        }
    }
}

fn without_comments(nodes: &[IrNode]) -> impl Iterator<Item = &IrNode> {
    nodes.iter().filter(|node| match node {
        IrNode::Comment(comment) => {
            debug!(comment = %comment.value, "Dropping comment inside a complex mapping key");
            false
        }
        _ => true,
    })
}

fn scalar_to_json(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Null => Value::Null,
        Scalar::Bool(b) => Value::Bool(*b),
        Scalar::Integer(i) => Value::from(*i),
        Scalar::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        Scalar::String(s) => Value::String(s.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn item(value: impl Into<Scalar>) -> IrNode {
        IrNode::scalar(None, None, value.into())
    }

    fn named(name: &str, value: impl Into<Scalar>) -> IrNode {
        IrNode::scalar(Some(name.to_string()), None, value.into())
    }

    #[rstest]
    #[case(item("full name"), "full name")]
    #[case(item(Scalar::Integer(1)), "1")]
    #[case(item(true), "true")]
    #[case(item(Scalar::Null), "null")]
    #[case(item(1.5), "1.5")]
    fn test_scalar_keys(#[case] key: IrNode, #[case] expected: &str) {
        assert_eq!(key_text(&key), expected);
    }

    #[test]
    fn test_sequence_key() {
        let key = IrNode::array(None, vec![item("a"), item("b"), item("c")]);

        assert_eq!(key_text(&key), r#"["a","b","c"]"#);
    }

    #[test]
    fn test_mapping_key_keeps_order_and_drops_comments() {
        let key = IrNode::object(
            None,
            None,
            vec![
                named("y", Scalar::Integer(2)),
                IrNode::comment("ignored"),
                named("x", Scalar::Integer(1)),
            ],
        );

        assert_eq!(key_text(&key), r#"{"y":2,"x":1}"#);
    }
}
