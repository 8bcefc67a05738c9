//! Tree construction for the YAML adapter.

use std::collections::HashMap;

use strata_ir::{IrNode, Scalar};
use tracing::warn;
use yaml_rust2::parser::Event;

use super::comments::Attachments;
use super::key::key_text;
use super::schema::resolve;

/// Upper bound on the nodes copied in for aliases across one document.
pub(crate) const ALIAS_EXPANSION_LIMIT: usize = 100_000;

/// A mapping key waiting for its value.
struct PendingKey {
    id: usize,
    name: String,
}

enum Frame {
    Sequence {
        id: usize,
        anchor: usize,
        items: Vec<IrNode>,
    },
    Mapping {
        id: usize,
        anchor: usize,
        children: Vec<IrNode>,
        key: Option<PendingKey>,
    },
}

/// Folds node events into IR nodes, splicing attached comments in as
/// siblings.
pub(crate) struct TreeBuilder {
    comments: Attachments,
    stack: Vec<Frame>,
    anchors: HashMap<usize, (IrNode, usize)>,
    expanded: usize,
    next_id: usize,
    root: Option<(usize, IrNode)>,
}

impl TreeBuilder {
    pub fn new(comments: Attachments) -> Self {
        Self {
            comments,
            stack: Vec::new(),
            anchors: HashMap::new(),
            expanded: 0,
            next_id: 0,
            root: None,
        }
    }

    /// Consumes one event of the document.
    pub fn event(&mut self, event: &Event) {
        match event {
            Event::Scalar(value, style, anchor, tag) => {
                let id = self.take_id();
                let node = IrNode::scalar(None, None, resolve(value, *style, tag.as_ref()));
                self.complete(id, *anchor, node);
            }
            Event::Alias(anchor) => {
                let id = self.take_id();
                let node = self.expand_alias(*anchor);
                self.complete(id, 0, node);
            }
            Event::SequenceStart(anchor, _) => {
                let id = self.take_id();
                self.stack.push(Frame::Sequence {
                    id,
                    anchor: *anchor,
                    items: Vec::new(),
                });
            }
            Event::MappingStart(anchor, _) => {
                let id = self.take_id();
                self.stack.push(Frame::Mapping {
                    id,
                    anchor: *anchor,
                    children: Vec::new(),
                    key: None,
                });
            }
            Event::SequenceEnd | Event::MappingEnd => match self.stack.pop() {
                Some(Frame::Sequence { id, anchor, items }) => {
                    self.complete(id, anchor, IrNode::array(None, items));
                }
                Some(Frame::Mapping {
                    id,
                    anchor,
                    children,
                    ..
                }) => {
                    self.complete(id, anchor, IrNode::object(None, None, children));
                }
                None => warn!("Collection end without a matching start"),
            },
            _ => {}
        }
    }

    fn take_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Copies the node an alias refers to.
    ///
    /// Once the document has used up [`ALIAS_EXPANSION_LIMIT`], further
    /// aliases become null scalars.
    fn expand_alias(&mut self, anchor: usize) -> IrNode {
        let Some((node, size)) = self.anchors.get(&anchor) else {
            warn!(anchor, "Alias refers to an unknown anchor");
            return IrNode::scalar(None, None, Scalar::Null);
        };

        if self.expanded + size > ALIAS_EXPANSION_LIMIT {
            warn!(
                anchor,
                size,
                expanded = self.expanded,
                "Alias expansion limit reached, emitting null"
            );
            return IrNode::scalar(None, None, Scalar::Null);
        }

        self.expanded += size;
        node.clone()
    }

    /// Hands a finished node to its parent.
    fn complete(&mut self, id: usize, anchor: usize, mut node: IrNode) {
        if anchor != 0 {
            self.anchors.insert(anchor, (node.clone(), node_count(&node)));
        }

        match self.stack.last_mut() {
            None => self.root = Some((id, node)),
            Some(Frame::Sequence { items, .. }) => {
                let before = self.comments.take_before(id);
                let trailing = self.comments.take_trailing(id);
                splice(items, before, node, trailing);
            }
            Some(Frame::Mapping { key: slot @ None, .. }) => {
                *slot = Some(PendingKey {
                    id,
                    name: key_text(&node),
                });
            }
            Some(Frame::Mapping {
                children,
                key: slot @ Some(_),
                ..
            }) => {
                let Some(key) = slot.take() else {
                    return;
                };
                node.set_name(key.name);

                push_comment(children, self.comments.take_before(key.id));
                let before = self.comments.take_before(id);
                let trailing = self.comments.take_trailing(id);
                splice(children, before, node, trailing);
                push_comment(children, self.comments.take_trailing(key.id));
            }
        }
    }

    /// Returns the document's top-level node list.
    ///
    /// A root mapping or sequence is flattened, so its entries become the
    /// top-level nodes.
    pub fn finish(mut self) -> Vec<IrNode> {
        let mut root = Vec::new();

        let Some((id, node)) = self.root.take() else {
            push_comment(&mut root, self.comments.loose.take());
            return root;
        };

        push_comment(&mut root, self.comments.take_before(id));
        match node {
            IrNode::Object(mut object) => root.append(&mut object.children),
            IrNode::Array(mut array) => root.append(&mut array.value),
            other => root.push(other),
        }
        push_comment(&mut root, self.comments.take_trailing(id));
        root
    }
}

/// Counts a node and all of its descendants.
pub(crate) fn node_count(node: &IrNode) -> usize {
    let mut count = 0;
    let mut pending = vec![node];
    while let Some(node) = pending.pop() {
        count += 1;
        if let Some(children) = node.children() {
            pending.extend(children);
        }
    }
    count
}

fn splice(
    siblings: &mut Vec<IrNode>,
    before: Option<String>,
    node: IrNode,
    trailing: Option<String>,
) {
    push_comment(siblings, before);
    siblings.push(node);
    push_comment(siblings, trailing);
}

fn push_comment(siblings: &mut Vec<IrNode>, comment: Option<String>) {
    if let Some(text) = comment {
        siblings.push(IrNode::comment(text));
    }
}
