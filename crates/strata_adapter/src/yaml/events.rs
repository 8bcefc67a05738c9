//! Event collection and node layout for the YAML adapter.
//!
//! The parser reports each node as an event with a position marker. Every
//! node event (scalar, alias, sequence start, mapping start) is numbered in
//! stream order; both the comment pass and the tree builder use that number
//! to refer to the same node.

use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, ScanError, TScalarStyle};

/// Events of the first document in a stream, with character offsets.
#[derive(Debug, Default)]
pub(crate) struct EventLog {
    pub events: Vec<(Event, usize)>,
    /// Offset where the first document ends.
    pub document_end: Option<usize>,
}

impl MarkedEventReceiver for EventLog {
    fn on_event(&mut self, event: Event, mark: Marker) {
        if self.document_end.is_some() {
            return;
        }
        match event {
            Event::DocumentEnd => self.document_end = Some(mark.index()),
            Event::Scalar(..)
            | Event::Alias(_)
            | Event::SequenceStart(..)
            | Event::SequenceEnd
            | Event::MappingStart(..)
            | Event::MappingEnd => self.events.push((event, mark.index())),
            _ => {}
        }
    }
}

impl EventLog {
    /// Parses the first document of `source`.
    pub fn parse(source: &str) -> Result<Self, ScanError> {
        let mut log = Self::default();
        Parser::new_from_str(source).load(&mut log, false)?;
        Ok(log)
    }
}

/// How a node is reached from its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Role {
    Root,
    Key,
    Value,
    Item,
}

/// The syntactic shape of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    /// A scalar or alias written in the source.
    Leaf,
    /// An implicit empty value (`key:` with nothing after it).
    EmptyLeaf,
    /// An indentation-based sequence or mapping.
    Block,
    /// A bracketed sequence or mapping.
    Flow,
}

/// Position data for one node event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeLayout {
    pub id: usize,
    pub role: Role,
    pub shape: Shape,
    /// Offset where the node starts.
    pub start: usize,
    /// Offset a trailing comment is measured from: the closing bracket of a
    /// flow collection, the start of anything else.
    pub end: usize,
}

/// A scalar whose body may contain `#` without starting a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Opaque {
    Quoted { start: usize, quote: char },
    /// A literal or folded scalar with content; `start` is its first
    /// content character, so its column is the body indentation.
    Block { start: usize },
}

/// Layout of every node in a document, indexed by node id.
#[derive(Debug, Default)]
pub(crate) struct Layout {
    pub nodes: Vec<NodeLayout>,
    /// Quoted and block scalars in source order.
    pub opaque: Vec<Opaque>,
}

enum Kind {
    Sequence,
    Mapping { expect_key: bool },
}

struct Container {
    id: usize,
    kind: Kind,
    /// Set until the first entry arrives for a block mapping, whose start
    /// marker sits after its first key rather than on it.
    pending_start: bool,
}

impl Layout {
    /// Numbers the node events of `log` and records where each node sits.
    pub fn analyze(log: &EventLog, chars: &[char]) -> Self {
        let mut layout = Self::default();
        let mut stack: Vec<Container> = Vec::new();

        for (event, offset) in &log.events {
            let offset = *offset;
            match event {
                Event::Scalar(value, style, _, _) => {
                    let shape = if is_implicit_empty(value, *style, chars, offset) {
                        Shape::EmptyLeaf
                    } else {
                        Shape::Leaf
                    };
                    match style {
                        TScalarStyle::SingleQuoted => layout.opaque.push(Opaque::Quoted {
                            start: offset,
                            quote: '\'',
                        }),
                        TScalarStyle::DoubleQuoted => layout.opaque.push(Opaque::Quoted {
                            start: offset,
                            quote: '"',
                        }),
                        // Without content the marker is on the header line.
                        TScalarStyle::Literal | TScalarStyle::Folded
                            if !value.trim_matches('\n').is_empty() =>
                        {
                            layout.opaque.push(Opaque::Block { start: offset });
                        }
                        _ => {}
                    }
                    layout.resolve_pending(&mut stack, offset);
                    layout.push_node(&stack, shape, offset);
                    complete(&mut stack);
                }
                Event::Alias(_) => {
                    layout.resolve_pending(&mut stack, offset);
                    layout.push_node(&stack, Shape::Leaf, offset);
                    complete(&mut stack);
                }
                Event::SequenceStart(..) | Event::MappingStart(..) => {
                    let bracketed = matches!(chars.get(offset), Some('[' | '{'));
                    let in_flow = stack
                        .last()
                        .is_some_and(|parent| layout.nodes[parent.id].shape == Shape::Flow);
                    let shape = if bracketed || in_flow {
                        Shape::Flow
                    } else {
                        Shape::Block
                    };
                    let (kind, pending_start) = match event {
                        Event::SequenceStart(..) => (Kind::Sequence, false),
                        _ => (Kind::Mapping { expect_key: true }, !bracketed),
                    };
                    if !pending_start {
                        layout.resolve_pending(&mut stack, offset);
                    }
                    let id = layout.push_node(&stack, shape, offset);
                    stack.push(Container {
                        id,
                        kind,
                        pending_start,
                    });
                }
                Event::SequenceEnd | Event::MappingEnd => {
                    if let Some(container) = stack.pop() {
                        let node = &mut layout.nodes[container.id];
                        if node.shape == Shape::Flow {
                            node.end = offset;
                        }
                    }
                    complete(&mut stack);
                }
                _ => {}
            }
        }

        layout
    }

    /// Moves the start of every collection still waiting for its first
    /// entry to `offset`. Those collections sit on top of the stack, each
    /// the first entry of the one below.
    fn resolve_pending(&mut self, stack: &mut [Container], offset: usize) {
        for container in stack.iter_mut().rev() {
            if !container.pending_start {
                break;
            }
            container.pending_start = false;
            let node = &mut self.nodes[container.id];
            node.start = offset;
            if node.shape != Shape::Flow {
                node.end = offset;
            }
        }
    }

    fn push_node(&mut self, stack: &[Container], shape: Shape, offset: usize) -> usize {
        let role = match stack.last().map(|parent| &parent.kind) {
            None => Role::Root,
            Some(Kind::Sequence) => Role::Item,
            Some(Kind::Mapping { expect_key: true }) => Role::Key,
            Some(Kind::Mapping { expect_key: false }) => Role::Value,
        };
        let id = self.nodes.len();
        self.nodes.push(NodeLayout {
            id,
            role,
            shape,
            start: offset,
            end: offset,
        });
        id
    }
}

/// Flips the enclosing mapping between expecting a key and a value.
fn complete(stack: &mut [Container]) {
    if let Some(Container {
        kind: Kind::Mapping { expect_key },
        ..
    }) = stack.last_mut()
    {
        *expect_key = !*expect_key;
    }
}

/// The parser reports a missing value as a plain `~` positioned at the next
/// token; a written `~` sits at its own marker.
fn is_implicit_empty(value: &str, style: TScalarStyle, chars: &[char], offset: usize) -> bool {
    matches!(style, TScalarStyle::Plain) && value == "~" && chars.get(offset) != Some(&'~')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn layout(source: &str) -> Layout {
        let chars: Vec<char> = source.chars().collect();
        let log = EventLog::parse(source).unwrap();
        Layout::analyze(&log, &chars)
    }

    fn summary(layout: &Layout) -> Vec<(Role, Shape, usize)> {
        layout
            .nodes
            .iter()
            .map(|n| (n.role, n.shape, n.start))
            .collect()
    }

    #[test]
    fn test_block_mapping_roles() {
        let layout = layout("a: 1\nb: [x, y]\n");

        assert_eq!(
            summary(&layout),
            vec![
                (Role::Root, Shape::Block, 0),
                (Role::Key, Shape::Leaf, 0),
                (Role::Value, Shape::Leaf, 3),
                (Role::Key, Shape::Leaf, 5),
                (Role::Value, Shape::Flow, 8),
                (Role::Item, Shape::Leaf, 9),
                (Role::Item, Shape::Leaf, 12),
            ]
        );
        // The flow sequence is measured from its closing bracket.
        assert_eq!(layout.nodes[4].end, 13);
    }

    #[test]
    fn test_empty_value_is_marked() {
        let layout = layout("a:\nb: ~\n");

        let shapes: Vec<Shape> = layout.nodes.iter().map(|n| n.shape).collect();
        assert_eq!(
            shapes,
            vec![
                Shape::Block,
                Shape::Leaf,
                Shape::EmptyLeaf,
                Shape::Leaf,
                Shape::Leaf,
            ]
        );
    }

    #[test]
    fn test_opaque_scalars() {
        let layout = layout("a: 'x # y'\nb: |\n  # not a comment\n");

        assert_eq!(
            layout.opaque,
            vec![
                Opaque::Quoted {
                    start: 3,
                    quote: '\''
                },
                Opaque::Block { start: 18 },
            ]
        );
    }

    #[test]
    fn test_empty_block_scalar_is_not_opaque() {
        let layout = layout("a: |
b: >
  text
");

        assert_eq!(layout.opaque, vec![Opaque::Block { start: 12 }]);
    }

    #[test]
    fn test_block_mapping_starts_at_first_key() {
        let layout = layout("person:
  name: x
list:
- k: v
");

        let mappings: Vec<(Role, usize)> = layout
            .nodes
            .iter()
            .filter(|n| n.shape == Shape::Block)
            .map(|n| (n.role, n.start))
            .collect();
        // Root mapping, `person` mapping, `list` sequence, item mapping.
        assert_eq!(
            mappings,
            vec![(Role::Root, 0), (Role::Value, 10), (Role::Value, 26), (Role::Item, 26)]
        );
    }

    #[test]
    fn test_only_first_document() {
        let log = EventLog::parse("a: 1\n---\nb: 2\n").unwrap();

        assert!(log.document_end.is_some());
        // Mapping start, key, value, mapping end.
        assert_eq!(log.events.len(), 4);
    }

    #[test]
    fn test_syntax_error() {
        assert!(EventLog::parse("a: [1, 2").is_err());
    }
}
