//! Comment recovery for the YAML adapter.
//!
//! The parser discards comments, so they are found by scanning the source
//! and then attached to the node events they belong to:
//!
//! - A comment on a line of its own is attached *before* the first node
//!   that starts after it. When a collection and its first entry start at
//!   the same place, the collection takes it.
//! - A comment after content on the same line *trails* the last scalar,
//!   alias or flow collection that finished before it on that line. If that
//!   content is a mapping key or a block collection, the comment goes before
//!   the next node instead.
//! - Comments with nothing after them trail the document root.
//!
//! Comments attached to the same side of the same node merge into one
//! block, one line per comment.

use std::collections::BTreeMap;

use super::events::{Layout, NodeLayout, Opaque, Role, Shape};

/// A comment found in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawComment {
    /// Offset of the `#`.
    pub offset: usize,
    pub line: usize,
    /// True when only whitespace precedes the `#` on its line.
    pub own_line: bool,
    /// Everything after the `#` up to the end of the line.
    pub text: String,
}

/// Character offsets of line starts.
pub(crate) struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(chars: &[char]) -> Self {
        let mut starts = vec![0];
        starts.extend(
            chars
                .iter()
                .enumerate()
                .filter(|(_, c)| **c == '\n')
                .map(|(i, _)| i + 1),
        );
        Self { starts }
    }

    /// Zero-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset) - 1
    }

    pub fn start_of(&self, line: usize) -> usize {
        self.starts[line]
    }
}

/// Finds the comments in `chars[..limit]`.
///
/// Quoted and block scalars listed in `opaque` are skipped, so a `#` inside
/// them is not mistaken for a comment.
pub(crate) fn scan(
    chars: &[char],
    lines: &LineIndex,
    opaque: &[Opaque],
    limit: usize,
) -> Vec<RawComment> {
    let limit = limit.min(chars.len());
    let mut comments = Vec::new();
    let mut opaque = opaque.iter().peekable();
    let mut pos = 0;

    while pos < limit {
        while opaque.next_if(|o| o.start() < pos).is_some() {}

        if let Some(scalar) = opaque.next_if(|o| o.start() == pos) {
            match *scalar {
                Opaque::Quoted { quote, .. } => pos = skip_quoted(chars, pos, quote),
                Opaque::Block { .. } => {
                    let line_start = lines.start_of(lines.line_of(pos));
                    pos = skip_block_body(chars, line_start, pos - line_start);
                }
            }
            continue;
        }

        match chars[pos] {
            '#' if pos == 0 || chars[pos - 1].is_whitespace() => {
                let end = line_end(chars, pos);
                let line = lines.line_of(pos);
                let line_start = lines.start_of(line);
                let text: String = chars[pos + 1..end].iter().collect();
                comments.push(RawComment {
                    offset: pos,
                    line,
                    own_line: chars[line_start..pos].iter().all(|c| c.is_whitespace()),
                    text: text.trim_end_matches('\r').to_string(),
                });
                pos = end;
            }
            _ => pos += 1,
        }
    }

    comments
}

impl Opaque {
    fn start(&self) -> usize {
        match *self {
            Opaque::Quoted { start, .. } | Opaque::Block { start } => start,
        }
    }
}

/// Returns the offset just past the closing quote.
fn skip_quoted(chars: &[char], start: usize, quote: char) -> usize {
    let mut pos = start + 1;
    while pos < chars.len() {
        match chars[pos] {
            '\\' if quote == '"' => pos += 2,
            '\'' if quote == '\'' && chars.get(pos + 1) == Some(&'\'') => pos += 2,
            c if c == quote => return pos + 1,
            _ => pos += 1,
        }
    }
    chars.len()
}

/// Returns the start of the first line after a block scalar body.
///
/// The body runs from `body_start` over every line that is blank or
/// indented by at least `indent` columns.
fn skip_block_body(chars: &[char], body_start: usize, indent: usize) -> usize {
    let mut pos = body_start;

    while pos < chars.len() {
        let end = line_end(chars, pos);
        let line_indent = indent_at(chars, pos);
        let blank = chars[pos + line_indent..end].iter().all(|c| c.is_whitespace());
        if !blank && line_indent < indent {
            return pos;
        }
        pos = end + 1;
    }

    chars.len()
}

fn line_end(chars: &[char], pos: usize) -> usize {
    chars[pos..]
        .iter()
        .position(|&c| c == '\n')
        .map_or(chars.len(), |offset| pos + offset)
}

fn indent_at(chars: &[char], line_start: usize) -> usize {
    chars[line_start..].iter().take_while(|&&c| c == ' ').count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Slot {
    Before(usize),
    Trailing(usize),
}

/// Comment text attached to nodes, indexed by node id.
#[derive(Debug, Default)]
pub(crate) struct Attachments {
    before: Vec<Option<String>>,
    trailing: Vec<Option<String>>,
    /// Comments of a document without any node.
    pub loose: Option<String>,
}

impl Attachments {
    /// Attaches each comment to a side of a node in `layout`.
    pub fn new(comments: &[RawComment], layout: &Layout, lines: &LineIndex) -> Self {
        let node_count = layout.nodes.len();
        let mut attachments = Self {
            before: vec![None; node_count],
            trailing: vec![None; node_count],
            loose: None,
        };

        if node_count == 0 {
            attachments.loose = merge(comments.iter());
            return attachments;
        }

        let mut by_start: Vec<&NodeLayout> = layout
            .nodes
            .iter()
            .filter(|n| n.shape != Shape::EmptyLeaf)
            .collect();
        let mut by_end = by_start.clone();
        by_start.sort_by_key(|n| (n.start, n.id));
        by_end.sort_by_key(|n| (n.end, std::cmp::Reverse(n.id)));

        let mut slots: BTreeMap<Slot, Vec<&RawComment>> = BTreeMap::new();
        for comment in comments {
            let next = by_start
                .get(by_start.partition_point(|n| n.start <= comment.offset))
                .map(|n| n.id);
            let before_next = next.map_or(Slot::Trailing(0), Slot::Before);

            let slot = if comment.own_line {
                before_next
            } else {
                let line_start = lines.start_of(comment.line);
                let lo = by_end.partition_point(|n| n.end < line_start);
                let hi = by_end.partition_point(|n| n.end < comment.offset);
                match by_end[lo..hi.max(lo)].last() {
                    Some(n)
                        if matches!(n.shape, Shape::Leaf | Shape::Flow) && n.role != Role::Key =>
                    {
                        Slot::Trailing(n.id)
                    }
                    Some(n) => next.map_or(Slot::Trailing(n.id), Slot::Before),
                    None => before_next,
                }
            };
            slots.entry(slot).or_default().push(comment);
        }

        for (slot, group) in slots {
            let text = merge(group.into_iter());
            match slot {
                Slot::Before(id) => attachments.before[id] = text,
                Slot::Trailing(id) => attachments.trailing[id] = text,
            }
        }
        attachments
    }

    /// Takes the comment attached before node `id`.
    pub fn take_before(&mut self, id: usize) -> Option<String> {
        self.before.get_mut(id).and_then(Option::take)
    }

    /// Takes the comment trailing node `id`.
    pub fn take_trailing(&mut self, id: usize) -> Option<String> {
        self.trailing.get_mut(id).and_then(Option::take)
    }
}

/// Joins comments into one block, keeping blank lines between them.
fn merge<'a>(comments: impl Iterator<Item = &'a RawComment>) -> Option<String> {
    let mut lines: Vec<&str> = Vec::new();
    let mut previous_line: Option<usize> = None;

    for comment in comments {
        if let Some(previous) = previous_line {
            for _ in previous + 1..comment.line {
                lines.push("");
            }
        }
        lines.push(&comment.text);
        previous_line = Some(comment.line);
    }

    (!lines.is_empty()).then(|| lines.join("\n").trim().to_string())
}
