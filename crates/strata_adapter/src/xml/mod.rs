//! XML adapter using quick-xml.
//!
//! The tokenizer's event stream is folded into the IR with an explicit stack
//! of open elements. Top-level elements always become objects; nested
//! elements collapse to scalars when they hold nothing but one run of text.

mod attributes;
mod value;

pub use value::infer_scalar;

use quick_xml::Reader;
use quick_xml::errors::IllFormedError;
use quick_xml::events::{BytesStart, Event};
use strata_ir::{Attributes, IrDocument, IrNode, MetaValue, SourceFormat};
use tracing::{debug, trace};

use crate::{Adapter, AdapterError};
use attributes::{collect_attributes, instruction_attributes};

/// XML adapter implementation.
///
/// Tokenizer settings are fixed:
/// - end tag names are checked against their start tags
/// - text is not trimmed by the tokenizer
/// - entities are left unexpanded
pub struct XmlAdapter;

impl XmlAdapter {
    /// Creates a new XML adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for XmlAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Adapter for XmlAdapter {
    fn format(&self) -> SourceFormat {
        SourceFormat::Xml
    }

    fn convert(&self, source: &str) -> Result<IrDocument, AdapterError> {
        xml_to_ir(source)
    }
}

/// Converts an XML document into the IR.
///
/// # Errors
///
/// Returns [`AdapterError::Xml`] with the tokenizer's own error when the
/// source is not well-formed, including an element left open at the end of
/// input.
///
/// # Example
///
/// ```rust
/// use strata_adapter::xml_to_ir;
/// use strata_ir::Scalar;
///
/// let doc = xml_to_ir("<root><a>6.00</a></root>").unwrap();
/// let root = &doc.root[0];
///
/// assert_eq!(root.name(), Some("root"));
/// assert_eq!(
///     root.children().unwrap()[0].scalar_value(),
///     Some(&Scalar::Integer(6))
/// );
/// ```
pub fn xml_to_ir(source: &str) -> Result<IrDocument, AdapterError> {
    debug!(len = source.len(), "Converting XML document");

    let mut reader = Reader::from_str(source);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = true;
    config.expand_empty_elements = false;

    let mut builder = TreeBuilder::new();
    loop {
        match reader.read_event()? {
            Event::Start(start) => builder.open(&start),
            Event::Empty(start) => {
                builder.open(&start);
                builder.close()?;
            }
            Event::End(_) => builder.close()?,
            Event::Text(text) => {
                let text = String::from_utf8_lossy(&text);
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    builder.push(IrNode::text(trimmed));
                }
            }
            Event::CData(cdata) => {
                builder.push(IrNode::cdata(String::from_utf8_lossy(&cdata)));
            }
            Event::Comment(comment) => {
                builder.push(IrNode::comment(String::from_utf8_lossy(&comment).trim()));
            }
            Event::Decl(decl) => builder.instruction(&decl),
            Event::PI(pi) => builder.instruction(&pi),
            Event::DocType(doctype) => {
                let body = String::from_utf8_lossy(&doctype).trim().to_string();
                builder
                    .doc
                    .metadata
                    .insert("!DOCTYPE".to_string(), MetaValue::Text(body));
            }
            Event::Eof => break,
        }
    }

    let doc = builder.finish()?;
    debug!(
        nodes = doc.root.len(),
        metadata = doc.metadata.len(),
        "Converted XML document"
    );
    Ok(doc)
}

/// An element whose end tag has not been seen yet.
struct OpenElement {
    name: String,
    attrs: Attributes,
    entries: Vec<IrNode>,
}

/// Accumulates the document while events stream in.
struct TreeBuilder {
    doc: IrDocument,
    stack: Vec<OpenElement>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            doc: IrDocument::new(SourceFormat::Xml),
            stack: Vec::new(),
        }
    }

    fn open(&mut self, start: &BytesStart<'_>) {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let attrs = collect_attributes(start);
        self.stack.push(OpenElement {
            name,
            attrs,
            entries: Vec::new(),
        });
    }

    fn close(&mut self) -> Result<(), AdapterError> {
        let Some(element) = self.stack.pop() else {
            // The tokenizer rejects unmatched end tags before they get here.
            return Err(quick_xml::Error::IllFormed(IllFormedError::UnmatchedEndTag(
                String::new(),
            ))
            .into());
        };

        let node = if self.stack.is_empty() {
            IrNode::object(Some(element.name), Some(element.attrs), element.entries)
        } else {
            Self::collapse(element)
        };
        self.push(node);
        Ok(())
    }

    /// Picks the IR shape for a nested element from its content.
    fn collapse(element: OpenElement) -> IrNode {
        let OpenElement {
            name,
            attrs,
            entries,
        } = element;

        match entries.as_slice() {
            [] => IrNode::scalar(Some(name), Some(attrs), "".into()),
            [IrNode::Text(text)] => {
                let value = infer_scalar(&text.value);
                IrNode::scalar(Some(name), Some(attrs), value)
            }
            [IrNode::Cdata(cdata)] => {
                if !attrs.is_empty() {
                    debug!(element = %name, "Dropping attributes of CDATA-only element");
                }
                IrNode::cdata(cdata.value.clone())
            }
            _ => IrNode::object(Some(name), Some(attrs), entries),
        }
    }

    fn push(&mut self, node: IrNode) {
        match self.stack.last_mut() {
            Some(parent) => parent.entries.push(node),
            None => self.doc.root.push(node),
        }
    }

    /// Records an XML declaration or processing instruction into metadata.
    fn instruction(&mut self, body: &[u8]) {
        let (target, attrs) = instruction_attributes(body);
        let key = format!("?{target}");
        trace!(instruction = %key, "Recording processing instruction");
        self.doc.metadata.insert(key, MetaValue::Attributes(attrs));
    }

    fn finish(self) -> Result<IrDocument, AdapterError> {
        if let Some(open) = self.stack.last() {
            return Err(quick_xml::Error::IllFormed(IllFormedError::MissingEndTag(
                open.name.clone(),
            ))
            .into());
        }
        Ok(self.doc)
    }
}
