//! YAML adapter using yaml-rust2.
//!
//! Conversion runs in three passes over the first document of the stream:
//!
//! 1. [`events`] records the parser's node events and where each node sits.
//! 2. [`comments`] scans the source for comments and attaches each one to a
//!    side of a node.
//! 3. [`builder`] folds the events into IR nodes with an explicit stack,
//!    splicing the attached comments in as sibling nodes.

mod builder;
mod comments;
mod events;
mod key;
mod schema;

use serde::{Deserialize, Serialize};
use strata_ir::{IrDocument, SourceFormat};
use tracing::debug;

use crate::{Adapter, AdapterError};
use builder::TreeBuilder;
use comments::{Attachments, LineIndex};
use events::{EventLog, Layout};

/// Options for the YAML adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct YamlOptions {
    /// Reserved for template parameter merging. Accepted but currently
    /// has no effect on conversion.
    pub merge_template_params: bool,
}

impl Default for YamlOptions {
    fn default() -> Self {
        Self {
            merge_template_params: true,
        }
    }
}

/// YAML adapter implementation.
#[derive(Debug, Clone, Default)]
pub struct YamlAdapter {
    options: YamlOptions,
}

impl YamlAdapter {
    /// Creates a new YAML adapter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a YAML adapter with the given options.
    pub fn with_options(options: YamlOptions) -> Self {
        Self { options }
    }

    /// Returns the options this adapter converts with.
    pub fn options(&self) -> &YamlOptions {
        &self.options
    }
}

impl Adapter for YamlAdapter {
    fn format(&self) -> SourceFormat {
        SourceFormat::Yaml
    }

    fn convert(&self, source: &str) -> Result<IrDocument, AdapterError> {
        yaml_to_ir(source, &self.options)
    }
}

/// Converts a YAML document into the IR.
///
/// Only the first document of a multi-document stream is converted. A
/// top-level mapping or sequence is flattened into the document root.
///
/// # Errors
///
/// Returns [`AdapterError::Yaml`] with the parser's own error when the
/// source is not valid YAML.
///
/// # Example
///
/// ```rust
/// use strata_adapter::{YamlOptions, yaml_to_ir};
/// use strata_ir::Scalar;
///
/// let doc = yaml_to_ir("# greeting\nname: Tom\n", &YamlOptions::default()).unwrap();
///
/// assert_eq!(doc.root[0].text_value(), Some("greeting"));
/// assert_eq!(doc.root[1].name(), Some("name"));
/// assert_eq!(doc.root[1].scalar_value(), Some(&Scalar::from("Tom")));
/// ```
pub fn yaml_to_ir(source: &str, options: &YamlOptions) -> Result<IrDocument, AdapterError> {
    debug!(
        len = source.len(),
        merge_template_params = options.merge_template_params,
        "Converting YAML document"
    );

    let log = EventLog::parse(source)?;
    let chars: Vec<char> = source.chars().collect();
    let lines = LineIndex::new(&chars);
    let layout = Layout::analyze(&log, &chars);

    let limit = log.document_end.unwrap_or(chars.len());
    let found = comments::scan(&chars, &lines, &layout.opaque, limit);
    let attachments = Attachments::new(&found, &layout, &lines);

    let mut builder = TreeBuilder::new(attachments);
    for (event, _) in &log.events {
        builder.event(event);
    }

    let mut doc = IrDocument::new(SourceFormat::Yaml);
    doc.root = builder.finish();

    debug!(
        nodes = doc.root.len(),
        comments = found.len(),
        "Converted YAML document"
    );
    Ok(doc)
}
