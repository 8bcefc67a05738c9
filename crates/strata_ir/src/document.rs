//! Document envelope.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Attributes, IrNode};

/// Out-of-band document information, keyed by literal name.
///
/// Semantically unordered; the `BTreeMap` only makes iteration deterministic.
pub type Metadata = BTreeMap<String, MetaValue>;

/// The format a document was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Xml,
    Json,
    Yaml,
    Toml,
}

impl SourceFormat {
    /// All known formats, including those without an adapter.
    pub const ALL: [SourceFormat; 4] = [
        SourceFormat::Xml,
        SourceFormat::Json,
        SourceFormat::Yaml,
        SourceFormat::Toml,
    ];

    /// Returns the lowercase name of this format.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Xml => "xml",
            SourceFormat::Json => "json",
            SourceFormat::Yaml => "yaml",
            SourceFormat::Toml => "toml",
        }
    }

    /// Returns the file extensions conventionally used for this format.
    ///
    /// Extensions do not include the leading dot.
    pub const fn extensions(&self) -> &'static [&'static str] {
        match self {
            SourceFormat::Xml => &["xml", "xsd", "xsl", "xslt", "svg"],
            SourceFormat::Json => &["json"],
            SourceFormat::Yaml => &["yaml", "yml"],
            SourceFormat::Toml => &["toml"],
        }
    }

    /// Finds the format conventionally associated with a file extension.
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| {
            format
                .extensions()
                .iter()
                .any(|ext| ext.eq_ignore_ascii_case(extension))
        })
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown source format: {s}"))
    }
}

/// A metadata entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    /// Pseudo-attributes of a processing instruction, e.g. `<?xml version="1.0"?>`.
    Attributes(Attributes),
    /// Free-form text, e.g. the body of a `<!DOCTYPE>` declaration.
    Text(String),
}

/// The result of converting one source document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IrDocument {
    /// Top-level nodes in source order.
    pub root: Vec<IrNode>,

    /// The format the document was read from.
    pub source_format: SourceFormat,

    /// Out-of-band information such as XML processing instructions.
    pub metadata: Metadata,
}

impl IrDocument {
    /// Creates an empty document for the given format.
    pub fn new(source_format: SourceFormat) -> Self {
        Self {
            root: Vec::new(),
            source_format,
            metadata: Metadata::new(),
        }
    }

    /// Returns true if the document has no top-level nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}
