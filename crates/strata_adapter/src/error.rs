//! Adapter error types.

use strata_ir::SourceFormat;
use thiserror::Error;

/// Errors that can occur during conversion.
///
/// Grammar violations are passed through from the delegated parser
/// unchanged; the adapters add no wrapping text and attempt no recovery.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The XML tokenizer rejected the source.
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    /// The YAML parser rejected the source.
    #[error(transparent)]
    Yaml(#[from] yaml_rust2::scanner::ScanError),

    /// No adapter is available for the requested format.
    #[error("Unsupported format: {0}")]
    Unsupported(SourceFormat),

    /// The adapter configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdapterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns true if this error reports a grammar violation in the source.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Xml(_) | Self::Yaml(_))
    }
}
