//! Adapter trait definition.

use strata_ir::{IrDocument, SourceFormat};

use crate::AdapterError;

/// Trait for converting source text of one format into the IR.
///
/// An adapter configures its delegated parser deterministically, obtains the
/// parser's native result and walks it to build an [`IrDocument`]. Adapters
/// hold no state between calls, so one instance can serve any number of
/// conversions, concurrently if needed.
///
/// # Example
///
/// ```rust,ignore
/// use strata_adapter::{Adapter, AdapterError};
/// use strata_ir::{IrDocument, SourceFormat};
///
/// struct MyAdapter;
///
/// impl Adapter for MyAdapter {
///     fn format(&self) -> SourceFormat {
///         SourceFormat::Json
///     }
///
///     fn convert(&self, source: &str) -> Result<IrDocument, AdapterError> {
///         // Conversion implementation
///         todo!()
///     }
/// }
/// ```
pub trait Adapter: Send + Sync {
    /// Returns the format this adapter reads.
    fn format(&self) -> SourceFormat;

    /// Returns the name of this adapter.
    fn name(&self) -> &str {
        self.format().as_str()
    }

    /// Returns the file extensions this adapter handles.
    ///
    /// Extensions should not include the leading dot (e.g., `["yaml", "yml"]`).
    fn extensions(&self) -> &[&str] {
        self.format().extensions()
    }

    /// Converts the source text into an IR document.
    fn convert(&self, source: &str) -> Result<IrDocument, AdapterError>;

    /// Returns true if this adapter can handle the given file extension.
    fn can_convert(&self, extension: &str) -> bool {
        self.extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
