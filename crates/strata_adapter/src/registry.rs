//! Adapter lookup by format tag or file extension.

use strata_ir::{IrDocument, SourceFormat};
use tracing::debug;

use crate::xml::XmlAdapter;
use crate::yaml::YamlAdapter;
use crate::{Adapter, AdapterConfig, AdapterError};

/// A set of adapters, at most one per format.
///
/// # Example
///
/// ```rust
/// use strata_adapter::{AdapterConfig, AdapterRegistry};
/// use strata_ir::SourceFormat;
///
/// let registry = AdapterRegistry::with_defaults(&AdapterConfig::default());
/// let doc = registry.convert("<a>1</a>", SourceFormat::Xml).unwrap();
/// assert_eq!(doc.root.len(), 1);
/// ```
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: Vec<Box<dyn Adapter>>,
}

impl AdapterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the XML and YAML adapters.
    pub fn with_defaults(config: &AdapterConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(XmlAdapter::new()));
        registry.register(Box::new(YamlAdapter::with_options(config.yaml.clone())));
        registry
    }

    /// Adds an adapter, replacing any adapter already registered for its format.
    pub fn register(&mut self, adapter: Box<dyn Adapter>) {
        let format = adapter.format();
        debug!(%format, name = adapter.name(), "Registering adapter");

        match self.adapters.iter_mut().find(|a| a.format() == format) {
            Some(slot) => *slot = adapter,
            None => self.adapters.push(adapter),
        }
    }

    /// Returns the adapter for a format.
    pub fn get(&self, format: SourceFormat) -> Option<&dyn Adapter> {
        self.adapters
            .iter()
            .find(|adapter| adapter.format() == format)
            .map(|adapter| adapter.as_ref())
    }

    /// Returns the adapter handling a file extension, without the leading dot.
    pub fn for_extension(&self, extension: &str) -> Option<&dyn Adapter> {
        self.adapters
            .iter()
            .find(|adapter| adapter.can_convert(extension))
            .map(|adapter| adapter.as_ref())
    }

    /// Returns the registered formats in registration order.
    pub fn formats(&self) -> Vec<SourceFormat> {
        self.adapters.iter().map(|adapter| adapter.format()).collect()
    }

    /// Converts source text with the adapter registered for `format`.
    pub fn convert(&self, source: &str, format: SourceFormat) -> Result<IrDocument, AdapterError> {
        let adapter = self
            .get(format)
            .ok_or(AdapterError::Unsupported(format))?;

        adapter.convert(source)
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("formats", &self.formats())
            .finish()
    }
}
