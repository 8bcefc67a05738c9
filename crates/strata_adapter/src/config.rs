//! Adapter configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::AdapterError;
use crate::yaml::YamlOptions;

/// Configuration for the built-in adapters.
///
/// XML tokenizer settings are fixed and have no entry here.
///
/// # Example
///
/// ```rust
/// use strata_adapter::AdapterConfig;
///
/// let config = AdapterConfig::from_json(r#"{ "yaml": { "mergeTemplateParams": false } }"#).unwrap();
/// assert!(!config.yaml.merge_template_params);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdapterConfig {
    /// Options passed to the YAML adapter.
    #[serde(default)]
    pub yaml: YamlOptions,
}

impl AdapterConfig {
    /// Creates a configuration with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AdapterError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| AdapterError::config(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, AdapterError> {
        serde_json::from_str(json)
            .map_err(|e| AdapterError::config(format!("Invalid config: {}", e)))
    }
}
