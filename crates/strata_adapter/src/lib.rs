//! # strata_adapter
//!
//! Format adapters for Strata.
//!
//! This crate provides:
//! - An `Adapter` trait for converting source text into the IR
//! - Built-in XML adapter using `quick-xml`
//! - Built-in YAML adapter using `yaml-rust2`, with comment preservation
//! - An `AdapterRegistry` for dispatch by format or file extension
//!
//! ## Architecture
//!
//! Each adapter delegates tokenizing to a third-party parser and walks its
//! output to build an [`strata_ir::IrDocument`]. Parser errors are
//! propagated as-is; adapters never recover from malformed input.
//!
//! ## Example
//!
//! ```rust
//! use strata_adapter::{YamlOptions, yaml_to_ir};
//! use strata_ir::Scalar;
//!
//! let doc = yaml_to_ir("# port\nport: 8080\n", &YamlOptions::default()).unwrap();
//!
//! assert_eq!(doc.root.len(), 2);
//! assert!(doc.root[0].is_comment());
//! assert_eq!(doc.root[1].scalar_value(), Some(&Scalar::Integer(8080)));
//! ```

mod config;
mod error;
mod registry;
mod traits;
pub mod xml;
pub mod yaml;

pub use config::AdapterConfig;
pub use error::AdapterError;
pub use registry::AdapterRegistry;
pub use traits::Adapter;
pub use xml::{XmlAdapter, xml_to_ir};
pub use yaml::{YamlAdapter, YamlOptions, yaml_to_ir};
