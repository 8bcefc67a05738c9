//! Integration tests for the format adapters.
//!
//! Converts fixture files through the public API and checks the shape of the
//! resulting IR.

use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rstest::rstest;
use strata_adapter::{AdapterConfig, AdapterError, AdapterRegistry, YamlOptions, yaml_to_ir};
use strata_ir::visitor::{VisitResult, Visitor, walk};
use strata_ir::{CommentNode, IrDocument, IrNode, SourceFormat};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn convert_fixture(name: &str) -> IrDocument {
    let path = fixtures_dir().join(name);
    let source = fs::read_to_string(&path).unwrap();
    let extension = path.extension().and_then(|e| e.to_str()).unwrap();

    let registry = AdapterRegistry::with_defaults(&AdapterConfig::default());
    let adapter = registry.for_extension(extension).unwrap();
    adapter.convert(&source).unwrap()
}

struct CommentCollector {
    comments: Vec<(String, usize)>,
}

impl Visitor for CommentCollector {
    fn visit_comment(&mut self, node: &CommentNode, depth: usize) -> VisitResult {
        self.comments.push((node.value.clone(), depth));
        ControlFlow::Continue(())
    }
}

fn comments(nodes: &[IrNode]) -> Vec<(String, usize)> {
    let mut collector = CommentCollector {
        comments: Vec::new(),
    };
    let _ = walk(&mut collector, nodes);
    collector.comments
}

fn count_comment_markers(path: &Path, marker: &str) -> usize {
    fs::read_to_string(path).unwrap().matches(marker).count()
}

#[test]
fn test_xml_catalog_snapshot() {
    let doc = convert_fixture("catalog.xml");

    insta::assert_json_snapshot!(doc, @r#"
    {
      "root": [
        {
          "type": "comment",
          "value": "catalog"
        },
        {
          "type": "object",
          "name": "catalog",
          "attrs": {},
          "children": [
            {
              "type": "object",
              "name": "book",
              "attrs": {
                "id": "b1"
              },
              "children": [
                {
                  "type": "scalar",
                  "name": "title",
                  "attrs": {},
                  "value": "Rust"
                },
                {
                  "type": "scalar",
                  "name": "price",
                  "attrs": {},
                  "value": 29.5
                }
              ]
            }
          ]
        }
      ],
      "sourceFormat": "xml",
      "metadata": {}
    }
    "#);
}

#[test]
fn test_yaml_settings_snapshot() {
    let doc = convert_fixture("settings.yaml");

    insta::assert_json_snapshot!(doc, @r#"
    {
      "root": [
        {
          "type": "comment",
          "value": "service settings"
        },
        {
          "type": "scalar",
          "name": "name",
          "value": "api"
        },
        {
          "type": "array",
          "name": "ports",
          "value": [
            {
              "type": "scalar",
              "value": 80
            },
            {
              "type": "comment",
              "value": "http"
            },
            {
              "type": "scalar",
              "value": 443
            }
          ]
        }
      ],
      "sourceFormat": "yaml",
      "metadata": {}
    }
    "#);
}

#[rstest]
#[case("commented.xml", "<!--")]
#[case("commented.yaml", "#")]
fn test_every_comment_becomes_a_node(#[case] fixture: &str, #[case] marker: &str) {
    let doc = convert_fixture(fixture);
    let expected = count_comment_markers(&fixtures_dir().join(fixture), marker);

    assert_eq!(comments(&doc.root).len(), expected);
}

#[test]
fn test_xml_comments_stay_in_place() {
    let doc = convert_fixture("commented.xml");

    assert_eq!(
        comments(&doc.root),
        vec![
            ("head".to_string(), 0),
            ("bind address".to_string(), 1),
            ("primary".to_string(), 2),
            ("tail".to_string(), 0),
        ]
    );
}

#[test]
fn test_yaml_comments_precede_or_follow_their_node() {
    let doc = convert_fixture("commented.yaml");
    let found: Vec<String> = comments(&doc.root).into_iter().map(|(c, _)| c).collect();

    assert_eq!(
        found,
        vec!["head", "bind address", "local only", "replicas", "primary", "standby", "tail"]
    );

    // A comment heading the first entry of a nested mapping is emitted in
    // front of the mapping itself.
    let names: Vec<Option<&str>> = doc.root.iter().map(|n| n.name()).collect();
    assert_eq!(
        names,
        vec![None, None, Some("server"), None, Some("replicas"), None]
    );
}

// Runs are compared as serialized JSON because a `.nan` scalar is not equal
// to itself under `==`.
#[rstest]
#[case("catalog.xml")]
#[case("settings.yaml")]
#[case("commented.xml")]
#[case("commented.yaml")]
fn test_conversion_is_deterministic(#[case] fixture: &str) {
    let first = serde_json::to_string(&convert_fixture(fixture)).unwrap();
    let second = serde_json::to_string(&convert_fixture(fixture)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_nan_documents_compare_through_json() {
    let registry = AdapterRegistry::with_defaults(&AdapterConfig::default());
    let first = registry.convert("x: .nan\n", SourceFormat::Yaml).unwrap();
    let second = registry.convert("x: .nan\n", SourceFormat::Yaml).unwrap();

    assert_ne!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_ir_round_trips_through_json() {
    let doc = convert_fixture("commented.xml");
    let json = serde_json::to_string(&doc).unwrap();
    let back: IrDocument = serde_json::from_str(&json).unwrap();

    assert_eq!(back, doc);
}

#[test]
fn test_adapters_share_the_ir() {
    let xml = convert_fixture("commented.xml");
    let yaml = convert_fixture("commented.yaml");

    assert_eq!(xml.source_format, SourceFormat::Xml);
    assert_eq!(yaml.source_format, SourceFormat::Yaml);
    assert!(xml.metadata.contains_key("?xml"));
    assert!(yaml.metadata.is_empty());
}

#[rstest]
#[case(SourceFormat::Xml, "<a><b></a>")]
#[case(SourceFormat::Yaml, "key: [unclosed")]
fn test_malformed_input_is_rejected(#[case] format: SourceFormat, #[case] source: &str) {
    let registry = AdapterRegistry::with_defaults(&AdapterConfig::default());
    let err = registry.convert(source, format).unwrap_err();

    assert!(err.is_syntax(), "unexpected error: {err}");
}

#[test]
fn test_unsupported_format() {
    let registry = AdapterRegistry::with_defaults(&AdapterConfig::default());
    let err = registry.convert("a = 1", SourceFormat::Toml).unwrap_err();

    assert!(matches!(err, AdapterError::Unsupported(SourceFormat::Toml)));
}

#[test]
fn test_registry_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strata.json");
    fs::write(&path, r#"{ "yaml": { "mergeTemplateParams": false } }"#).unwrap();

    let config = AdapterConfig::from_file(&path).unwrap();
    let registry = AdapterRegistry::with_defaults(&config);

    let source = fs::read_to_string(fixtures_dir().join("settings.yaml")).unwrap();
    let from_registry = registry.convert(&source, SourceFormat::Yaml).unwrap();
    let direct = yaml_to_ir(&source, &YamlOptions::default()).unwrap();

    assert_eq!(from_registry, direct);
}
