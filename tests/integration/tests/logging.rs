//! Checks the adapters' diagnostic events.

use std::sync::{Arc, Mutex};

use strata_adapter::{AdapterConfig, AdapterRegistry};
use strata_ir::SourceFormat;
use tracing_subscriber::prelude::*;

struct MessageRecorder(Arc<Mutex<Vec<String>>>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for MessageRecorder {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0.lock().unwrap().push(visitor.0);
    }
}

struct MessageVisitor(String);

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            use std::fmt::Write;
            let _ = write!(self.0, "{:?}", value);
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.0.push_str(value);
        }
    }
}

fn record<F: FnOnce()>(f: F) -> Vec<String> {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(MessageRecorder(messages.clone()));

    tracing::subscriber::with_default(subscriber, f);

    messages.lock().unwrap().clone()
}

#[test]
fn test_each_conversion_logs_start_and_end() {
    let registry = AdapterRegistry::with_defaults(&AdapterConfig::default());

    let messages = record(|| {
        registry.convert("<a>1</a>", SourceFormat::Xml).unwrap();
        registry.convert("a: 1", SourceFormat::Yaml).unwrap();
        registry.convert("b: 2", SourceFormat::Yaml).unwrap();
    });

    let count = |needle: &str| messages.iter().filter(|m| m.contains(needle)).count();
    assert_eq!(count("Converting XML document"), 1);
    assert_eq!(count("Converted XML document"), 1);
    assert_eq!(count("Converting YAML document"), 2);
    assert_eq!(count("Converted YAML document"), 2);
}

#[test]
fn test_dropped_cdata_attributes_are_reported() {
    let registry = AdapterRegistry::with_defaults(&AdapterConfig::default());

    let messages = record(|| {
        let source = r#"<r><s lang="en"><![CDATA[raw]]></s><t><![CDATA[raw]]></t></r>"#;
        registry.convert(source, SourceFormat::Xml).unwrap();
    });

    let dropped = messages
        .iter()
        .filter(|m| m.contains("Dropping attributes of CDATA-only element"))
        .count();
    assert_eq!(dropped, 1);
}

#[test]
fn test_comment_in_complex_key_is_reported() {
    let registry = AdapterRegistry::with_defaults(&AdapterConfig::default());

    let messages = record(|| {
        let source = "? - a\n  # inside\n  - b\n: v\n";
        registry.convert(source, SourceFormat::Yaml).unwrap();
    });

    let dropped = messages
        .iter()
        .filter(|m| m.contains("Dropping comment inside a complex mapping key"))
        .count();
    assert_eq!(dropped, 1);
}

#[test]
fn test_alias_expansion_limit_is_reported() {
    let registry = AdapterRegistry::with_defaults(&AdapterConfig::default());
    let mut source = String::from("l0: &l0 [x, x, x, x, x, x, x, x, x, x]\n");
    for level in 1..6 {
        let refs = vec![format!("*l{}", level - 1); 10].join(", ");
        source.push_str(&format!("l{level}: &l{level} [{refs}]\n"));
    }

    let messages = record(|| {
        registry.convert(&source, SourceFormat::Yaml).unwrap();
    });

    assert!(
        messages
            .iter()
            .any(|m| m.contains("Alias expansion limit reached"))
    );
}
