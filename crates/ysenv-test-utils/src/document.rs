//! [`DocumentBuilder`] for environment documents.

use serde_json::{Map, Value, json};

/// Builds a raw environment document with all four top-level keys present.
///
/// ```rust
/// use serde_json::json;
/// use ysenv_test_utils::DocumentBuilder;
///
/// let doc = DocumentBuilder::new("~/env")
///     .group_part("base", json!({"rc": ["set -o vi"]}))
///     .host("laptop", json!({"groupParts": ["base"]}))
///     .build();
/// assert_eq!(doc["hosts"]["laptop"]["groupParts"][0], "base");
/// ```
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    base_path: String,
    group_parts: Map<String, Value>,
    hosts: Map<String, Value>,
    dockers: Map<String, Value>,
}

impl DocumentBuilder {
    pub fn new(base_path: &str) -> Self {
        Self {
            base_path: base_path.to_string(),
            group_parts: Map::new(),
            hosts: Map::new(),
            dockers: Map::new(),
        }
    }

    pub fn group_part(mut self, name: &str, fields: Value) -> Self {
        self.group_parts.insert(name.to_string(), fields);
        self
    }

    pub fn host(mut self, name: &str, fields: Value) -> Self {
        self.hosts.insert(name.to_string(), fields);
        self
    }

    pub fn docker(mut self, name: &str, fields: Value) -> Self {
        self.dockers.insert(name.to_string(), fields);
        self
    }

    pub fn build(self) -> Value {
        json!({
            "basePath": self.base_path,
            "groupParts": self.group_parts,
            "hosts": self.hosts,
            "dockers": self.dockers,
        })
    }

    /// The built document as YAML text, for config-file fixtures.
    pub fn to_yaml(self) -> String {
        serde_yaml::to_string(&self.build()).unwrap()
    }
}

/// Parse YAML text into a raw document value.
pub fn from_yaml(text: &str) -> Value {
    serde_yaml::from_str(text).unwrap_or_else(|e| panic!("from_yaml: invalid YAML: {e}"))
}
