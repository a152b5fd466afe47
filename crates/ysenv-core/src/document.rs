//! Top-level environment document and its schema check

use serde_json::{Map, Value};
use std::fmt;

use crate::{Error, Result};

/// Which instance collection a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceKind {
    /// Bare host setup: symlinks and an rc file
    Host,
    /// A `docker run` launch
    Docker,
}

impl InstanceKind {
    /// Document key of the collection holding this kind.
    pub fn collection(&self) -> &'static str {
        match self {
            InstanceKind::Host => "hosts",
            InstanceKind::Docker => "dockers",
        }
    }

    /// Qualified identifier used in messages, e.g. `dockers.dev`.
    pub fn instance_id(&self, name: &str) -> String {
        format!("{}.{}", self.collection(), name)
    }
}

impl fmt::Display for InstanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceKind::Host => write!(f, "host"),
            InstanceKind::Docker => write!(f, "docker"),
        }
    }
}

/// A schema-checked environment document.
///
/// Only the top-level shape is verified here; instance contents are
/// validated lazily when an instance is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    base_path: String,
    group_parts: Map<String, Value>,
    hosts: Map<String, Value>,
    dockers: Map<String, Value>,
}

impl Document {
    /// Validate the raw document shape.
    ///
    /// Fails with [`Error::MalformedDocument`] naming the first missing or
    /// mistyped key, in the order `basePath`, `groupParts`, `hosts`,
    /// `dockers`.
    pub fn from_value(raw: &Value) -> Result<Self> {
        let base_path = raw
            .get("basePath")
            .and_then(Value::as_str)
            .ok_or(Error::MalformedDocument { field: "basePath" })?;

        Ok(Self {
            base_path: base_path.to_string(),
            group_parts: mapping(raw, "groupParts")?,
            hosts: mapping(raw, "hosts")?,
            dockers: mapping(raw, "dockers")?,
        })
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn group_parts(&self) -> &Map<String, Value> {
        &self.group_parts
    }

    /// The instance collection for `kind`.
    pub fn instances(&self, kind: InstanceKind) -> &Map<String, Value> {
        match kind {
            InstanceKind::Host => &self.hosts,
            InstanceKind::Docker => &self.dockers,
        }
    }

    /// Instance names of `kind`, in document order.
    pub fn instance_names(&self, kind: InstanceKind) -> Vec<String> {
        self.instances(kind).keys().cloned().collect()
    }
}

fn mapping(raw: &Value, field: &'static str) -> Result<Map<String, Value>> {
    raw.get(field)
        .and_then(Value::as_object)
        .cloned()
        .ok_or(Error::MalformedDocument { field })
}
