//! Attributed field model
//!
//! A resolved instance is a [`FieldSet`]: field names in first-insertion
//! order, each holding either one [`AttributedScalar`] or an
//! [`AttributedList`] whose elements carry their own [`Source`].

use serde_json::{Number, Value};
use std::fmt;

/// Well-known field names.
pub mod names {
    pub const GROUP_PARTS: &str = "groupParts";
    pub const NAME: &str = "name";
    pub const HOSTNAME: &str = "hostname";
    pub const IMAGE: &str = "image";
    pub const USER: &str = "user";
    pub const DOCK: &str = "dock";
    pub const VOLUME: &str = "volume";
    pub const RC: &str = "rc";
    pub const VM_HOME: &str = "vmHome";
    pub const NOT_ONCE: &str = "notOnce";
}

/// Merge behavior class of a field, fixed by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-empty string, last writer wins
    String,
    /// Boolean, last writer wins
    Bool,
    /// List of scalars, accumulated across sources
    StringList,
    /// Anything else: scalars overwrite, lists accumulate
    Opaque,
}

const FIELD_KINDS: &[(&str, FieldKind)] = &[
    (names::NAME, FieldKind::String),
    (names::IMAGE, FieldKind::String),
    (names::USER, FieldKind::String),
    (names::DOCK, FieldKind::Bool),
    (names::VOLUME, FieldKind::StringList),
    (names::RC, FieldKind::StringList),
];

impl FieldKind {
    /// Look up the kind of a field by name.
    pub fn of(field: &str) -> Self {
        FIELD_KINDS
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, kind)| *kind)
            .unwrap_or(FieldKind::Opaque)
    }

    /// Human description of the accepted shape.
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::String => "a string",
            FieldKind::Bool => "a boolean",
            FieldKind::StringList => "a list of scalars",
            FieldKind::Opaque => "a scalar or a list of scalars",
        }
    }
}

/// Where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    /// A named entry of the document's `groupParts`
    GroupPart(String),
    /// The instance's own fields
    Instance,
    /// Probed from the container image
    Container,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::GroupPart(name) => write!(f, "groupParts.{}", name),
            Source::Instance => write!(f, "instance"),
            Source::Container => write!(f, "via container"),
        }
    }
}

/// A single non-null, non-container value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Flag(bool),
    Number(Number),
}

impl Scalar {
    /// Convert a raw value; `None` for null, lists and mappings.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Scalar::Text(s.clone())),
            Value::Bool(b) => Some(Scalar::Flag(*b)),
            Value::Number(n) => Some(Scalar::Number(n.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Scalar::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => write!(f, "{}", s),
            Scalar::Flag(b) => write!(f, "{}", b),
            Scalar::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A scalar paired with its contributor.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributedScalar {
    pub value: Scalar,
    pub source: Source,
}

impl AttributedScalar {
    pub fn new(value: Scalar, source: Source) -> Self {
        Self { value, source }
    }
}

/// An accumulated list; each element keeps its own contributor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributedList {
    pub elements: Vec<AttributedScalar>,
}

impl AttributedList {
    pub fn new(elements: Vec<AttributedScalar>) -> Self {
        Self { elements }
    }

    pub fn extend(&mut self, other: AttributedList) {
        self.elements.extend(other.elements);
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributedScalar> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// The resolved form of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributedField {
    Scalar(AttributedScalar),
    List(AttributedList),
}

impl AttributedField {
    pub fn as_scalar(&self) -> Option<&AttributedScalar> {
        match self {
            AttributedField::Scalar(s) => Some(s),
            AttributedField::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&AttributedList> {
        match self {
            AttributedField::List(l) => Some(l),
            AttributedField::Scalar(_) => None,
        }
    }
}

/// Attributed fields in first-insertion order.
///
/// Replacing a field keeps its original position, matching how the merged
/// fields are later emitted as command-line options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    entries: Vec<(String, AttributedField)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&AttributedField> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, field)| field)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut AttributedField> {
        self.entries
            .iter_mut()
            .find(|(key, _)| key == name)
            .map(|(_, field)| field)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Insert or replace `name`, keeping an existing field's position.
    pub fn insert(&mut self, name: &str, field: AttributedField) {
        match self.get_mut(name) {
            Some(existing) => *existing = field,
            None => self.entries.push((name.to_string(), field)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<AttributedField> {
        let idx = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn scalar(&self, name: &str) -> Option<&AttributedScalar> {
        self.get(name).and_then(AttributedField::as_scalar)
    }

    pub fn list(&self, name: &str) -> Option<&AttributedList> {
        self.get(name).and_then(AttributedField::as_list)
    }

    /// Text value of a scalar field.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.scalar(name).and_then(|s| s.value.as_text())
    }

    /// True only for a boolean scalar set to `true`.
    pub fn is_true(&self, name: &str) -> bool {
        self.scalar(name).and_then(|s| s.value.as_flag()) == Some(true)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributedField)> {
        self.entries.iter().map(|(key, field)| (key.as_str(), field))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
