//! Field merging
//!
//! Folds one raw field mapping onto an attributed [`FieldSet`]:
//! - String and boolean fields: last writer wins
//! - Array fields (`volume`, `rc`): elements accumulate, nulls dropped
//! - Opaque fields: scalars overwrite, lists accumulate
//!
//! `groupParts` is metadata and never merged.

use serde_json::{Map, Value};

use crate::field::{
    AttributedField, AttributedList, AttributedScalar, FieldKind, FieldSet, Scalar, Source, names,
};

/// Field-level validation failures raised while merging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MergeError {
    #[error("\"{field}\" must not be empty")]
    EmptyStringField { field: String },

    #[error("\"{field}\" must be {}", .expected.describe())]
    WrongKind { field: String, expected: FieldKind },

    #[error("\"{field}\" switches between a list and a single value across sources")]
    InconsistentKind { field: String },
}

/// Apply `fields` from `source` onto `target`.
///
/// Stops at the first invalid field; fields merged before it stay applied.
pub fn merge(
    target: &mut FieldSet,
    source: &Source,
    fields: &Map<String, Value>,
) -> Result<(), MergeError> {
    for (name, raw) in fields {
        if name == names::GROUP_PARTS {
            continue;
        }

        match FieldKind::of(name) {
            FieldKind::String => {
                let text = raw.as_str().ok_or_else(|| wrong_kind(name, FieldKind::String))?;
                if text.trim().is_empty() {
                    return Err(MergeError::EmptyStringField {
                        field: name.clone(),
                    });
                }
                target.insert(name, scalar(Scalar::Text(text.to_string()), source));
            }
            FieldKind::Bool => {
                let flag = raw.as_bool().ok_or_else(|| wrong_kind(name, FieldKind::Bool))?;
                target.insert(name, scalar(Scalar::Flag(flag), source));
            }
            FieldKind::StringList => {
                let items = raw
                    .as_array()
                    .ok_or_else(|| wrong_kind(name, FieldKind::StringList))?;
                let list = list_elements(name, items, source, FieldKind::StringList)?;
                append(target, name, list);
            }
            FieldKind::Opaque => merge_opaque(target, name, raw, source)?,
        }
    }

    Ok(())
}

fn merge_opaque(
    target: &mut FieldSet,
    name: &str,
    raw: &Value,
    source: &Source,
) -> Result<(), MergeError> {
    match raw {
        Value::Array(items) => {
            let list = list_elements(name, items, source, FieldKind::Opaque)?;
            match target.get_mut(name) {
                Some(AttributedField::List(existing)) => existing.extend(list),
                Some(AttributedField::Scalar(_)) => return Err(inconsistent(name)),
                None => target.insert(name, AttributedField::List(list)),
            }
        }
        other => {
            let value =
                Scalar::from_value(other).ok_or_else(|| wrong_kind(name, FieldKind::Opaque))?;
            if matches!(target.get(name), Some(AttributedField::List(_))) {
                return Err(inconsistent(name));
            }
            target.insert(name, scalar(value, source));
        }
    }
    Ok(())
}

/// Convert raw list items, dropping nulls.
fn list_elements(
    name: &str,
    items: &[Value],
    source: &Source,
    kind: FieldKind,
) -> Result<AttributedList, MergeError> {
    let mut elements = Vec::with_capacity(items.len());
    for item in items.iter().filter(|item| !item.is_null()) {
        let value = Scalar::from_value(item).ok_or_else(|| wrong_kind(name, kind))?;
        let value = match (kind, value) {
            (FieldKind::StringList, Scalar::Text(text)) => Scalar::Text(text),
            (FieldKind::StringList, other) => Scalar::Text(other.to_string()),
            (_, other) => other,
        };
        elements.push(AttributedScalar::new(value, source.clone()));
    }
    Ok(AttributedList::new(elements))
}

fn append(target: &mut FieldSet, name: &str, list: AttributedList) {
    match target.get_mut(name) {
        Some(AttributedField::List(existing)) => existing.extend(list),
        _ => target.insert(name, AttributedField::List(list)),
    }
}

fn scalar(value: Scalar, source: &Source) -> AttributedField {
    AttributedField::Scalar(AttributedScalar::new(value, source.clone()))
}

fn wrong_kind(name: &str, expected: FieldKind) -> MergeError {
    MergeError::WrongKind {
        field: name.to_string(),
        expected,
    }
}

fn inconsistent(name: &str) -> MergeError {
    MergeError::InconsistentKind {
        field: name.to_string(),
    }
}
