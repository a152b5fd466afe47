//! Instance resolution
//!
//! Looks up a named instance, folds its group parts and own fields through
//! the merger, applies kind-specific defaults and resolves its volumes.

use serde_json::{Map, Value};

use crate::document::{Document, InstanceKind};
use crate::environment::Environment;
use crate::field::{
    AttributedField, AttributedList, AttributedScalar, FieldSet, Scalar, Source, names,
};
use crate::merge::merge;
use crate::probe::ContainerHomeProbe;
use crate::volume::{VolumeEntry, resolve_volumes};
use crate::{Error, Result};

/// The final attributed view of one instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInstance {
    pub kind: InstanceKind,
    pub name: String,
    /// Merged fields, without `volume`
    pub fields: FieldSet,
    /// Resolved mounts; `None` when no source declared `volume`
    pub volumes: Option<Vec<VolumeEntry>>,
}

impl ResolvedInstance {
    /// Qualified identifier, e.g. `hosts.laptop`.
    pub fn id(&self) -> String {
        self.kind.instance_id(&self.name)
    }

    /// Container home, when known and non-empty.
    pub fn container_home(&self) -> Option<&str> {
        self.fields
            .text(names::VM_HOME)
            .filter(|home| !home.trim().is_empty())
    }

    /// The accumulated `rc` field.
    pub fn rc(&self) -> Option<&AttributedList> {
        self.fields.list(names::RC)
    }
}

/// Resolves instances of a [`Document`].
pub struct InstanceResolver<'a> {
    env: &'a Environment,
    probe: &'a dyn ContainerHomeProbe,
}

impl<'a> InstanceResolver<'a> {
    pub fn new(env: &'a Environment, probe: &'a dyn ContainerHomeProbe) -> Self {
        Self { env, probe }
    }

    /// Resolve `name` from the `kind` collection of `document`.
    pub fn resolve(
        &self,
        document: &Document,
        kind: InstanceKind,
        name: &str,
    ) -> Result<ResolvedInstance> {
        let instance_id = kind.instance_id(name);

        let raw = document
            .instances(kind)
            .get(name)
            .ok_or_else(|| Error::InstanceNotFound {
                instance: name.to_string(),
                available: document.instance_names(kind),
            })?;
        let body = raw.as_object().ok_or_else(|| Error::InstanceHasNoOptions {
            instance: instance_id.clone(),
        })?;

        let mut fields = FieldSet::new();
        for (source, source_fields) in merge_sources(document, &instance_id, body)? {
            tracing::debug!(instance = %instance_id, %source, "Merging source");
            merge(&mut fields, &source, source_fields).map_err(|cause| Error::Field {
                instance: instance_id.clone(),
                source_id: source.to_string(),
                cause,
            })?;
        }

        let container_home = match kind {
            InstanceKind::Docker => {
                self.apply_docker_defaults(&instance_id, &mut fields)?;
                fields.text(names::VM_HOME).map(str::to_string)
            }
            InstanceKind::Host => {
                if !fields.contains(names::VOLUME) && !fields.contains(names::RC) {
                    return Err(Error::EmptyTask {
                        instance: instance_id,
                    });
                }
                None
            }
        };

        let volumes = resolve_volumes(&fields, self.env.home(), container_home.as_deref())
            .map_err(|cause| Error::Volume {
                instance: instance_id.clone(),
                cause,
            })?;
        fields.remove(names::VOLUME);

        Ok(ResolvedInstance {
            kind,
            name: name.to_string(),
            fields,
            volumes,
        })
    }

    fn apply_docker_defaults(&self, instance_id: &str, fields: &mut FieldSet) -> Result<()> {
        let image = fields
            .text(names::IMAGE)
            .map(str::to_string)
            .ok_or_else(|| Error::MissingImage {
                instance: instance_id.to_string(),
            })?;

        if !fields.contains(names::VM_HOME) {
            let user = fields.text(names::USER).map(str::to_string);
            let home = self.probe.probe_home(&image, user.as_deref());
            tracing::debug!(instance = %instance_id, %image, %home, "Container home probed");
            let home = AttributedScalar::new(Scalar::Text(home), Source::Container);
            fields.insert(names::VM_HOME, AttributedField::Scalar(home));
        }

        if let Some(name) = fields.get(names::NAME).cloned() {
            fields.insert(names::HOSTNAME, name);
        }

        Ok(())
    }
}

/// Fragments in listed order, then the instance itself.
fn merge_sources<'d>(
    document: &'d Document,
    instance_id: &str,
    body: &'d Map<String, Value>,
) -> Result<Vec<(Source, &'d Map<String, Value>)>> {
    let mut sources = Vec::new();

    if let Some(listed) = body.get(names::GROUP_PARTS) {
        let listed = listed.as_array().ok_or_else(|| Error::GroupPartsNotList {
            instance: instance_id.to_string(),
        })?;

        let group_parts = document.group_parts();
        let mut unknown: Vec<String> = Vec::new();
        for entry in listed {
            let known = entry.as_str().is_some_and(|n| group_parts.contains_key(n));
            let label = match entry {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            if !known && !unknown.contains(&label) {
                unknown.push(label);
            }
        }
        if !unknown.is_empty() {
            return Err(Error::UnknownGroupParts {
                instance: instance_id.to_string(),
                unknown,
            });
        }

        for part in listed.iter().filter_map(Value::as_str) {
            let source = Source::GroupPart(part.to_string());
            let fragment = group_parts
                .get(part)
                .and_then(Value::as_object)
                .ok_or_else(|| Error::MalformedFragment {
                    instance: instance_id.to_string(),
                    source_id: source.to_string(),
                })?;
            sources.push((source, fragment));
        }
    }

    sources.push((Source::Instance, body));
    Ok(sources)
}
