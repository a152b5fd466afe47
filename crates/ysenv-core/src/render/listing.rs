//! Human-readable instance listing

use crate::document::InstanceKind;
use crate::field::{AttributedField, Scalar, names};
use crate::resolver::ResolvedInstance;

use super::is_internal;

/// Render the provenance listing of `instance`.
pub fn render_listing(instance: &ResolvedInstance, base_path: &str) -> String {
    let fields = &instance.fields;
    let mut lines = vec![format!("basePath: {}", base_path)];

    if instance.kind == InstanceKind::Docker {
        for key in [names::VM_HOME, names::IMAGE] {
            if let Some(field) = fields.scalar(key) {
                lines.push(format!("{}: {}   (by {})", key, field.value, field.source));
            }
        }
        lines.push(String::new());

        lines.push("Set option:".to_string());
        match fields.scalar(names::NOT_ONCE) {
            Some(not_once) if not_once.value == Scalar::Flag(true) => {
                lines.push(format!("  #notOnce   (by {})", not_once.source));
            }
            _ => lines.push("  --rm   (by default)".to_string()),
        }

        for (key, field) in fields.iter().filter(|(key, _)| !is_internal(key)) {
            match field {
                AttributedField::List(list) => {
                    for element in list.iter() {
                        lines.push(format!(
                            "   --{} = {}   (by {})",
                            key, element.value, element.source
                        ));
                    }
                }
                AttributedField::Scalar(scalar) => match scalar.value {
                    Scalar::Flag(true) => {
                        lines.push(format!("  --{}   (by {})", key, scalar.source));
                    }
                    Scalar::Flag(false) => {
                        lines.push(format!("  #{}   (by {})", key, scalar.source));
                    }
                    _ => lines.push(format!(
                        "  --{} = {}   (by {})",
                        key, scalar.value, scalar.source
                    )),
                },
            }
        }
        lines.push(String::new());
    }

    if let Some(volumes) = &instance.volumes {
        lines.push("Volume list:".to_string());
        let width = volumes
            .iter()
            .map(|v| v.container_path.len())
            .max()
            .unwrap_or(0);
        for volume in volumes {
            lines.push(format!(
                "  {:<width$} --> {}   (by {})",
                volume.container_path.as_str(),
                volume.host_path,
                volume.source,
                width = width
            ));
        }
        lines.push(String::new());
    }

    if let Some(rc) = instance.rc() {
        lines.push("rc file:".to_string());
        let mut current = None;
        for line in rc.iter() {
            if current != Some(&line.source) {
                current = Some(&line.source);
                lines.push(format!("  (by {})", line.source));
            }
            lines.push(format!("    {}", line.value));
        }
        lines.push(String::new());
    }

    lines.join("\n")
}
