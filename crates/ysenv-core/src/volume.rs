//! Volume spec parsing and overlap resolution
//!
//! A raw spec is `host:container[:perm]`. A leading `~/` expands against the
//! invoking user's home on the host side, and against the container's home
//! (falling back to the user's home) on the container side.
//!
//! Overlaps are resolved by specificity and declaration order: when two
//! entries claim the same container path, the later declaration wins.
//! Entries with distinct container paths are all kept, nested or not.

use ysenv_fs::NormalizedPath;

use crate::field::{AttributedScalar, FieldSet, Source, names};

/// Volume spec failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VolumeError {
    #[error("{source_id}: {spec:?} is not a host:container[:perm] volume")]
    MalformedVolumeSpec { source_id: String, spec: String },
}

/// One resolved mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeEntry {
    pub host_path: NormalizedPath,
    pub container_path: NormalizedPath,
    pub perm: Option<String>,
    pub source: Source,
}

impl VolumeEntry {
    /// Parse one attributed raw spec.
    ///
    /// Segments after the third are ignored; an empty third segment means
    /// no permission flags.
    pub fn parse(
        raw: &AttributedScalar,
        host_home: &NormalizedPath,
        container_home: &NormalizedPath,
    ) -> Result<Self, VolumeError> {
        let spec = raw.value.to_string();
        let mut segments = spec.split(':');

        let (host, container) = match (segments.next(), segments.next()) {
            (Some(host), Some(container)) => (host, container),
            _ => {
                return Err(VolumeError::MalformedVolumeSpec {
                    source_id: raw.source.to_string(),
                    spec,
                });
            }
        };
        let perm = segments
            .next()
            .filter(|perm| !perm.is_empty())
            .map(str::to_string);

        Ok(Self {
            host_path: expand_tilde(host, host_home),
            container_path: expand_tilde(container, container_home),
            perm,
            source: raw.source.clone(),
        })
    }

    /// The `host:container[:perm]` form passed to `docker run --volume`.
    pub fn to_spec(&self) -> String {
        match &self.perm {
            Some(perm) => format!("{}:{}:{}", self.host_path, self.container_path, perm),
            None => format!("{}:{}", self.host_path, self.container_path),
        }
    }
}

fn expand_tilde(raw: &str, home: &NormalizedPath) -> NormalizedPath {
    match raw.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => NormalizedPath::new(raw),
    }
}

/// Parse the `volume` field of `fields` and drop overridden entries.
///
/// Returns `Ok(None)` when no `volume` field is present. An empty or absent
/// `container_home` falls back to `host_home`.
pub fn resolve_volumes(
    fields: &FieldSet,
    host_home: &NormalizedPath,
    container_home: Option<&str>,
) -> Result<Option<Vec<VolumeEntry>>, VolumeError> {
    let Some(raw_list) = fields.list(names::VOLUME) else {
        return Ok(None);
    };

    let container_home = match container_home {
        Some(home) if !home.trim().is_empty() => NormalizedPath::new(home),
        _ => host_home.clone(),
    };

    let entries = raw_list
        .iter()
        .map(|raw| VolumeEntry::parse(raw, host_home, &container_home))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(drop_shadowed(entries)))
}

/// Keep, per container path, only the latest declaration.
///
/// Candidates are visited latest-first and most-specific-first; a candidate
/// is dropped when an already kept entry has an equal container path or the
/// candidate lies beneath one. Survivors are returned in declaration order.
///
/// Nested but distinct paths all survive: `/x` and `/x/y` are both kept.
pub fn drop_shadowed(entries: Vec<VolumeEntry>) -> Vec<VolumeEntry> {
    let mut candidates: Vec<(usize, VolumeEntry)> = entries.into_iter().enumerate().rev().collect();
    candidates.sort_by(|(_, a), (_, b)| b.container_path.len().cmp(&a.container_path.len()));

    let mut kept: Vec<(usize, VolumeEntry)> = Vec::with_capacity(candidates.len());
    for (idx, entry) in candidates {
        // Kept paths are never shorter than the candidate, so in practice
        // only the equality test can match.
        let shadowed = kept.iter().any(|(_, accepted)| {
            entry.container_path == accepted.container_path
                || entry.container_path.is_nested_under(&accepted.container_path)
        });
        if shadowed {
            tracing::debug!(
                container = %entry.container_path,
                source = %entry.source,
                "Dropping overridden volume"
            );
            continue;
        }
        kept.push((idx, entry));
    }

    kept.sort_by_key(|(idx, _)| *idx);
    kept.into_iter().map(|(_, entry)| entry).collect()
}
