//! Error types for ysenv-core

use crate::merge::MergeError;
use crate::volume::VolumeError;

/// Result type for ysenv-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving or rendering an instance
///
/// Every variant is terminal for the current invocation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A top-level document key is missing or has the wrong type
    #[error("Malformed environment document: \"{field}\" is missing or has the wrong type")]
    MalformedDocument { field: &'static str },

    /// The requested instance is not declared
    #[error("Instance \"{instance}\" not found (available: {})", .available.join(", "))]
    InstanceNotFound {
        instance: String,
        available: Vec<String>,
    },

    /// The instance is declared but carries no mapping of options
    #[error("Instance \"{instance}\" has no options")]
    InstanceHasNoOptions { instance: String },

    /// The instance's `groupParts` is not a list
    #[error("Malformed environment document: \"groupParts\" of {instance} must be a list")]
    GroupPartsNotList { instance: String },

    /// The instance references group parts the document does not define
    #[error(
        "Malformed environment document: {instance} references unknown group parts: {}",
        .unknown.iter().map(|n| format!("\"{}\"", n)).collect::<Vec<_>>().join(", ")
    )]
    UnknownGroupParts {
        instance: String,
        unknown: Vec<String>,
    },

    /// A merge source is not a mapping
    #[error("Malformed environment document: {source_id} of {instance} is not a mapping")]
    MalformedFragment { instance: String, source_id: String },

    /// A field failed validation while being merged
    #[error("Malformed environment document: {instance}: {source_id}: {cause}")]
    Field {
        instance: String,
        source_id: String,
        #[source]
        cause: MergeError,
    },

    /// A volume spec could not be parsed
    #[error("Malformed environment document: {instance}: {cause}")]
    Volume {
        instance: String,
        #[source]
        cause: VolumeError,
    },

    /// A docker instance resolved without an image
    #[error("Malformed environment document: {instance} does not name an image")]
    MissingImage { instance: String },

    /// A host instance resolved with nothing to do
    #[error(
        "Malformed environment document: {instance} is an empty task (no \"volume\", no \"rc\")"
    )]
    EmptyTask { instance: String },

    /// The invoking user's home directory is unknown
    #[error("Could not determine the home directory of the current user")]
    HomeDirUnavailable,

    /// Filesystem error from ysenv-fs
    #[error(transparent)]
    Fs(#[from] ysenv_fs::Error),
}
