//! Resolution engine for ysenv environment documents
//!
//! Turns a named `host` or `docker` instance of an environment document into
//! shell text:
//!
//! - **Schema validation**: top-level shape of the document ([`Document`])
//! - **Field merging**: group parts and instance fields folded into one
//!   attributed [`FieldSet`], every value remembering its contributor
//! - **Volume resolution**: `host:container[:perm]` parsing, `~/` expansion
//!   and removal of overridden mounts ([`volume`])
//! - **Instance resolution**: the orchestration above plus kind-specific
//!   defaults ([`InstanceResolver`])
//! - **Rendering**: listing, host symlink commands or a `docker run` line
//!   ([`render`])
//!
//! ```text
//!   raw document ──> Document ──> InstanceResolver ──> ResolvedInstance ──> render
//!                                   │        │
//!                                 merge    volume
//! ```

pub mod document;
pub mod engine;
pub mod environment;
pub mod error;
pub mod field;
pub mod merge;
pub mod probe;
pub mod render;
pub mod resolver;
pub mod volume;

pub use document::{Document, InstanceKind};
pub use engine::Engine;
pub use environment::Environment;
pub use error::{Error, Result};
pub use field::{
    AttributedField, AttributedList, AttributedScalar, FieldKind, FieldSet, Scalar, Source,
};
pub use merge::{MergeError, merge};
pub use probe::{ContainerHomeProbe, DockerHomeProbe};
pub use render::{Outcome, RcFilePlan};
pub use resolver::{InstanceResolver, ResolvedInstance};
pub use volume::{VolumeEntry, VolumeError, resolve_volumes};
