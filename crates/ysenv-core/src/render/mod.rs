//! Command renderers
//!
//! Each renderer consumes a [`ResolvedInstance`](crate::ResolvedInstance)
//! and produces the text printed for the user:
//!
//! - [`listing`]: human-readable dump with provenance
//! - [`host`]: `ln -sf` commands plus rc-file sourcing instructions
//! - [`docker`]: a single `docker run` command line

pub mod docker;
pub mod host;
pub mod listing;
pub mod rc;
pub mod shell;

pub use docker::render_docker;
pub use host::render_host;
pub use listing::render_listing;
pub use rc::RcFilePlan;

use crate::field::names;

/// Fields consumed by renderers rather than emitted as `--flag` options.
pub const INTERNAL_FIELDS: &[&str] = &[
    names::IMAGE,
    names::VM_HOME,
    names::NOT_ONCE,
    names::VOLUME,
    names::RC,
];

pub(crate) fn is_internal(field: &str) -> bool {
    INTERNAL_FIELDS.contains(&field)
}

/// Text plus the exit code it should be reported with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub exit_code: i32,
    pub text: String,
}

impl Outcome {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            text: text.into(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            exit_code: 1,
            text: text.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}
