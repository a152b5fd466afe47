//! Edit command implementation
//!
//! Prints the shell command that opens the environment document; it never
//! launches the editor itself.

use ysenv_core::render::shell::quote;

use crate::context::DocumentLocation;

/// The command line opening `location` with `editor`.
pub fn run_edit(location: &DocumentLocation, editor: &str) -> String {
    tracing::debug!(path = %location.path, editor, "Edit command");
    format!("{} {}", editor, quote(location.path.as_str()))
}
