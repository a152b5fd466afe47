//! Command implementations for ysenv-cli

pub mod edit;
pub mod resolve;

pub use edit::run_edit;
pub use resolve::run_resolve;
