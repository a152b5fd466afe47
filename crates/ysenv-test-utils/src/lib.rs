//! Shared test utilities for the ysenv workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`home`]: [`TestHome`], a temporary home directory with assertions
//! - [`document`]: [`DocumentBuilder`] for environment documents
//! - [`probe`]: [`FixedHomeProbe`], a container probe with a canned answer

pub mod document;
pub mod home;
pub mod probe;

pub use document::DocumentBuilder;
pub use home::TestHome;
pub use probe::FixedHomeProbe;
