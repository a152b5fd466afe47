//! Filesystem helpers for ysenv
//!
//! Provides lexical path normalization, content digests, create-if-absent
//! writes and format-aware loading of the environment document.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::EnvPath;
pub use error::{Error, Result};
pub use path::NormalizedPath;
