//! Document location
//!
//! Works out which environment document a command operates on.

use std::path::PathBuf;

use ysenv_fs::{EnvPath, NormalizedPath};

use crate::error::{CliError, Result};

/// The environment document a command operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation {
    pub path: NormalizedPath,
}

impl DocumentLocation {
    /// Use `explicit` if given, otherwise `<config dir>/ysenv/config.yaml`.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path,
            None => dirs::config_dir()
                .ok_or_else(|| CliError::user("Could not determine the configuration directory"))?
                .join(EnvPath::ConfigDir)
                .join(EnvPath::ConfigFile),
        };
        Ok(Self {
            path: NormalizedPath::from(path),
        })
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Fail with a hint when no document has been written yet.
    pub fn require_existing(&self) -> Result<()> {
        if self.exists() {
            return Ok(());
        }
        Err(CliError::user(format!(
            "No environment document at {}; run `ysenv edit` first",
            self.path
        )))
    }
}
