//! The invoking user's process environment, read once at startup.

use ysenv_fs::NormalizedPath;

use crate::{Error, Result};

/// Process-level facts shared by the resolver and renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    home: NormalizedPath,
}

impl Environment {
    /// Read the invoking user's home directory.
    pub fn from_process() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::HomeDirUnavailable)?;
        Ok(Self::with_home(home))
    }

    /// Build an environment around an explicit home directory.
    pub fn with_home(home: impl Into<NormalizedPath>) -> Self {
        Self { home: home.into() }
    }

    pub fn home(&self) -> &NormalizedPath {
        &self.home
    }

    /// Expand a leading `~` (alone or followed by `/`) to the home directory.
    ///
    /// `~user` forms are returned unchanged.
    pub fn expand_user(&self, raw: &str) -> String {
        if raw == "~" {
            return self.home.to_string();
        }
        match raw.strip_prefix("~/") {
            Some(rest) => self.home.join(rest).to_string(),
            None => raw.to_string(),
        }
    }
}
