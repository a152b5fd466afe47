//! Well-known file and directory names used by ysenv.

use std::path::Path;

/// Standard ysenv filesystem names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvPath {
    /// Directory under the platform config dir holding the document
    ConfigDir,
    /// Default document file name
    ConfigFile,
    /// Prefix of generated rc files in the home directory
    RcFilePrefix,
}

impl EnvPath {
    /// Get the string representation of the name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigDir => "ysenv",
            Self::ConfigFile => "config.yaml",
            Self::RcFilePrefix => ".bashrc_ysenv_",
        }
    }
}

impl AsRef<Path> for EnvPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for EnvPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for EnvPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
