//! Content-addressed rc files

use ysenv_fs::{EnvPath, NormalizedPath, checksum, io};

use crate::field::AttributedList;

/// Hex characters of the content digest kept in the file name.
pub const RC_DIGEST_LEN: usize = 7;

/// Where and what to write for an instance's `rc` lines.
///
/// Deriving a plan touches nothing; [`RcFilePlan::materialize`] performs the
/// create-if-absent write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RcFilePlan {
    pub file_name: String,
    pub file_path: NormalizedPath,
    pub content: String,
}

impl RcFilePlan {
    /// Plan the rc file for `lines` under `dir`.
    pub fn derive<'a>(lines: impl IntoIterator<Item = &'a str>, dir: &NormalizedPath) -> Self {
        let content = lines.into_iter().collect::<Vec<_>>().join("\n");
        let digest = checksum::short_content_digest(&content, RC_DIGEST_LEN);
        let file_name = format!("{}{}", EnvPath::RcFilePrefix, digest);

        Self {
            file_path: dir.join(&file_name),
            file_name,
            content,
        }
    }

    /// Plan from an attributed `rc` list.
    pub fn from_list(rc: &AttributedList, dir: &NormalizedPath) -> Self {
        let lines: Vec<String> = rc.iter().map(|line| line.value.to_string()).collect();
        Self::derive(lines.iter().map(String::as_str), dir)
    }

    /// Write the file unless one with the same name exists.
    ///
    /// Returns whether a new file was written.
    pub fn materialize(&self) -> ysenv_fs::Result<bool> {
        let written = io::write_if_absent(&self.file_path, self.content.as_bytes())?;
        tracing::debug!(path = %self.file_path, written, "rc file materialized");
        Ok(written)
    }

    /// Whether `name` looks like a file produced by any rc plan.
    pub fn is_rc_file_name(name: &str) -> bool {
        name.starts_with(EnvPath::RcFilePrefix.as_str())
    }
}
