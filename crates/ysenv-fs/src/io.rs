//! File operations with advisory locking

use crate::{Error, NormalizedPath, Result};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};

/// Create `path` with `content` unless something already exists there.
///
/// Returns `Ok(true)` when the file was written and `Ok(false)` when an
/// entry with that name was already present. Creation uses `create_new`, so
/// two racing writers never truncate each other; the winner holds an
/// exclusive lock while writing.
pub fn write_if_absent(path: &NormalizedPath, content: &[u8]) -> Result<bool> {
    let native_path = path.to_native();

    if let Some(parent) = native_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let mut file = match OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&native_path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            tracing::debug!(path = %path, "File already present, not rewriting");
            return Ok(false);
        }
        Err(e) => return Err(Error::io(&native_path, e)),
    };

    file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    file.write_all(content)
        .map_err(|e| Error::io(&native_path, e))?;

    file.sync_all().map_err(|e| Error::io(&native_path, e))?;

    file.unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    tracing::debug!(path = %path, bytes = content.len(), "Wrote new file");
    Ok(true)
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Names of the entries directly inside `dir`, sorted.
///
/// Names that are not valid UTF-8 are skipped.
pub fn list_entry_names(dir: &NormalizedPath) -> Result<Vec<String>> {
    let native_dir = dir.to_native();
    let mut names = Vec::new();

    for entry in fs::read_dir(&native_dir).map_err(|e| Error::io(&native_dir, e))? {
        let entry = entry.map_err(|e| Error::io(&native_dir, e))?;
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}
