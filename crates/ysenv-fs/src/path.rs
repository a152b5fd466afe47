//! Lexically normalized POSIX paths

use std::path::{Path, PathBuf};

/// A path cleaned of `.`/`..` components and repeated separators.
///
/// Normalization is purely lexical: the filesystem is never consulted, so
/// symlinks are not resolved. Unlike POSIX `normpath`, a leading `//` is
/// collapsed like any other repeated separator, which lets callers join a
/// root-level home (`/`) with a relative tail without producing `//tail`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy();
        Self {
            inner: clean(&raw),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a segment.
    ///
    /// The segment is always treated as relative to `self`, even when it
    /// starts with `/`.
    pub fn join(&self, segment: &str) -> Self {
        Self {
            inner: clean(&format!("{}/{}", self.inner, segment)),
        }
    }

    /// Whether the path starts at the filesystem root.
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/')
    }

    /// Number of bytes in the normalized form.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Always false; a normalized path is at least `.` or `/`.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Whether `self` lies strictly below `ancestor`.
    pub fn is_nested_under(&self, ancestor: &NormalizedPath) -> bool {
        if ancestor.inner == "/" {
            return self.inner.len() > 1 && self.is_absolute();
        }
        self.inner
            .strip_prefix(&ancestor.inner)
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        match self.inner.rsplit('/').next() {
            Some("") | Some(".") | Some("..") | None => None,
            Some(name) => Some(name),
        }
    }

    /// Check if this path exists, following symlinks.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this path is itself a symlink (dangling or not).
    pub fn is_symlink(&self) -> bool {
        self.to_native()
            .symlink_metadata()
            .is_ok_and(|meta| meta.file_type().is_symlink())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 {
                None
            } else {
                Some(&name[idx + 1..])
            }
        })
    }
}

/// Lexically clean a `/`-separated path.
fn clean(raw: &str) -> String {
    if raw.is_empty() {
        return ".".to_string();
    }

    let absolute = raw.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for component in raw.split('/') {
        match component {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                // `..` above the root is the root
                _ if absolute => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    if absolute {
        format!("/{}", body)
    } else if body.is_empty() {
        ".".to_string()
    } else {
        body
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
