//! [`TestHome`]: a throwaway home directory for resolver and renderer tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use ysenv_core::Environment;

/// A temporary directory standing in for the invoking user's home.
///
/// # Example
///
/// ```rust,no_run
/// use ysenv_test_utils::TestHome;
///
/// let home = TestHome::new();
/// home.write(".bashrc_ysenv_0000000", "stale");
/// home.assert_file_exists(".bashrc_ysenv_0000000");
/// let env = home.env();
/// ```
pub struct TestHome {
    temp_dir: TempDir,
}

impl Default for TestHome {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHome {
    /// Create an empty temporary home.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The home path as a `/`-separated string.
    pub fn path_str(&self) -> String {
        self.path().to_string_lossy().replace('\\', "/")
    }

    /// An [`Environment`] rooted at this home.
    pub fn env(&self) -> Environment {
        Environment::with_home(self.path())
    }

    /// Absolute path of `relative` inside the home.
    pub fn join(&self, relative: &str) -> PathBuf {
        self.path().join(relative)
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let full_path = self.join(relative);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("TestHome::write: {}: {e}", full_path.display()));
        full_path
    }

    /// Names of entries directly in the home, sorted.
    pub fn entries(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    /// Assert that `relative` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        let full_path = self.join(relative);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `relative` does **not** exist.
    pub fn assert_file_not_exists(&self, relative: &str) {
        let full_path = self.join(relative);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `relative` holds exactly `content`.
    pub fn assert_file_content(&self, relative: &str, content: &str) {
        let full_path = self.join(relative);
        let actual = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        assert_eq!(actual, content, "Unexpected content in {}", full_path.display());
    }
}
