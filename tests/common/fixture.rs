use std::fs::{self, File};
use std::path::Path;

use tempfile::TempDir;

/// A temporary directory populated with fixture files and sub-directories.
pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().expect("Failed to create a temporary fixture directory") }
    }

    #[must_use]
    pub fn file(self, filename: &str) -> Self {
        File::create(self.dir.path().join(filename))
            .unwrap_or_else(|e| panic!("Failed to create fixture file {filename}: {e}"));
        self
    }

    #[must_use]
    pub fn files(mut self, filenames: &[&str]) -> Self {
        for filename in filenames {
            self = self.file(filename);
        }
        self
    }

    #[must_use]
    pub fn subdir(self, name: &str) -> Self {
        fs::create_dir(self.dir.path().join(name))
            .unwrap_or_else(|e| panic!("Failed to create fixture directory {name}: {e}"));
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
