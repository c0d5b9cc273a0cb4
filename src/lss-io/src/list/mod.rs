use std::fs;
use std::path::{Path, PathBuf};

use sequence::{Configuration, FilesystemEntry, FolderContent};

use anyhow::{Context, Result};
use log::warn;

mod error;
pub use error::ListerError;

/// Iterator over the entries of a single directory, yielding one
/// [`FilesystemEntry`] per regular file or sub-directory.
///
/// # Behavior
/// - Yielded filenames are leaf names, never full paths.
/// - Symbolic links are resolved: a link to a directory lists as a directory,
///   a link to a regular file as a file, and a broken link is skipped.
/// - Entries which are neither regular files nor directories (sockets, FIFOs)
///   are skipped, as are entries whose metadata cannot be read (a warning is
///   logged for the latter).
pub struct FolderLister {
    path   : PathBuf,
    entries: fs::ReadDir,
}

impl FolderLister {
    /// Open a directory for listing.
    ///
    /// # Errors
    /// If `path` is not a readable directory.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = fs::read_dir(&path)
            .map_err(ListerError::OpenDirectory)
            .with_context(|| format!("While listing the contents of '{}'", path.display()))?;
        Ok(Self { path, entries })
    }
}

impl Iterator for FolderLister {
    type Item = FilesystemEntry;

    fn next(&mut self) -> Option<FilesystemEntry> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e)    => {
                    warn!("Skipping an unreadable entry of '{}': {e}", self.path.display());
                    continue
                }
            };
            let Ok(file_type) = entry.file_type() else {
                warn!("Skipping '{}': failed to read its file type", entry.path().display());
                continue
            };
            let is_directory = if file_type.is_symlink() {
                match fs::metadata(entry.path()) {
                    Ok(target) if target.is_dir()  => true,
                    Ok(target) if target.is_file() => false,
                    _ => continue, // broken link, or link to something exotic
                }
            } else if file_type.is_dir() {
                true
            } else if file_type.is_file() {
                false
            } else {
                continue
            };
            return Some(FilesystemEntry {
                filename: entry.file_name().to_string_lossy().into_owned(),
                is_directory,
            })
        }
    }
}

/// List a filesystem directory and collate it in one go. The returned
/// [`FolderContent`] is named after the listed path.
///
/// # Errors
/// If `path` is not a readable directory.
pub fn parse_dir(config: &Configuration, path: impl AsRef<Path>) -> Result<FolderContent> {
    let path = path.as_ref();
    let mut content = sequence::parse(config, FolderLister::new(path)?);
    content.name = path.display().to_string();
    Ok(content)
}
