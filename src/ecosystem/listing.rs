//! File listing of a single directory

use crate::error::{GeneratorError, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Basenames of the regular files directly inside one directory.
///
/// Subdirectories and nested files are not part of the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryListing {
    files: BTreeSet<String>,
}

impl DirectoryListing {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            files: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads the immediate file entries of `dir`
    pub fn read(dir: &Path) -> Result<Self> {
        let read_error = |source| GeneratorError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = BTreeSet::new();
        for entry in fs::read_dir(dir).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            let file_type = entry.file_type().map_err(read_error)?;
            // Symlinks to files count as files, like a stat-based listing would
            let is_file = if file_type.is_symlink() {
                entry.path().is_file()
            } else {
                file_type.is_file()
            };
            if is_file {
                files.insert(entry.file_name().to_string_lossy().into_owned());
            }
        }

        Ok(Self { files })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains(name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
