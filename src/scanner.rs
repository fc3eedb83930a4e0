//! Directory tree scanner
//!
//! Walks a tree, prunes excluded subtrees, runs ecosystem detection on every
//! remaining directory and collects the directories that matched.

use crate::ecosystem::{detect_directory, EcosystemMap};
use crate::error::{GeneratorError, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

/// Path recorded for the scan root itself
pub const ROOT_DIRECTORY: &str = "/";

/// Sorted, deduplicated directories relative to the scan root
pub type ScanResult = Vec<String>;

#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Maximum depth below the root, `None` for unlimited
    pub max_depth: Option<usize>,
    /// Descend into symlinked directories
    pub follow_links: bool,
}

/// Scanner for directories containing package ecosystems
pub struct TreeScanner<'a> {
    root: PathBuf,
    exclude: Vec<String>,
    ecosystems: &'a EcosystemMap,
    config: ScanConfig,
}

impl<'a> TreeScanner<'a> {
    /// Creates a scanner rooted at `root`.
    ///
    /// A directory is pruned, together with everything below it, when its path
    /// (the root as given joined with the relative part) contains any of the
    /// `exclude` strings.
    pub fn new<I, S>(root: impl Into<PathBuf>, exclude: I, ecosystems: &'a EcosystemMap) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let root = root.into();
        if !root.exists() {
            return Err(GeneratorError::RootNotFound(root));
        }
        if !root.is_dir() {
            return Err(GeneratorError::RootNotDirectory(root));
        }

        let exclude: Vec<String> = exclude
            .into_iter()
            .map(Into::into)
            .filter(|s: &String| !s.is_empty())
            .collect();

        debug!(
            root = %root.display(),
            exclude = ?exclude,
            "TreeScanner initialized"
        );

        Ok(Self {
            root,
            exclude,
            ecosystems,
            config: ScanConfig::default(),
        })
    }

    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walks the tree and returns every directory with at least one ecosystem
    pub fn scan(&self) -> Result<ScanResult> {
        let start = Instant::now();
        info!(
            root = %self.root.display(),
            rules = self.ecosystems.len(),
            "Scanning for directories with dependency files"
        );

        let mut walker = WalkDir::new(&self.root).follow_links(self.config.follow_links);
        if let Some(max_depth) = self.config.max_depth {
            walker = walker.max_depth(max_depth);
        }

        let mut found = BTreeSet::new();
        let mut visited = 0usize;
        let mut skipped = 0usize;

        for entry in walker
            .into_iter()
            .filter_entry(|e| self.should_visit(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(GeneratorError::Walk {
                        root: self.root.clone(),
                        source: err,
                    });
                }
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry, skipping");
                    skipped += 1;
                    continue;
                }
            };
            visited += 1;

            match detect_directory(entry.path(), self.ecosystems) {
                Ok(ecosystems) if !ecosystems.is_empty() => {
                    found.insert(self.relative_path(entry.path()));
                }
                Ok(_) => {}
                Err(err) if err.is_directory_read() => {
                    warn!(error = %err, "Could not detect ecosystems, skipping directory");
                    skipped += 1;
                }
                Err(err) => return Err(err),
            }
        }

        let directories: ScanResult = found.into_iter().collect();
        info!(
            directories_found = directories.len(),
            visited,
            skipped,
            elapsed_ms = start.elapsed().as_millis(),
            "Scan completed"
        );

        Ok(directories)
    }

    /// Only directories are visited; excluded ones are pruned with their subtree.
    ///
    /// Exclusion looks at the path as walked, root prefix included, so an
    /// exclude string found in the root path itself prunes the whole tree.
    fn should_visit(&self, entry: &DirEntry) -> bool {
        if entry.depth() > 0 && !entry.file_type().is_dir() {
            return false;
        }

        let path = entry.path().to_string_lossy();
        match self.exclude.iter().find(|ignored| path.contains(ignored.as_str())) {
            Some(ignored) => {
                debug!(directory = %path, pattern = %ignored, "Skipping ignored directory");
                false
            }
            None => true,
        }
    }

    /// Forward-slash path relative to the root, [`ROOT_DIRECTORY`] for the root
    fn relative_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        if relative.as_os_str().is_empty() {
            return ROOT_DIRECTORY.to_string();
        }

        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Scans `root` with the default [`ScanConfig`]
pub fn scan(root: &Path, exclude: &[String], ecosystems: &EcosystemMap) -> Result<ScanResult> {
    TreeScanner::new(root, exclude.iter().cloned(), ecosystems)?.scan()
}
