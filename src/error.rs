//! Error types for ecosystem detection, scanning and rendering

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Errors raised while loading rules, scanning a tree or rendering the config
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The custom ecosystem map is not a valid list of rules
    #[error("failed to parse custom ecosystem map: {source} (input: {input})")]
    Parse {
        input: String,
        #[source]
        source: serde_json::Error,
    },

    /// A rule carries a glob pattern that cannot be compiled
    #[error("invalid glob pattern '{pattern}' for ecosystem '{ecosystem}': {source}")]
    InvalidPattern {
        ecosystem: String,
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A single directory listing could not be read
    #[error("could not read directory {}: {source}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("scan root does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("scan root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    /// The directory walk itself failed
    #[error("error walking directories under {}: {source}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Re-detection failed for a directory recorded by the scan
    #[error("failed to render configuration for directory '{directory}': {source}")]
    Render {
        directory: String,
        #[source]
        source: Box<GeneratorError>,
    },
}

impl GeneratorError {
    /// True for failures that only affect a single directory
    pub fn is_directory_read(&self) -> bool {
        matches!(self, GeneratorError::DirectoryRead { .. })
    }
}
