//! dependabot-gen - package ecosystem detection and dependabot config generation
//!
//! The library scans a directory tree, classifies every directory against an
//! ordered set of ecosystem rules and renders a `dependabot.yml` that watches
//! each detected ecosystem in the directories where it was found.
//!
//! # Example Usage
//!
//! ```no_run
//! use dependabot_gen::{render, scan, EcosystemMap};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let root = Path::new(".");
//! let ecosystems = EcosystemMap::load(None)?;
//! let directories = scan(root, &[".venv".to_string()], &ecosystems)?;
//! let document = render(root, &directories, "weekly", &ecosystems)?;
//! println!("{}", document);
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`ecosystem`]: rule model, default rule table and per-directory detection
//! - [`scanner`]: tree walk with substring-based exclusion
//! - [`render`]: ecosystem → directories grouping and document output

pub mod cli;
pub mod config;
pub mod ecosystem;
pub mod error;
pub mod render;
pub mod scanner;
pub mod util;

pub use config::{ConfigError, GeneratorConfig};
pub use ecosystem::{
    detect, detect_directory, load_ecosystem_map, DetectionResult, DirectoryListing, EcosystemMap,
    EcosystemRule, Heuristic,
};
pub use error::{GeneratorError, Result};
pub use render::{render, RenderModel};
pub use scanner::{scan, ScanConfig, ScanResult, TreeScanner, ROOT_DIRECTORY};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
pub const NAME: &str = env!("CARGO_PKG_NAME");
