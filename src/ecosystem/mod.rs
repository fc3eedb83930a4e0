//! Ecosystem rules and per-directory detection
//!
//! An [`EcosystemMap`] is an ordered list of [`EcosystemRule`]s. Each rule
//! names one ecosystem and either a set of glob patterns (any match fires the
//! rule) or an ordered list of [`Heuristic`]s (the first heuristic whose
//! `present` files all exist and whose `absent` files are all missing fires
//! the rule). Patterns are shell-style globs applied to bare file names.

pub mod detector;
pub mod listing;
pub mod rules;

pub use detector::{detect, detect_directory, DetectionResult};
pub use listing::DirectoryListing;
pub use rules::{load_ecosystem_map, EcosystemMap, EcosystemRule, Heuristic};
