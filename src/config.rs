//! Runtime configuration for dependabot-gen
//!
//! Settings are read from environment variables with defaults, then the CLI
//! overrides individual fields.
//!
//! # Environment Variables
//!
//! - `DEPGEN_SCAN_PATH`: Directory to scan - default: "."
//! - `DEPGEN_INTERVAL`: Update interval - default: "weekly"
//! - `DEPGEN_OUTPUT`: Output file - default: ".github/dependabot.yml"
//! - `DEPGEN_IGNORE_DIRS`: Comma-separated exclusion substrings - default: ".venv,node_modules"
//! - `DEPGEN_CUSTOM_MAP`: JSON list of extra ecosystem rules - default: empty
//! - `DEPGEN_LOG_LEVEL`: Logging level - default: "info"

use std::env;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_SCAN_PATH: &str = ".";
const DEFAULT_INTERVAL: &str = "weekly";
const DEFAULT_OUTPUT_PATH: &str = ".github/dependabot.yml";
const DEFAULT_IGNORE_DIRS: &str = ".venv,node_modules";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Schedule intervals accepted by dependabot
pub const VALID_INTERVALS: &[&str] = &[
    "daily",
    "weekly",
    "monthly",
    "quarterly",
    "semiannually",
    "yearly",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid interval: {0}. Valid options: daily, weekly, monthly, quarterly, semiannually, yearly")]
    InvalidInterval(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub scan_path: PathBuf,
    pub interval: String,
    pub output_path: PathBuf,
    pub ignore_dirs: Vec<String>,
    /// Extra rules as JSON, prepended to the built-in map
    pub custom_map: Option<String>,
    pub log_level: String,
}

impl Default for GeneratorConfig {
    /// Loads from `DEPGEN_*` environment variables, falling back to defaults
    fn default() -> Self {
        let scan_path = env::var("DEPGEN_SCAN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SCAN_PATH));

        let interval = env::var("DEPGEN_INTERVAL")
            .unwrap_or_else(|_| DEFAULT_INTERVAL.to_string())
            .to_lowercase();

        let output_path = env::var("DEPGEN_OUTPUT")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_PATH));

        let ignore_dirs = parse_ignore_dirs(
            &env::var("DEPGEN_IGNORE_DIRS").unwrap_or_else(|_| DEFAULT_IGNORE_DIRS.to_string()),
        );

        let custom_map = env::var("DEPGEN_CUSTOM_MAP")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let log_level = env::var("DEPGEN_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Self {
            scan_path,
            interval,
            output_path,
            ignore_dirs,
            custom_map,
            log_level,
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Scan path must not be empty".to_string(),
            ));
        }

        if !VALID_INTERVALS.contains(&self.interval.as_str()) {
            return Err(ConfigError::InvalidInterval(self.interval.clone()));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Output path must not be empty".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }
}

impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dependabot-gen Configuration:")?;
        writeln!(f, "  Scan Path: {}", self.scan_path.display())?;
        writeln!(f, "  Interval: {}", self.interval)?;
        writeln!(f, "  Output: {}", self.output_path.display())?;
        writeln!(f, "  Ignore Dirs: {}", self.ignore_dirs.join(","))?;
        writeln!(
            f,
            "  Custom Map: {}",
            if self.custom_map.is_some() { "yes" } else { "no" }
        )?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

/// Splits a comma-separated list, trimming entries and dropping empty ones
pub fn parse_ignore_dirs(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
