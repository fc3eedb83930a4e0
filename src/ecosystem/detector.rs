//! Ecosystem detection over a single directory listing

use super::listing::DirectoryListing;
use super::rules::{EcosystemMap, EcosystemRule, Heuristic};
use crate::error::{GeneratorError, Result};
use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Basename matching: `*` never crosses a separator, dotfiles are matched
/// like any other name.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Ecosystem identifiers found in one directory
pub type DetectionResult = BTreeSet<String>;

/// How a rule matched, kept for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchSource {
    Heuristic(usize),
    Pattern,
}

/// Classifies a directory listing against every rule of the map.
///
/// Rule order only affects log ordering; the result is the union of every
/// rule that fires.
pub fn detect(listing: &DirectoryListing, ecosystems: &EcosystemMap) -> Result<DetectionResult> {
    let mut found = DetectionResult::new();
    if listing.is_empty() {
        return Ok(found);
    }

    for rule in ecosystems {
        if let Some(source) = match_heuristics(listing, rule)? {
            debug!(ecosystem = %rule.ecosystem, ?source, "Ecosystem matched");
            found.insert(rule.ecosystem.clone());
        }

        if any_file_matches(listing, &rule.ecosystem, &rule.patterns)? {
            debug!(ecosystem = %rule.ecosystem, source = ?MatchSource::Pattern, "Ecosystem matched");
            found.insert(rule.ecosystem.clone());
        }
    }

    Ok(found)
}

/// Reads `dir` and runs [`detect`] on its listing
pub fn detect_directory(dir: &Path, ecosystems: &EcosystemMap) -> Result<DetectionResult> {
    let listing = DirectoryListing::read(dir)?;
    let found = detect(&listing, ecosystems)?;
    if !found.is_empty() {
        debug!(
            directory = %dir.display(),
            ecosystems = ?found,
            "Detected ecosystems"
        );
    }
    Ok(found)
}

/// Returns the first heuristic of `rule` that matches, if any
fn match_heuristics(listing: &DirectoryListing, rule: &EcosystemRule) -> Result<Option<MatchSource>> {
    for (index, heuristic) in rule.heuristics.iter().enumerate() {
        if heuristic_matches(listing, &rule.ecosystem, heuristic)? {
            return Ok(Some(MatchSource::Heuristic(index)));
        }
    }
    Ok(None)
}

fn heuristic_matches(listing: &DirectoryListing, ecosystem: &str, heuristic: &Heuristic) -> Result<bool> {
    for pattern in &heuristic.present {
        if !any_file_matches(listing, ecosystem, std::slice::from_ref(pattern))? {
            return Ok(false);
        }
    }

    Ok(!any_file_matches(listing, ecosystem, &heuristic.absent)?)
}

/// True when any file in the listing matches any of `patterns`
fn any_file_matches(listing: &DirectoryListing, ecosystem: &str, patterns: &[String]) -> Result<bool> {
    for raw in patterns {
        let pattern = compile(ecosystem, raw)?;
        if listing.iter().any(|file| pattern.matches_with(file, MATCH_OPTIONS)) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn compile(ecosystem: &str, pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|source| GeneratorError::InvalidPattern {
        ecosystem: ecosystem.to_string(),
        pattern: pattern.to_string(),
        source,
    })
}
