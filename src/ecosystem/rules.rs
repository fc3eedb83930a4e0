//! Detection rule schema and ecosystem map loading

use crate::error::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

/// Built-in rule table, embedded at compile time
const DEFAULT_ECOSYSTEM_MAP: &str = include_str!("default_map.json");

/// An AND-conjunction over a directory listing.
///
/// Matches when every `present` pattern matches at least one file and no
/// `absent` pattern matches any file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Heuristic {
    pub present: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub absent: Vec<String>,
}

impl Heuristic {
    pub fn new<P, S>(present: P) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            present: present.into_iter().map(Into::into).collect(),
            absent: Vec::new(),
        }
    }

    pub fn with_absent<A, S>(mut self, absent: A) -> Self
    where
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.absent = absent.into_iter().map(Into::into).collect();
        self
    }
}

/// Detection rule for a single ecosystem.
///
/// `patterns` are OR'ed together; `heuristics` are tried in order and the
/// first one that matches wins for this rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EcosystemRule {
    pub ecosystem: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub patterns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub heuristics: Vec<Heuristic>,
}

impl EcosystemRule {
    pub fn with_patterns<P, S>(ecosystem: impl Into<String>, patterns: P) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ecosystem: ecosystem.into(),
            patterns: patterns.into_iter().map(Into::into).collect(),
            heuristics: Vec::new(),
        }
    }

    pub fn with_heuristics(ecosystem: impl Into<String>, heuristics: Vec<Heuristic>) -> Self {
        Self {
            ecosystem: ecosystem.into(),
            patterns: Vec::new(),
            heuristics,
        }
    }

    /// A rule with neither patterns nor heuristics never matches
    pub fn is_inert(&self) -> bool {
        self.patterns.is_empty() && self.heuristics.is_empty()
    }
}

/// Ordered list of detection rules.
///
/// Duplicate ecosystem identifiers are allowed and every rule is evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EcosystemMap {
    rules: Vec<EcosystemRule>,
}

impl EcosystemMap {
    pub fn new(rules: Vec<EcosystemRule>) -> Self {
        Self { rules }
    }

    /// Parses the built-in rule table
    pub fn with_defaults() -> Result<Self> {
        parse_rules(DEFAULT_ECOSYSTEM_MAP).map(Self::new)
    }

    /// Builds the map for one run: custom rules first, then the defaults.
    ///
    /// An absent or blank `custom` yields the defaults unchanged. Malformed
    /// custom input is an error, never silently dropped.
    pub fn load(custom: Option<&str>) -> Result<Self> {
        let mut map = Self::with_defaults()?;

        let custom = match custom.map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => return Ok(map),
        };

        let mut rules = parse_rules(custom)?;
        info!(
            custom_rules = rules.len(),
            ecosystems = ?rules.iter().map(|r| r.ecosystem.as_str()).collect::<Vec<_>>(),
            "Parsed custom ecosystem map, prepending to defaults"
        );

        rules.append(&mut map.rules);
        map.rules = rules;
        Ok(map)
    }

    pub fn rules(&self) -> &[EcosystemRule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EcosystemRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Distinct ecosystem identifiers, sorted
    pub fn ecosystems(&self) -> BTreeSet<&str> {
        self.rules.iter().map(|r| r.ecosystem.as_str()).collect()
    }

    pub fn contains(&self, ecosystem: &str) -> bool {
        self.rules.iter().any(|r| r.ecosystem == ecosystem)
    }
}

impl<'a> IntoIterator for &'a EcosystemMap {
    type Item = &'a EcosystemRule;
    type IntoIter = std::slice::Iter<'a, EcosystemRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Convenience wrapper around [`EcosystemMap::load`]
pub fn load_ecosystem_map(custom: Option<&str>) -> Result<EcosystemMap> {
    EcosystemMap::load(custom)
}

fn parse_rules(text: &str) -> Result<Vec<EcosystemRule>> {
    serde_json::from_str(text).map_err(|source| GeneratorError::Parse {
        input: text.to_string(),
        source,
    })
}
