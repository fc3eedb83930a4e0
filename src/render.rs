//! Dependabot configuration rendering
//!
//! Every scanned directory is re-classified, the result is inverted into an
//! ecosystem → directories mapping, and the mapping is written out as a
//! `version: 2` document. Ecosystems and directories are emitted in sorted
//! order so the same inputs always produce byte-identical text.

use crate::ecosystem::{detect_directory, EcosystemMap};
use crate::error::{GeneratorError, Result};
use crate::scanner::ROOT_DIRECTORY;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Ecosystem of the always-present block covering workflow and action files
pub const META_ECOSYSTEM: &str = "github-actions";

/// Targets of the meta-ecosystem block
pub const META_DIRECTORIES: &[&str] = &[
    "/",
    ".github/actions/*/*.yml",
    ".github/actions/*/*.yaml",
    "action.yml",
    "action.yaml",
    "actions/*/*.yml",
    "actions/*/*.yaml",
];

/// Label attached to every update block
pub const DEPENDENCIES_LABEL: &str = "dependencies";

/// Ecosystem → sorted, deduplicated directories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderModel {
    ecosystems: BTreeMap<String, BTreeSet<String>>,
}

impl RenderModel {
    /// Re-detects every directory under `root` and groups them by ecosystem.
    ///
    /// Any directory that can no longer be classified fails the whole build.
    pub fn build<S: AsRef<str>>(root: &Path, directories: &[S], ecosystems: &EcosystemMap) -> Result<Self> {
        let mut model = Self::default();

        for directory in directories {
            let directory = directory.as_ref();
            let absolute = resolve(root, directory);

            let detected = detect_directory(&absolute, ecosystems).map_err(|source| {
                GeneratorError::Render {
                    directory: directory.to_string(),
                    source: Box::new(source),
                }
            })?;

            for ecosystem in detected {
                model.insert(ecosystem, directory);
            }
        }

        debug!(ecosystems = model.len(), "Built render model");
        Ok(model)
    }

    pub fn insert(&mut self, ecosystem: impl Into<String>, directory: impl Into<String>) {
        self.ecosystems
            .entry(ecosystem.into())
            .or_default()
            .insert(directory.into());
    }

    /// Directories for `ecosystem`, sorted
    pub fn directories(&self, ecosystem: &str) -> Option<&BTreeSet<String>> {
        self.ecosystems.get(ecosystem)
    }

    pub fn ecosystems(&self) -> impl Iterator<Item = &str> {
        self.ecosystems.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.ecosystems.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.ecosystems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ecosystems.is_empty()
    }

    /// Formats the model as a dependabot configuration document
    pub fn to_document(&self, interval: &str) -> String {
        DependabotDocument {
            model: self,
            interval,
        }
        .to_string()
    }
}

/// Renders the configuration for directories found by a scan of `root`
pub fn render<S: AsRef<str>>(
    root: &Path,
    directories: &[S],
    interval: &str,
    ecosystems: &EcosystemMap,
) -> Result<String> {
    info!(
        directories = directories.len(),
        interval, "Generating dependabot configuration"
    );
    let model = RenderModel::build(root, directories, ecosystems)?;
    Ok(model.to_document(interval))
}

/// Maps a scan-relative directory back onto the filesystem
fn resolve(root: &Path, directory: &str) -> PathBuf {
    if directory == ROOT_DIRECTORY || directory == "." {
        return root.to_path_buf();
    }
    root.join(directory.trim_start_matches('/'))
}

struct DependabotDocument<'a> {
    model: &'a RenderModel,
    interval: &'a str,
}

impl fmt::Display for DependabotDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version: 2")?;
        writeln!(f, "updates:")?;

        writeln!(f, "  - package-ecosystem: {}", Quoted(META_ECOSYSTEM))?;
        writeln!(f, "    directories: {}", FlowList(META_DIRECTORIES))?;
        write_schedule(f, self.interval)?;
        write_groups(f, META_ECOSYSTEM)?;
        write_labels(f)?;

        for (ecosystem, directories) in self.model.iter() {
            let directories: Vec<&str> = directories.iter().map(String::as_str).collect();

            writeln!(f)?;
            writeln!(f, "  - package-ecosystem: {}", Quoted(ecosystem))?;
            writeln!(f, "    directories: {}", FlowList(&directories))?;
            write_schedule(f, self.interval)?;
            writeln!(f, "    allow:")?;
            writeln!(f, "      - dependency-type: all")?;
            write_groups(f, ecosystem)?;
            write_labels(f)?;
        }

        Ok(())
    }
}

fn write_schedule(f: &mut fmt::Formatter<'_>, interval: &str) -> fmt::Result {
    writeln!(f, "    schedule:")?;
    writeln!(f, "      interval: {}", Quoted(interval))
}

fn write_groups(f: &mut fmt::Formatter<'_>, group: &str) -> fmt::Result {
    writeln!(f, "    groups:")?;
    writeln!(f, "      {}:", Key(group))?;
    writeln!(f, "        patterns: [\"*\"]")?;
    writeln!(f, "        update-types: [\"minor\", \"patch\"]")
}

fn write_labels(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "    labels:")?;
    writeln!(f, "      - {}", Quoted(DEPENDENCIES_LABEL))
}

/// Double-quoted YAML scalar
struct Quoted<'a>(&'a str);

impl fmt::Display for Quoted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"")?;
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("\\\"")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\t' => f.write_str("\\t")?,
                '\r' => f.write_str("\\r")?,
                c if c.is_control() => write!(f, "\\u{:04X}", c as u32)?,
                c => write!(f, "{}", c)?,
            }
        }
        f.write_str("\"")
    }
}

/// Mapping key: bare when it is a plain identifier, quoted otherwise
struct Key<'a>(&'a str);

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plain = !self.0.is_empty()
            && self.0.starts_with(|c: char| c.is_ascii_alphanumeric())
            && self
                .0
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if plain {
            f.write_str(self.0)
        } else {
            write!(f, "{}", Quoted(self.0))
        }
    }
}

/// Flow sequence of quoted scalars: `["a", "b"]`
struct FlowList<'a>(&'a [&'a str]);

impl fmt::Display for FlowList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", Quoted(item))?;
        }
        f.write_str("]")
    }
}
