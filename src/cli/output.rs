//! Output formatting for detection reports

use crate::render::RenderModel;
use anyhow::{Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable aligned text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the ecosystem → directories mapping of a scan
    pub fn format(&self, model: &RenderModel) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(model).context("Failed to serialize report to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(model).context("Failed to serialize report to YAML")
            }
            OutputFormat::Human => Ok(self.format_human(model)),
        }
    }

    fn format_human(&self, model: &RenderModel) -> String {
        if model.is_empty() {
            return "No package ecosystems detected.\n".to_string();
        }

        let width = model.ecosystems().map(str::len).max().unwrap_or(0);
        model
            .iter()
            .map(|(ecosystem, directories)| {
                let directories: Vec<&str> = directories.iter().map(String::as_str).collect();
                format!("{:<width$}  {}\n", ecosystem, directories.join(", "), width = width)
            })
            .collect()
    }
}
