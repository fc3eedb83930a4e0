//! Command handlers. Each returns the process exit code.

use super::commands::{DetectArgs, GenerateArgs, ScanArgs};
use super::output::OutputFormatter;
use crate::config::{parse_ignore_dirs, GeneratorConfig};
use crate::ecosystem::EcosystemMap;
use crate::render::{render, RenderModel};
use crate::scanner::TreeScanner;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

/// `log_level` is the level given on the command line; it replaces
/// `DEPGEN_LOG_LEVEL` before the configuration is validated.
pub fn handle_generate(args: &GenerateArgs, log_level: Option<&str>) -> i32 {
    match run_generate(args, log_level) {
        Ok(()) => 0,
        Err(e) => {
            error!("Application failed: {:#}", e);
            1
        }
    }
}

pub fn handle_detect(args: &DetectArgs, log_level: Option<&str>) -> i32 {
    match run_detect(args, log_level) {
        Ok(()) => 0,
        Err(e) => {
            error!("Detection failed: {:#}", e);
            1
        }
    }
}

fn run_generate(args: &GenerateArgs, log_level: Option<&str>) -> Result<()> {
    let mut config = resolve_config(&args.scan, log_level)?;
    if let Some(interval) = &args.interval {
        config.interval = interval.to_lowercase();
    }
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }
    config.validate()?;

    info!(
        scan_path = %config.scan_path.display(),
        interval = %config.interval,
        output = %config.output_path.display(),
        "Starting dependabot generation"
    );

    let ecosystems = EcosystemMap::load(config.custom_map.as_deref())
        .context("Error getting ecosystem map")?;

    let directories = TreeScanner::new(&config.scan_path, config.ignore_dirs.iter().cloned(), &ecosystems)
        .and_then(|scanner| scanner.scan())
        .context("Error scanning directories")?;
    info!(
        count = directories.len(),
        directories = ?directories,
        "Found directories with dependency files"
    );

    let document = render(&config.scan_path, &directories, &config.interval, &ecosystems)
        .context("Error generating config")?;

    if args.stdout {
        print!("{}", document);
        return Ok(());
    }

    write_output(&config.output_path, &document)?;
    info!(output = %config.output_path.display(), "Dependabot configuration generated");
    Ok(())
}

fn run_detect(args: &DetectArgs, log_level: Option<&str>) -> Result<()> {
    let config = resolve_config(&args.scan, log_level)?;
    config.validate()?;

    let ecosystems = EcosystemMap::load(config.custom_map.as_deref())
        .context("Error getting ecosystem map")?;

    let directories = TreeScanner::new(&config.scan_path, config.ignore_dirs.iter().cloned(), &ecosystems)
        .and_then(|scanner| scanner.scan())
        .context("Error scanning directories")?;

    let model = RenderModel::build(&config.scan_path, &directories, &ecosystems)
        .context("Error classifying directories")?;

    let output = OutputFormatter::new(args.format.into()).format(&model)?;
    print!("{}", output);
    Ok(())
}

/// Environment defaults overridden by the scan flags and the log level flag
fn resolve_config(args: &ScanArgs, log_level: Option<&str>) -> Result<GeneratorConfig> {
    let mut config = GeneratorConfig::default();

    if let Some(level) = log_level {
        config.log_level = level.to_lowercase();
    }
    if let Some(path) = &args.scan_path {
        config.scan_path = path.clone();
    }
    if let Some(ignore_dirs) = &args.ignore_dirs {
        config.ignore_dirs = parse_ignore_dirs(ignore_dirs);
    }
    if let Some(custom_map) = &args.custom_map {
        config.custom_map = Some(custom_map.clone());
    }
    if let Some(path) = &args.custom_map_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read custom map file {}", path.display()))?;
        config.custom_map = Some(text);
    }

    debug!("Effective configuration:\n{}", config);
    Ok(config)
}

fn write_output(path: &Path, document: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            format!("Error creating output directory '{}'", parent.display())
        })?;
    }

    debug!(output = %path.display(), "Writing dependabot configuration");
    fs::write(path, document)
        .with_context(|| format!("Error writing output file '{}'", path.display()))
}
