use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Generate a dependabot configuration from the package ecosystems found in a repository
#[derive(Parser, Debug)]
#[command(
    name = "dependabot-gen",
    about = "Generate a dependabot configuration from the package ecosystems found in a repository",
    version,
    long_about = "dependabot-gen walks a repository, detects which package ecosystems live in \
                  each directory (go.mod, uv.lock, package.json, Dockerfile, ...) and writes a \
                  dependabot.yml covering all of them."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

impl CliArgs {
    /// Log level chosen on the command line, if any
    pub fn log_level_override(&self) -> Option<&str> {
        if let Some(level) = self.log_level.as_deref() {
            Some(level)
        } else if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Scan a repository and write a dependabot configuration",
        long_about = "Scans the repository for package ecosystems and writes the dependabot \
                      configuration file.\n\n\
                      Examples:\n  \
                      dependabot-gen generate\n  \
                      dependabot-gen generate /path/to/repo --interval daily\n  \
                      dependabot-gen generate --ignore-dirs .venv,node_modules,vendor\n  \
                      dependabot-gen generate --stdout"
    )]
    Generate(GenerateArgs),

    #[command(
        about = "Show which ecosystems are detected in which directories",
        long_about = "Scans the repository and prints the ecosystem to directories mapping \
                      without writing any file.\n\n\
                      Examples:\n  \
                      dependabot-gen detect\n  \
                      dependabot-gen detect /path/to/repo --format json"
    )]
    Detect(DetectArgs),
}

/// Options shared by every command that scans a tree
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to scan (defaults to DEPGEN_SCAN_PATH or the current directory)"
    )]
    pub scan_path: Option<PathBuf>,

    #[arg(
        long,
        value_name = "LIST",
        help = "Comma-separated substrings; matching directories are skipped with their subtree"
    )]
    pub ignore_dirs: Option<String>,

    #[arg(
        long,
        value_name = "JSON",
        conflicts_with = "custom_map_file",
        help = "JSON list of extra ecosystem rules, evaluated before the built-in ones"
    )]
    pub custom_map: Option<String>,

    #[arg(long, value_name = "FILE", help = "Read extra ecosystem rules from a JSON file")]
    pub custom_map_file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    #[arg(short = 'i', long, value_name = "INTERVAL", help = "Update interval for every ecosystem")]
    pub interval: Option<String>,

    #[arg(short = 'o', long, value_name = "FILE", help = "Output file path")]
    pub output: Option<PathBuf>,

    #[arg(long, conflicts_with = "output", help = "Print the configuration instead of writing it")]
    pub stdout: bool,
}

#[derive(Args, Debug, Clone)]
pub struct DetectArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
