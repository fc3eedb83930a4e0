use dependabot_gen::cli::commands::{CliArgs, Commands};
use dependabot_gen::cli::handlers::{handle_detect, handle_generate};
use dependabot_gen::util::logging::{init_logging, LoggingConfig};
use dependabot_gen::{NAME, VERSION};

use clap::Parser;
use std::process;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_flags(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let log_level = args.log_level_override();
    let exit_code = match &args.command {
        Commands::Generate(generate_args) => handle_generate(generate_args, log_level),
        Commands::Detect(detect_args) => handle_detect(detect_args, log_level),
    };

    process::exit(exit_code);
}
