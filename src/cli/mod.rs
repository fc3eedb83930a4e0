pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DetectArgs, GenerateArgs, ScanArgs};
pub use output::{OutputFormat, OutputFormatter};
