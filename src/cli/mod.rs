// CLI module
// Command-line interface, argument parsing and command execution

mod args;
mod commands;
pub mod prompt;

pub use args::{CliArgs, Command, SortOrder};
pub use commands::run;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing required arguments, or
/// `--help`), clap prints an error or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
