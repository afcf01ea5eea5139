// CLI module
// Flags controlling seeding and journal export

mod args;

pub use args::CliArgs;

use clap::Parser;

/// Read the process arguments into a `CliArgs`
///
/// On a bad invocation (unknown flag, missing value) or `--help`, clap
/// prints its message and exits the process before this returns.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
