mod inspect;
mod presets;
mod trace;
mod utils;

use crate::cli::{Cli, Commands};
use pixtrace::PixtraceResult;

/// The main function to run the command based on CLI input.
pub fn run(cli: Cli) -> PixtraceResult<()> {
    dispatch(cli.command)
}

/// Dispatch the command to the appropriate handler.
fn dispatch(command: Commands) -> PixtraceResult<()> {
    match command {
        Commands::Trace(cmd) => trace::run(cmd),
        Commands::Inspect(cmd) => inspect::run(cmd),
        Commands::Presets(cmd) => presets::run(cmd),
    }
}
