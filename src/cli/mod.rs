mod commands;
pub mod exit_codes;
mod output;

pub use commands::Cli;

use anyhow::Result;

use crate::error::Error;

pub fn run(cli: Cli) -> Result<()> {
    commands::execute(cli)
}

/// exit code for an error surfaced by a command
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<Error>()
        .map(Error::exit_code)
        .unwrap_or(exit_codes::ERROR)
}
