//! Dispatch to the command handler for the parsed arguments.

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{init::init, run::run as run_pipeline, scan::scan},
    exit_status::ExitStatus,
};

pub fn run(Arguments { command }: Arguments) -> Result<ExitStatus> {
    match command {
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::Run(cmd)) => run_pipeline(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
