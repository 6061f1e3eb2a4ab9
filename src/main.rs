use std::process::ExitCode;

use autoi18n::cli::{Arguments, ExitStatus};
use clap::Parser;
use tracing::Level;

fn main() -> ExitCode {
    let args = Arguments::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose() { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .without_time()
        .init();

    match autoi18n::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
