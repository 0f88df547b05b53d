// File: services/slotbook_cli/src/main.rs
mod cli;
mod terminal;

use std::process::ExitCode;

use clap::Parser;
use slotbook_common::{init_with_level, log_result, parse_level};
use slotbook_config::load_config;

use crate::cli::{run, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_with_level(parse_level(config.logging.level.as_deref()));

    match log_result(run(cli, config).await, "Command finished", "Command failed") {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
