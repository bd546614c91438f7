mod cli;
mod commands;
mod errors;
mod installers;
mod libs;
mod logger;
mod schemas;

use clap::Parser;
use colored::Colorize;
use cli::cmd_enums::{Cli, Commands};
use commands::{list, now, status, version};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(cli.debug);
    log_debug!("[Main] Parsed arguments: {:?}", cli);

    let result = match cli.command.unwrap_or_else(Commands::bootstrap) {
        Commands::Now { strict, lenient, yes } => {
            now::run(cli.config, now::NowOptions { strict, lenient, yes })
        }
        Commands::Status { format } => status::run(cli.config, format),
        Commands::List => list::run(cli.config),
        Commands::Version => version::run(),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            log_error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
