// `setup-web3box version`: prints the version this binary was built from.

use crate::log_info;
use colored::Colorize;
use std::process::ExitCode;

pub fn run() -> anyhow::Result<ExitCode> {
    log_info!("Checking local tool version...");
    println!("{} {}", env!("CARGO_PKG_NAME").bold(), env!("CARGO_PKG_VERSION"));
    Ok(ExitCode::SUCCESS)
}
