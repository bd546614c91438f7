// `setup-web3box status`: detection only. Every tool on the checklist is probed
// and reported; nothing is installed and nobody is prompted.

use crate::cli::type_enums::OutputFormat;
use crate::commands::load_checklist;
use crate::libs::context::RunContext;
use crate::libs::detection::SearchPathLocator;
use crate::libs::process::SystemProcessRunner;
use crate::libs::prompt::TerminalPrompter;
use crate::libs::reporter::print_summary;
use crate::libs::runner::{Host, survey};
use crate::libs::utilities::platform::Platform;
use crate::log_debug;
use anyhow::Context;
use colored::Colorize;
use std::process::ExitCode;

pub fn run(config_path: Option<String>, format: OutputFormat) -> anyhow::Result<ExitCode> {
    log_debug!("Entered status::run() function (format: {}).", format);

    let platform = Platform::current();
    let (config, steps) = load_checklist(config_path.as_deref(), &platform)?;
    let ctx = RunContext::from_env(config.policy);

    let host = Host {
        runner: &SystemProcessRunner,
        locator: &SearchPathLocator,
        prompter: &TerminalPrompter,
    };
    let results = survey(&steps, &ctx, &host);

    match format {
        OutputFormat::Table => print_summary(&results),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&results)
                .context("failed to serialize status as JSON")?;
            println!("{json}");
        }
    }
    Ok(ExitCode::SUCCESS)
}
