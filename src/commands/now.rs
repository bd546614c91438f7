// This file contains the primary logic for the `setup-web3box now` command, which
// is also what a bare `setup-web3box` runs: load the configuration, build the
// checklist, run it against the real machine and print the summary.

use crate::commands::load_checklist;
use crate::libs::context::RunContext;
use crate::libs::detection::SearchPathLocator;
use crate::libs::process::SystemProcessRunner;
use crate::libs::prompt::TerminalPrompter;
use crate::libs::reporter::print_summary;
use crate::libs::runner::{self, Host, RunReport};
use crate::libs::shell_profile::default_profile_path;
use crate::libs::utilities::path_helpers::expand_path;
use crate::libs::utilities::platform::Platform;
use crate::schemas::config::RunPolicy;
use crate::{log_debug, log_info, log_warn};
use anyhow::Context;
use colored::Colorize;
use std::process::ExitCode;

/// Command-line overrides for the bootstrap run.
#[derive(Debug, Clone, Copy, Default)]
pub struct NowOptions {
    pub strict: bool,
    pub lenient: bool,
    pub yes: bool,
}

/// `--strict`/`--lenient` win over the configured policy.
fn effective_policy(configured: RunPolicy, options: NowOptions) -> RunPolicy {
    if options.strict {
        RunPolicy::Strict
    } else if options.lenient {
        RunPolicy::Lenient
    } else {
        configured
    }
}

/// Main entry point for the `now` command.
///
/// Exits with success under the lenient policy even when steps failed; under the
/// strict policy the first failure stops the run and the exit status is 1. The
/// summary of the steps that ran is printed either way.
pub fn run(config_path: Option<String>, options: NowOptions) -> anyhow::Result<ExitCode> {
    log_debug!("Entered now::run() function.");

    let platform = Platform::current();
    let (config, steps) = load_checklist(config_path.as_deref(), &platform)?;

    let mut ctx = RunContext::from_env(effective_policy(config.policy, options));
    ctx.assume_yes = options.yes || config.assume_yes;
    ctx.profile_path = config
        .profile
        .as_deref()
        .map(expand_path)
        .or_else(default_profile_path);
    if let Some(profile) = &ctx.profile_path {
        log_debug!("[Now] Shell profile: {}", profile.display().to_string().cyan());
    }

    let host = Host {
        runner: &SystemProcessRunner,
        locator: &SearchPathLocator,
        prompter: &TerminalPrompter,
    };
    let report = runner::run(&steps, &mut ctx, &host).context("bootstrap stopped")?;

    print_summary(&report.results);

    if !report.is_aborted() {
        if report.failed() > 0 {
            log_warn!(
                "{} step(s) failed; re-run {} after fixing them",
                report.failed(),
                "setup-web3box".bold()
            );
        } else {
            log_info!(
                "{} Installed {}, skipped {}",
                "Done.".bright_green(),
                report.installed(),
                report.skipped()
            );
        }
    }
    Ok(ExitCode::from(exit_status(&report)))
}

/// 1 when a failure stopped the run, 0 otherwise (lenient runs with failed steps
/// included).
pub(crate) fn exit_status(report: &RunReport) -> u8 {
    u8::from(report.is_aborted())
}
