//! # Step Runner
//!
//! Walks the checklist strictly in order. For each step:
//!
//! 1. unmet requirement (`os:`, `arch:`, `package_manager`, `command:`) → `Skipped`
//! 2. detector finds the tool → `Skipped` with its version
//! 3. confirm prompt answered "no" → `Skipped`
//! 4. installer runs → `Installed`, or `Failed` followed by the failure policy
//!
//! A failed step aborts the run when the policy is strict or the step itself says
//! `on_failure: abort`. Otherwise the run continues, and a failed or declined
//! foundational step sets the package-manager flag on the [`RunContext`] so every
//! later step requiring `package_manager` is skipped without being attempted.

use crate::errors::BootstrapError;
use crate::installers::{self, InstallStatus};
use crate::libs::context::RunContext;
use crate::libs::detection::{self, ExecutableLocator};
use crate::libs::process::ProcessRunner;
use crate::libs::prompt::Prompter;
use crate::libs::shell_profile;
use crate::libs::utilities::path_helpers::expand_path;
use crate::schemas::outcomes::{
    Detection, ExecutionResult, FailureKind, Outcome, SkipReason, UNKNOWN_VERSION,
};
use crate::schemas::steps::{FailurePolicy, Requirement, StepSpec};
use crate::{log_debug, log_error, log_info, log_warn};
use colored::Colorize;

/// The machine-facing collaborators of a run.
#[derive(Clone, Copy)]
pub struct Host<'a> {
    pub runner: &'a dyn ProcessRunner,
    pub locator: &'a dyn ExecutableLocator,
    pub prompter: &'a dyn Prompter,
}

/// Results of one run, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub results: Vec<ExecutionResult>,
    /// Name of the step whose failure stopped the run.
    pub aborted_at: Option<String>,
}

impl RunReport {
    pub fn is_aborted(&self) -> bool {
        self.aborted_at.is_some()
    }

    pub fn installed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Installed))
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, Outcome::Failed { .. }))
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.results.iter().filter(|result| predicate(&result.outcome)).count()
    }
}

/// Runs every step in order until the end of the list or the first aborting failure.
///
/// Each step produces exactly one `ExecutionResult` and one status line. A failed
/// step stops the run when the policy is strict or the step says `on_failure:
/// abort`; otherwise a failed or declined foundational step sets the
/// package-manager flag on `ctx` and the run carries on.
///
/// # Arguments
/// * `steps`: The checklist, in the order it must run.
/// * `ctx`: Run state. Its search path and package-manager flag change as steps run.
/// * `host`: Process runner, executable locator and prompter to use.
///
/// # Returns
/// * `Ok(RunReport)` with one result per attempted step, and `aborted_at` set when
///   a failure stopped the run.
/// * `Err(BootstrapError)` only for fatal conditions: a program that cannot be
///   started, or a shell profile that cannot be written under the strict policy.
pub fn run(
    steps: &[StepSpec],
    ctx: &mut RunContext,
    host: &Host<'_>,
) -> Result<RunReport, BootstrapError> {
    log_info!(
        "[Runner] Running {} step(s) under the {} policy",
        steps.len(),
        ctx.policy.to_string().bold()
    );

    let mut report = RunReport::default();
    for step in steps {
        let result = run_step(step, ctx, host)?;
        let aborting =
            result.is_failed() && (ctx.is_strict() || step.on_failure == FailurePolicy::Abort);
        log_result(step, &result, aborting);

        let declined = matches!(
            result.outcome,
            Outcome::Skipped { reason: SkipReason::UserDeclined }
        );
        if aborting {
            report.aborted_at = Some(step.name.clone());
            report.results.push(result);
            break;
        }
        if step.foundational && (result.is_failed() || declined) {
            mark_package_manager_unavailable(ctx, &step.name);
        }
        report.results.push(result);
    }
    Ok(report)
}

/// Decides and performs one step.
pub fn run_step(
    step: &StepSpec,
    ctx: &mut RunContext,
    host: &Host<'_>,
) -> Result<ExecutionResult, BootstrapError> {
    log_debug!("[Runner] Step '{}'", step.name.bold());

    if let Some(reason) = unmet_requirement(step, ctx, host.locator) {
        return Ok(ExecutionResult::skipped(&step.name, reason, None));
    }

    let probe = step.probe();
    let detection = detection::detect(&probe, ctx, host.locator, host.runner);
    if detection.is_present() {
        return Ok(ExecutionResult::skipped(
            &step.name,
            SkipReason::AlreadyPresent,
            detection.version_text(),
        ));
    }

    if let Some(question) = &step.confirm {
        if ctx.assume_yes {
            log_debug!("[Runner] Assuming yes for '{}'", question);
        } else if !host.prompter.confirm(question) {
            return Ok(ExecutionResult::skipped(&step.name, SkipReason::UserDeclined, None));
        }
    }

    match installers::install(step, ctx, host.runner)? {
        InstallStatus::Failed { command, exit_code } => {
            let failure = if step.foundational {
                FailureKind::FoundationalDependencyMissing { command, exit_code }
            } else {
                FailureKind::InstallFailed { command, exit_code }
            };
            Ok(ExecutionResult::failed(&step.name, failure))
        }
        InstallStatus::Succeeded => {
            for entry in &step.path_entries {
                ctx.prepend_search_path(expand_path(entry));
            }
            if let Some(line) = &step.profile_line {
                append_profile_line(line, ctx)?;
            }

            let version = match detection::detect(&probe, ctx, host.locator, host.runner) {
                Detection::Absent if step.foundational => {
                    return Ok(ExecutionResult::failed(
                        &step.name,
                        FailureKind::FoundationalStillMissing {
                            binary: step.binary().to_string(),
                        },
                    ));
                }
                Detection::Absent => {
                    log_debug!(
                        "[Runner] '{}' still does not resolve after installing; version unknown",
                        step.binary()
                    );
                    Some(UNKNOWN_VERSION.to_string())
                }
                present => present.version_text(),
            };
            Ok(ExecutionResult::installed(&step.name, version))
        }
    }
}

/// The first requirement of `step` that does not hold, as a skip reason.
fn unmet_requirement(
    step: &StepSpec,
    ctx: &RunContext,
    locator: &dyn ExecutableLocator,
) -> Option<SkipReason> {
    step.requires.iter().find_map(|requirement| {
        let met = match requirement {
            Requirement::Os(os) => ctx.platform.os == *os,
            Requirement::Arch(arch) => ctx.platform.arch == *arch,
            Requirement::PackageManager => !ctx.package_manager_failed,
            Requirement::Command(command) => detection::is_resolvable(command, ctx, locator),
        };
        if met {
            return None;
        }
        Some(match requirement {
            Requirement::PackageManager => SkipReason::PackageManagerUnavailable,
            Requirement::Command(command) => SkipReason::MissingPrerequisite {
                command: command.clone(),
            },
            other => SkipReason::Unsupported {
                requirement: other.to_string(),
            },
        })
    })
}

fn mark_package_manager_unavailable(ctx: &mut RunContext, step: &str) {
    log_debug!(
        "[Runner] '{}' is unavailable; steps requiring the package manager will be skipped",
        step
    );
    ctx.package_manager_failed = true;
}

/// Appends `line` to the run's shell profile, once per run and only if absent.
fn append_profile_line(line: &str, ctx: &mut RunContext) -> Result<(), BootstrapError> {
    let Some(profile) = ctx.profile_path.clone() else {
        log_debug!("[Runner] No shell profile configured; not writing '{}'", line);
        return Ok(());
    };
    if !ctx.claim_profile_line(line) {
        return Ok(());
    }

    match shell_profile::ensure_line(&profile, line) {
        Ok(_) => Ok(()),
        Err(source) if ctx.is_strict() => Err(BootstrapError::Profile { path: profile, source }),
        Err(e) => {
            log_warn!(
                "[Profile] Could not update {}: {}. Add this line yourself: {}",
                profile.display(),
                e,
                line.cyan()
            );
            Ok(())
        }
    }
}

/// Detection only: one result per step, nothing installed, no prompts.
///
/// Present tools are `Skipped(AlreadyPresent)` with their version, missing ones are
/// `Skipped(ReportOnly)`, and platform requirements still apply. Requirements that
/// depend on earlier installs (`package_manager`, `command:`) are ignored.
pub fn survey(steps: &[StepSpec], ctx: &RunContext, host: &Host<'_>) -> Vec<ExecutionResult> {
    steps
        .iter()
        .map(|step| {
            let unsupported = step.requires.iter().find(|requirement| match requirement {
                Requirement::Os(os) => ctx.platform.os != *os,
                Requirement::Arch(arch) => ctx.platform.arch != *arch,
                _ => false,
            });
            if let Some(requirement) = unsupported {
                return ExecutionResult::skipped(
                    &step.name,
                    SkipReason::Unsupported {
                        requirement: requirement.to_string(),
                    },
                    None,
                );
            }

            let detection = detection::detect(&step.probe(), ctx, host.locator, host.runner);
            let reason = if detection.is_present() {
                SkipReason::AlreadyPresent
            } else {
                SkipReason::ReportOnly
            };
            ExecutionResult::skipped(&step.name, reason, detection.version_text())
        })
        .collect()
}

/// The single status line printed for each step.
fn log_result(step: &StepSpec, result: &ExecutionResult, aborting: bool) {
    let version = result.version.as_deref().unwrap_or(UNKNOWN_VERSION);
    match &result.outcome {
        Outcome::Skipped { reason: SkipReason::AlreadyPresent } => log_info!(
            "[Runner] {} is already installed ({})",
            step.name.green(),
            version
        ),
        Outcome::Skipped { reason } => {
            log_info!("[Runner] Skipping {}: {}", step.name.yellow(), reason)
        }
        Outcome::Installed => {
            log_info!("[Runner] Installed {} ({})", step.name.green().bold(), version)
        }
        Outcome::Failed { failure } if aborting => log_error!(
            "[Runner] Failed to install {}: {}. Stopping; remaining steps were not attempted",
            step.name.red().bold(),
            failure
        ),
        Outcome::Failed { failure } => {
            log_error!("[Runner] Failed to install {}: {}", step.name.red().bold(), failure)
        }
    }
}
