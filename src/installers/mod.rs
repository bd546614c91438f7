// Installers turn a step's `installer` spec into the commands that install it.
//
// Each submodule knows one installation source and only builds `Invocation`s.
// Running them and appending the step's post-install commands happens here.

use crate::errors::BootstrapError;
use crate::libs::context::RunContext;
use crate::libs::process::{Invocation, ProcessRunner};
use crate::schemas::steps::{CommandSpec, InstallerSpec, StepSpec};
use crate::{log_debug, log_info};
use colored::Colorize;

/// Homebrew formulae and casks.
pub(crate) mod brew;
/// Direct program invocations (`softwareupdate`, `foundryup`, ...).
pub(crate) mod command;
/// Global npm packages.
pub(crate) mod npm;
/// Vendor `curl | sh` install scripts.
pub(crate) mod script;

/// How an install attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallStatus {
    Succeeded,
    /// A command exited non-zero; later commands were not run.
    Failed { command: String, exit_code: i32 },
}

/// The commands that install `step`, in order: the installer's own commands
/// followed by the step's post-install commands.
pub fn plan(step: &StepSpec) -> Vec<Invocation> {
    let mut invocations = match &step.installer {
        InstallerSpec::Brew { formula, cask, tap } => brew::plan(formula, *cask, tap.as_deref()),
        InstallerSpec::Npm { package } => npm::plan(package),
        InstallerSpec::Script { url, shell, args, env } => script::plan(url, shell, args, env),
        InstallerSpec::Command { program, args } => vec![command::plan(&CommandSpec {
            program: program.clone(),
            args: args.clone(),
        })],
    };
    invocations.extend(step.post_install.iter().map(command::plan));
    invocations
}

/// Runs the install plan for `step` quietly, with the run's search path as `PATH`.
///
/// The installer's own commands run first, then the step's `post_install` commands,
/// one after the other. The first command exiting non-zero ends the plan and its
/// last stderr lines are shown in debug output; later commands are never started.
///
/// # Arguments
/// * `step`: The step whose `installer` and `post_install` commands are run.
/// * `ctx`: The run context; its augmented search path becomes the child `PATH`.
/// * `runner`: Starts the commands (the real host, or a fake in tests).
///
/// # Returns
/// * `Ok(InstallStatus::Succeeded)` when every command exited zero.
/// * `Ok(InstallStatus::Failed { .. })` naming the command that exited non-zero.
/// * `Err(BootstrapError::Spawn)` when a command could not be started at all.
pub fn install(
    step: &StepSpec,
    ctx: &RunContext,
    runner: &dyn ProcessRunner,
) -> Result<InstallStatus, BootstrapError> {
    log_info!(
        "[Installer] Installing {} via {}: {}",
        step.name.bold(),
        step.installer.source_name().bright_yellow(),
        step.installer.target().cyan()
    );

    let path = ctx.child_path();
    for invocation in plan(step) {
        let invocation = invocation.quiet().with_env("PATH", &path);
        log_debug!("[Installer] Running: {}", invocation.command_line().cyan());

        let output = runner.invoke(&invocation)?;
        if !output.success() {
            let stderr_tail = output.stderr_tail(5);
            if !stderr_tail.is_empty() {
                log_debug!("[Installer] {} stderr:\n{}", step.name, stderr_tail.dimmed());
            }
            return Ok(InstallStatus::Failed {
                command: invocation.command_line(),
                exit_code: output.exit_code,
            });
        }
    }
    Ok(InstallStatus::Succeeded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::testing::FakeSystem;

    fn foundry() -> StepSpec {
        let mut step = StepSpec::new(
            "foundry",
            InstallerSpec::Script {
                url: "https://foundry.paradigm.xyz".into(),
                shell: "bash".into(),
                args: vec![],
                env: Default::default(),
            },
        );
        step.binary = Some("forge".into());
        step.post_install = vec![CommandSpec::new("/home/dev/.foundry/bin/foundryup", &[])];
        step
    }

    #[test]
    fn post_install_runs_after_installer() {
        let lines: Vec<String> = plan(&foundry()).iter().map(Invocation::command_line).collect();
        assert_eq!(
            lines,
            vec![
                "bash -c curl -fsSL https://foundry.paradigm.xyz | bash".to_string(),
                "/home/dev/.foundry/bin/foundryup".to_string(),
            ]
        );
    }

    #[test]
    fn install_stops_at_first_failing_command() {
        let system = FakeSystem::new().on_command("foundry.paradigm.xyz", 22);
        let ctx = FakeSystem::context();

        let status = install(&foundry(), &ctx, &system).unwrap();

        assert_eq!(
            status,
            InstallStatus::Failed {
                command: "bash -c curl -fsSL https://foundry.paradigm.xyz | bash".into(),
                exit_code: 22,
            }
        );
        assert_eq!(system.commands().len(), 1);
    }

    #[test]
    fn install_runs_quietly_with_run_search_path() {
        let system = FakeSystem::new();
        let mut ctx = FakeSystem::context();
        ctx.prepend_search_path("/opt/homebrew/bin".into());

        let status = install(&foundry(), &ctx, &system).unwrap();

        assert_eq!(status, InstallStatus::Succeeded);
        let invocations = system.all_invocations();
        assert_eq!(invocations.len(), 2);
        for invocation in invocations {
            assert!(invocation.quiet);
            assert!(invocation
                .env
                .contains(&("PATH".to_string(), ctx.child_path())));
        }
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let system = FakeSystem::new().unspawnable("bash");
        let ctx = FakeSystem::context();
        assert!(matches!(
            install(&foundry(), &ctx, &system),
            Err(BootstrapError::Spawn { .. })
        ));
    }
}
