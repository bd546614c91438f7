//! # Presence and Version Detection
//!
//! A tool counts as present when its executable resolves on the run's search path
//! (or, for file probes, when the probed file exists). Version queries are a best
//! effort on top of that: if `<binary> --version` cannot be run or exits non-zero
//! the tool is still present, with an unknown version.

use crate::libs::context::RunContext;
use crate::libs::process::{Invocation, ProcessRunner};
use crate::libs::utilities::version_text::extract_version;
use crate::log_debug;
use crate::schemas::outcomes::Detection;
use crate::schemas::steps::Probe;
use colored::Colorize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Resolves executables and probes files. Split out from detection so tests can
/// describe a machine without touching the real filesystem.
pub trait ExecutableLocator {
    /// Full path of `binary` when it resolves on `search_path`.
    fn locate(&self, binary: &str, search_path: &OsStr) -> Option<PathBuf>;

    fn file_exists(&self, path: &Path) -> bool;
}

/// Resolves executables with the `which` crate against an explicit search path.
#[derive(Debug, Default, Clone, Copy)]
pub struct SearchPathLocator;

impl ExecutableLocator for SearchPathLocator {
    fn locate(&self, binary: &str, search_path: &OsStr) -> Option<PathBuf> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        which::which_in(binary, Some(search_path), cwd).ok()
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Whether `binary` resolves on the context's search path.
pub fn is_resolvable(binary: &str, ctx: &RunContext, locator: &dyn ExecutableLocator) -> bool {
    locator.locate(binary, &ctx.search_path_os()).is_some()
}

/// Runs the probe for one tool.
///
/// A file probe only checks that the path exists. An executable probe resolves the
/// binary on the run's augmented search path, then runs it with `version_args` to
/// read a version. A tool that resolves but will not report a version still counts
/// as present.
///
/// # Arguments
/// * `probe`: What to look for, usually built by `StepSpec::probe`.
/// * `ctx`: The run context; its search path includes directories added this run.
/// * `locator`: Resolves binaries and checks files.
/// * `runner`: Runs the version query.
///
/// # Returns
/// * `Detection::Absent` when the file or binary is not found.
/// * `Detection::Present(Some(version))` when a version could be parsed.
/// * `Detection::Present(None)` for file probes, probes without `version_args`, and
///   version queries that failed or printed nothing usable.
pub fn detect(
    probe: &Probe,
    ctx: &RunContext,
    locator: &dyn ExecutableLocator,
    runner: &dyn ProcessRunner,
) -> Detection {
    match probe {
        Probe::File(path) => {
            if locator.file_exists(path) {
                log_debug!("[Detect] Found {}", path.display().to_string().green());
                Detection::Present(None)
            } else {
                log_debug!("[Detect] {} does not exist", path.display().to_string().yellow());
                Detection::Absent
            }
        }
        Probe::Executable { binary, version_args } => {
            let Some(path) = locator.locate(binary, &ctx.search_path_os()) else {
                log_debug!("[Detect] '{}' does not resolve on the search path", binary.yellow());
                return Detection::Absent;
            };
            log_debug!(
                "[Detect] '{}' resolves to {}",
                binary.green(),
                path.display().to_string().cyan()
            );

            if version_args.is_empty() {
                return Detection::Present(None);
            }
            Detection::Present(query_version(&path, version_args, ctx, runner))
        }
    }
}

/// Asks a resolved executable for its version. Any failure yields `None`.
fn query_version(
    path: &Path,
    version_args: &[String],
    ctx: &RunContext,
    runner: &dyn ProcessRunner,
) -> Option<String> {
    let invocation = Invocation::new(&path.to_string_lossy(), version_args)
        .quiet()
        .with_env("PATH", &ctx.child_path());

    match runner.invoke(&invocation) {
        Ok(output) if output.success() => {
            // Some tools print their version on stderr.
            let text = if output.stdout.trim().is_empty() {
                &output.stderr
            } else {
                &output.stdout
            };
            extract_version(text)
        }
        Ok(output) => {
            log_debug!(
                "[Detect] '{}' exited with status {}; version unknown",
                invocation.command_line(),
                output.exit_code
            );
            None
        }
        Err(e) => {
            log_debug!("[Detect] Version query failed: {}; version unknown", e);
            None
        }
    }
}
