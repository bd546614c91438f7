//! # External Process Invocation
//!
//! The only place the bootstrapper starts other programs. Installers, post-install
//! commands and version queries all describe what they want to run as an
//! [`Invocation`] and hand it to a [`ProcessRunner`].
//!
//! A non-zero exit status is an ordinary [`ProcessOutput`] value. The runner only
//! sees an error when the program could not be started at all.

use crate::errors::BootstrapError;
use crate::log_debug;
use colored::Colorize;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Exit code recorded when a process was terminated by a signal.
pub const SIGNAL_EXIT_CODE: i32 = -1;

/// One program invocation with its options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Capture stdout/stderr instead of streaming them to the terminal.
    pub quiet: bool,
    pub working_dir: Option<PathBuf>,
    /// Variables added to (or overriding) the inherited environment.
    pub env: Vec<(String, String)>,
}

impl Invocation {
    pub fn new<S: AsRef<str>>(program: &str, args: &[S]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.as_ref().to_string()).collect(),
            quiet: false,
            working_dir: None,
            env: Vec::new(),
        }
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn in_dir(mut self, dir: PathBuf) -> Self {
        self.working_dir = Some(dir);
        self
    }

    /// Sets a variable, replacing an earlier value for the same key.
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.retain(|(existing, _)| existing != key);
        self.env.push((key.to_string(), value.to_string()));
        self
    }

    /// `program arg1 arg2`, used in logs and failure lines.
    pub fn command_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Exit status and captured output of a finished process. Output fields are empty
/// for invocations that were not `quiet`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Last non-blank lines of stderr, for failure diagnostics.
    pub fn stderr_tail(&self, lines: usize) -> String {
        let tail: Vec<&str> = self
            .stderr
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect();
        tail[tail.len().saturating_sub(lines)..].join("\n")
    }
}

/// Runs invocations. Implemented for the real host by [`SystemProcessRunner`] and by
/// recording fakes in tests.
pub trait ProcessRunner {
    fn invoke(&self, invocation: &Invocation) -> Result<ProcessOutput, BootstrapError>;
}

/// Runs invocations with `std::process::Command`, blocking until they finish.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn invoke(&self, invocation: &Invocation) -> Result<ProcessOutput, BootstrapError> {
        log_debug!(
            "[Process] Executing: {}",
            invocation.command_line().cyan()
        );

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        command.envs(invocation.env.iter().map(|(key, value)| (key, value)));
        if let Some(dir) = &invocation.working_dir {
            command.current_dir(dir);
        }

        let spawn_error = |source| BootstrapError::Spawn {
            program: invocation.program.clone(),
            source,
        };

        let output = if invocation.quiet {
            // Installers must never block on a prompt we cannot see.
            command.stdin(Stdio::null());
            let raw = command.output().map_err(spawn_error)?;
            ProcessOutput {
                exit_code: raw.status.code().unwrap_or(SIGNAL_EXIT_CODE),
                stdout: String::from_utf8_lossy(&raw.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&raw.stderr).into_owned(),
            }
        } else {
            let status = command.status().map_err(spawn_error)?;
            ProcessOutput {
                exit_code: status.code().unwrap_or(SIGNAL_EXIT_CODE),
                ..ProcessOutput::default()
            }
        };

        log_debug!(
            "[Process] '{}' exited with status {}",
            invocation.program.cyan(),
            output.exit_code
        );
        if !output.stdout.trim().is_empty() {
            log_debug!("[Process] Stdout: {}", output.stdout.trim_end());
        }
        if !output.stderr.trim().is_empty() {
            log_debug!("[Process] Stderr: {}", output.stderr.trim_end());
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_joins_args() {
        let invocation = Invocation::new("npm", &["install", "-g", "yarn"]);
        assert_eq!(invocation.command_line(), "npm install -g yarn");
        assert_eq!(Invocation::new::<&str>("brew", &[]).command_line(), "brew");
    }

    #[test]
    fn with_env_replaces_existing_key() {
        let invocation = Invocation::new::<&str>("bash", &[])
            .with_env("PATH", "/usr/bin")
            .with_env("PATH", "/opt/homebrew/bin:/usr/bin");
        assert_eq!(
            invocation.env,
            vec![("PATH".to_string(), "/opt/homebrew/bin:/usr/bin".to_string())]
        );
    }

    #[test]
    fn stderr_tail_keeps_last_lines() {
        let output = ProcessOutput {
            exit_code: 1,
            stdout: String::new(),
            stderr: "one\n\ntwo\nthree\n".to_string(),
        };
        assert_eq!(output.stderr_tail(2), "two\nthree");
        assert_eq!(output.stderr_tail(10), "one\ntwo\nthree");
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_a_value() {
        let output = SystemProcessRunner
            .invoke(&Invocation::new("sh", &["-c", "echo oops >&2; exit 3"]).quiet())
            .unwrap();
        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stderr.trim(), "oops");
    }

    #[cfg(unix)]
    #[test]
    fn captures_stdout_in_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        let output = SystemProcessRunner
            .invoke(
                &Invocation::new("sh", &["-c", "pwd; echo $WEB3BOX_TEST"])
                    .quiet()
                    .in_dir(dir.path().to_path_buf())
                    .with_env("WEB3BOX_TEST", "set"),
            )
            .unwrap();
        assert!(output.success());
        let canonical = dir.path().canonicalize().unwrap();
        let mut lines = output.stdout.lines();
        assert_eq!(
            std::path::Path::new(lines.next().unwrap()).canonicalize().unwrap(),
            canonical
        );
        assert_eq!(lines.next(), Some("set"));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let result = SystemProcessRunner
            .invoke(&Invocation::new::<&str>("definitely-not-a-real-program-9281", &[]).quiet());
        assert!(matches!(result, Err(BootstrapError::Spawn { .. })));
    }
}
