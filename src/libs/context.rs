//! Run context: the state one bootstrap run carries from step to step.
//!
//! Steps never read ambient process state for decisions that can change during a
//! run. The package-manager flag and the search path both live here and are
//! passed to each step explicitly.

use crate::libs::utilities::platform::Platform;
use crate::log_debug;
use crate::schemas::config::RunPolicy;
use colored::Colorize;
use std::collections::HashSet;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RunContext {
    pub platform: Platform,
    pub policy: RunPolicy,
    /// Answer "yes" to confirm prompts without asking.
    pub assume_yes: bool,
    /// Set once the foundational package-manager step failed or was declined.
    pub package_manager_failed: bool,
    /// Shell profile that receives `profile_line`s. `None` disables profile writes.
    pub profile_path: Option<PathBuf>,
    search_path: Vec<PathBuf>,
    profile_lines_written: HashSet<String>,
}

impl RunContext {
    /// A context whose search path starts as the given directories.
    pub fn new(platform: Platform, policy: RunPolicy, search_path: Vec<PathBuf>) -> Self {
        Self {
            platform,
            policy,
            assume_yes: false,
            package_manager_failed: false,
            profile_path: None,
            search_path,
            profile_lines_written: HashSet::new(),
        }
    }

    /// A context seeded from the current process: detected platform and `$PATH`.
    pub fn from_env(policy: RunPolicy) -> Self {
        let search_path = env::var_os("PATH")
            .map(|path| env::split_paths(&path).collect())
            .unwrap_or_default();
        Self::new(Platform::current(), policy, search_path)
    }

    /// Puts a directory in front of the search path, once.
    pub fn prepend_search_path(&mut self, dir: PathBuf) {
        if self.search_path.first() == Some(&dir) {
            return;
        }
        log_debug!(
            "[Context] Prepending {} to the search path",
            dir.display().to_string().cyan()
        );
        self.search_path.retain(|existing| existing != &dir);
        self.search_path.insert(0, dir);
    }

    /// The search path in `PATH` form, for `which` lookups and child environments.
    pub fn search_path_os(&self) -> OsString {
        env::join_paths(&self.search_path).unwrap_or_else(|e| {
            log_debug!("[Context] Search path contains an invalid entry ({}); using it lossily", e);
            OsString::from(
                self.search_path
                    .iter()
                    .map(|dir| dir.to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join(":"),
            )
        })
    }

    /// `PATH` value handed to every child process.
    pub fn child_path(&self) -> String {
        self.search_path_os().to_string_lossy().into_owned()
    }

    /// Records that `line` is being written this run. Returns `false` if it already was.
    pub fn claim_profile_line(&mut self, line: &str) -> bool {
        self.profile_lines_written.insert(line.to_string())
    }

    pub fn is_strict(&self) -> bool {
        self.policy == RunPolicy::Strict
    }
}
