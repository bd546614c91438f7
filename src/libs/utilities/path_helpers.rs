// Path helpers: `~`/`$VAR` expansion for anything a user can configure, and the
// location of the bootstrapper's own directory.

use crate::{log_debug, log_warn};
use colored::Colorize;
use std::path::PathBuf;

/// Expands a leading `~` and any `$VAR`/`${VAR}` references.
///
/// Unset variables are left for the tilde-only expansion pass rather than failing,
/// so `"$UNSET/bin"` comes back unchanged instead of aborting a run.
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(expand_str(path))
}

/// String form of [`expand_path`], used for command programs and arguments.
pub fn expand_str(value: &str) -> String {
    match shellexpand::full(value) {
        Ok(expanded) => expanded.into_owned(),
        Err(e) => {
            log_debug!(
                "[Paths] Could not expand variables in '{}': {}. Expanding '~' only.",
                value.dimmed(),
                e
            );
            shellexpand::tilde(value).into_owned()
        }
    }
}

/// `~/.setup-web3box`, home of the default `config.yaml`. Falls back to the current
/// directory when no home directory can be determined.
pub fn get_web3box_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".setup-web3box"),
        None => {
            log_warn!(
                "[Paths] Could not determine home directory. Using {} in the current directory.",
                ".setup-web3box".yellow()
            );
            PathBuf::from(".setup-web3box")
        }
    }
}
