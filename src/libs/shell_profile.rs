// Shell profile handling.
// The package manager's environment (`brew shellenv`) has to reach future login
// shells, so its step leaves one line in the user's profile. Lines are appended,
// never rewritten, and only when an identical line is not already there.

use crate::{log_debug, log_info};
use colored::Colorize;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Marker written above every line this tool appends.
pub const PROFILE_MARKER: &str = "# Added by setup-web3box";

/// Picks the login profile for a shell path such as `/bin/zsh`: `.zprofile` for
/// zsh, `.bash_profile` for bash, `.profile` for anything else.
pub fn profile_for_shell(shell: Option<&str>, home: &Path) -> PathBuf {
    let shell_name = shell
        .and_then(|path| Path::new(path).file_name())
        .and_then(|name| name.to_str())
        .unwrap_or("");

    let file_name = match shell_name {
        "zsh" => ".zprofile",
        "bash" => ".bash_profile",
        _ => ".profile",
    };
    log_debug!(
        "[Profile] Shell '{}' maps to {}",
        shell_name.bold(),
        file_name.cyan()
    );
    home.join(file_name)
}

/// The profile for the current user's `$SHELL`, or `None` without a home directory.
pub fn default_profile_path() -> Option<PathBuf> {
    let home = dirs::home_dir()?;
    let shell = std::env::var("SHELL").ok();
    Some(profile_for_shell(shell.as_deref(), &home))
}

/// Whether any line of the profile equals `line` (ignoring surrounding whitespace).
pub fn contains_line(profile: &Path, line: &str) -> io::Result<bool> {
    match fs::read_to_string(profile) {
        Ok(contents) => Ok(contents.lines().any(|existing| existing.trim() == line.trim())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Appends `line` under the marker unless it is already present.
///
/// The comparison ignores surrounding whitespace, so a line the user added by hand
/// is recognised. The file is opened in append mode and created when missing;
/// existing content is never rewritten.
///
/// # Arguments
/// * `profile`: The shell profile, e.g. `~/.zprofile`.
/// * `line`: The exact line to add, such as the Homebrew `shellenv` eval.
///
/// # Returns
/// * `Ok(true)` when the marker and line were appended.
/// * `Ok(false)` when the profile already contained the line.
/// * `Err(io::Error)` when the profile could not be read or written.
pub fn ensure_line(profile: &Path, line: &str) -> io::Result<bool> {
    if contains_line(profile, line)? {
        log_debug!(
            "[Profile] {} already contains the line; nothing to do",
            profile.display().to_string().cyan()
        );
        return Ok(false);
    }

    let mut file = OpenOptions::new().create(true).append(true).open(profile)?;
    writeln!(file, "\n{PROFILE_MARKER}")?;
    writeln!(file, "{line}")?;

    log_info!(
        "[Profile] Appended '{}' to {}",
        line.green(),
        profile.display().to_string().cyan()
    );
    Ok(true)
}
