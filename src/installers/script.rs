//! # Script Installer
//!
//! Vendor install scripts (Homebrew, Foundry, Substrate, Solana) are fetched with
//! `curl` and piped into a shell. The scripts are opaque: we only care whether the
//! pipeline exits zero.
//!
//! The pipeline runs as `<shell> -c "curl -fsSL <url> | <shell> [-s -- <args>]"`, so
//! the only program started directly is the shell. A missing `curl` surfaces as a
//! non-zero exit, a missing shell as a spawn error. Scripts run from the home
//! directory, since some of them unpack into the current directory.

use crate::libs::process::Invocation;
use crate::log_debug;
use colored::Colorize;
use std::collections::BTreeMap;

/// Quotes a value for inclusion in a `sh -c` string when it contains anything
/// beyond a conservative set of safe characters.
fn shell_quote(value: &str) -> String {
    let safe = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

/// The shell pipeline that downloads and runs the script.
pub(crate) fn pipeline(url: &str, shell: &str, args: &[String]) -> String {
    let mut pipeline = format!("curl -fsSL {} | {}", shell_quote(url), shell);
    if !args.is_empty() {
        let quoted: Vec<String> = args.iter().map(|arg| shell_quote(arg)).collect();
        pipeline.push_str(" -s -- ");
        pipeline.push_str(&quoted.join(" "));
    }
    pipeline
}

pub(crate) fn plan(
    url: &str,
    shell: &str,
    args: &[String],
    env: &BTreeMap<String, String>,
) -> Vec<Invocation> {
    let pipeline = pipeline(url, shell, args);
    log_debug!("[Script Installer] Pipeline: {}", pipeline.cyan());

    let mut invocation = env
        .iter()
        .fold(Invocation::new(shell, &["-c", pipeline.as_str()]), |invocation, (key, value)| {
            invocation.with_env(key, value)
        });
    if let Some(home) = dirs::home_dir() {
        invocation = invocation.in_dir(home);
    }
    vec![invocation]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_pipeline() {
        assert_eq!(
            pipeline("https://foundry.paradigm.xyz", "bash", &[]),
            "curl -fsSL https://foundry.paradigm.xyz | bash"
        );
    }

    #[test]
    fn script_arguments_follow_double_dash() {
        assert_eq!(
            pipeline("https://getsubstrate.io", "bash", &["--fast".to_string()]),
            "curl -fsSL https://getsubstrate.io | bash -s -- --fast"
        );
    }

    #[test]
    fn unsafe_values_are_quoted() {
        assert_eq!(shell_quote("a b"), "'a b'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn environment_is_attached() {
        let mut env = BTreeMap::new();
        env.insert("NONINTERACTIVE".to_string(), "1".to_string());
        let invocations = plan(
            "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh",
            "bash",
            &[],
            &env,
        );
        assert_eq!(invocations.len(), 1);
        assert_eq!(invocations[0].program, "bash");
        assert_eq!(invocations[0].args[0], "-c");
        assert_eq!(invocations[0].env, vec![("NONINTERACTIVE".to_string(), "1".to_string())]);
    }

    #[test]
    fn scripts_run_from_home() {
        let invocations = plan("https://foundry.paradigm.xyz", "bash", &[], &BTreeMap::new());
        assert_eq!(invocations[0].working_dir, dirs::home_dir());
    }
}
