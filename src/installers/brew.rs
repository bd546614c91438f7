//! # Homebrew Installer
//!
//! Installs formulae and casks with `brew`. Formulae that live in a third-party tap
//! (Geth and solc come from `ethereum/ethereum`) get a `brew tap` first; tapping an
//! already tapped repository is a no-op for Homebrew, so re-runs stay harmless.
//!
//! ```yaml
//! - name: solidity
//!   binary: solc
//!   installer:
//!     source: brew
//!     formula: solidity
//!     tap: ethereum/ethereum
//! ```

use crate::libs::process::Invocation;
use crate::log_debug;
use colored::Colorize;

/// Commands for `brew [tap <tap>] install [--cask] <formula>`.
pub(crate) fn plan(formula: &str, cask: bool, tap: Option<&str>) -> Vec<Invocation> {
    let mut invocations = Vec::new();

    if let Some(tap) = tap.filter(|tap| !tap.trim().is_empty()) {
        log_debug!("[Brew Installer] Formula '{}' needs tap {}", formula, tap.cyan());
        invocations.push(Invocation::new("brew", &["tap", tap]));
    }

    let mut args = vec!["install"];
    if cask {
        args.push("--cask");
    }
    args.push(formula);
    invocations.push(Invocation::new("brew", args.as_slice()));

    invocations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(invocations: Vec<Invocation>) -> Vec<String> {
        invocations.iter().map(Invocation::command_line).collect()
    }

    #[test]
    fn plain_formula() {
        assert_eq!(lines(plan("ipfs", false, None)), vec!["brew install ipfs"]);
    }

    #[test]
    fn tapped_formula_taps_first() {
        assert_eq!(
            lines(plan("ethereum", false, Some("ethereum/ethereum"))),
            vec!["brew tap ethereum/ethereum", "brew install ethereum"]
        );
    }

    #[test]
    fn cask_flag() {
        assert_eq!(lines(plan("docker", true, Some(" "))), vec!["brew install --cask docker"]);
    }
}
