//! # Bootstrap Configuration (`config.yaml`)
//!
//! Everything in this file is optional; with no file at all the built-in checklist
//! runs under the lenient policy.
//!
//! ```yaml
//! policy: strict          # lenient (default) | strict
//! assume_yes: false       # answer "yes" to every confirm prompt
//! profile: ~/.zprofile    # shell profile that receives the brew shellenv line
//! skip:                   # drop steps from the built-in checklist
//!   - truffle
//!   - substrate
//! steps: [...]            # replace the built-in checklist entirely
//! ```

use crate::schemas::steps::StepSpec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the runner reacts to a failed step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunPolicy {
    /// Failures are printed and the run continues; a failed package manager only
    /// short-circuits the steps that depend on it. Exit status is 0.
    #[default]
    Lenient,
    /// The first failed step ends the run with a non-zero exit status.
    Strict,
}

impl fmt::Display for RunPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunPolicy::Lenient => write!(f, "lenient"),
            RunPolicy::Strict => write!(f, "strict"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BootstrapConfig {
    pub policy: RunPolicy,
    pub assume_yes: bool,
    pub profile: Option<String>,
    pub skip: Vec<String>,
    pub steps: Option<Vec<StepSpec>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config: BootstrapConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, BootstrapConfig::default());
        assert_eq!(config.policy, RunPolicy::Lenient);
    }

    #[test]
    fn reads_policy_and_skip_list() {
        let config: BootstrapConfig =
            serde_yaml::from_str("policy: strict\nskip: [truffle, ganache]\n").unwrap();
        assert_eq!(config.policy, RunPolicy::Strict);
        assert_eq!(config.skip, vec!["truffle", "ganache"]);
        assert!(config.steps.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_yaml::from_str::<BootstrapConfig>("polcy: strict\n").is_err());
    }
}
