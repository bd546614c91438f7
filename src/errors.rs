//! Error types.
//!
//! Only conditions that stop the runner are modeled as Rust errors. An installer
//! exiting non-zero, a declined prompt or a version query that fails are normal
//! step outcomes and live in [`crate::schemas::outcomes`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal conditions raised while running the checklist.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The program itself could not be started (missing shell, permission denied).
    /// A non-zero exit status is never reported through this variant.
    #[error("could not execute '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Appending the package manager's environment to the shell profile failed.
    #[error("could not update shell profile {}: {source}", path.display())]
    Profile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Problems with the optional `config.yaml` or with a step registry built from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unknown step '{0}' in skip list")]
    UnknownStep(String),

    #[error("step '{0}' is registered more than once")]
    DuplicateStep(String),

    #[error("step '{step}' has an empty {field}")]
    EmptyField { step: String, field: &'static str },

    #[error("invalid requirement '{0}' (expected package_manager, os:<name>, arch:<name> or command:<name>)")]
    InvalidRequirement(String),
}
