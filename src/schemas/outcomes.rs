//! Per-step results produced by the runner and consumed by the summary reporter.

use serde::Serialize;
use std::fmt;

/// Version text shown when a tool resolves but its version query failed.
pub const UNKNOWN_VERSION: &str = "unknown";

/// What the detector found for one tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    Absent,
    /// Present on the machine; `None` when the version could not be determined.
    Present(Option<String>),
}

impl Detection {
    pub fn is_present(&self) -> bool {
        matches!(self, Detection::Present(_))
    }

    /// The version text recorded in an [`ExecutionResult`].
    pub fn version_text(&self) -> Option<String> {
        match self {
            Detection::Absent => None,
            Detection::Present(Some(version)) => Some(version.clone()),
            Detection::Present(None) => Some(UNKNOWN_VERSION.to_string()),
        }
    }
}

/// Why a step did not run its installer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The detector found the tool.
    AlreadyPresent,
    /// An `os:`/`arch:` requirement does not match this machine.
    Unsupported { requirement: String },
    /// The package manager step failed or was declined earlier in the run.
    PackageManagerUnavailable,
    /// A prerequisite executable (`command:` requirement) does not resolve.
    MissingPrerequisite { command: String },
    /// The confirm prompt was answered "no" (or left empty).
    UserDeclined,
    /// `status` only surveys the machine and never installs.
    ReportOnly,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyPresent => write!(f, "already installed"),
            SkipReason::Unsupported { requirement } => write!(f, "requires {requirement}"),
            SkipReason::PackageManagerUnavailable => write!(f, "package manager unavailable"),
            SkipReason::MissingPrerequisite { command } => write!(f, "'{command}' not found"),
            SkipReason::UserDeclined => write!(f, "declined"),
            SkipReason::ReportOnly => write!(f, "not checked for install"),
        }
    }
}

/// Why a step's installer did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// An installer command exited non-zero.
    InstallFailed { command: String, exit_code: i32 },
    /// The foundational package manager is absent and installing it failed.
    FoundationalDependencyMissing { command: String, exit_code: i32 },
    /// The package manager's installer exited zero but its executable still does
    /// not resolve on the search path.
    FoundationalStillMissing { binary: String },
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InstallFailed { command, exit_code } => {
                write!(f, "'{command}' exited with status {exit_code}")
            }
            FailureKind::FoundationalDependencyMissing { command, exit_code } => write!(
                f,
                "package manager missing, '{command}' exited with status {exit_code}"
            ),
            FailureKind::FoundationalStillMissing { binary } => write!(
                f,
                "package manager missing, '{binary}' does not resolve after installing"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Skipped { reason: SkipReason },
    Installed,
    Failed { failure: FailureKind },
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Skipped { .. } => "skipped",
            Outcome::Installed => "installed",
            Outcome::Failed { .. } => "failed",
        }
    }
}

/// Result of one step in one run. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutionResult {
    pub step: String,
    #[serde(flatten)]
    pub outcome: Outcome,
    pub version: Option<String>,
}

impl ExecutionResult {
    pub fn skipped(step: &str, reason: SkipReason, version: Option<String>) -> Self {
        Self {
            step: step.to_string(),
            outcome: Outcome::Skipped { reason },
            version,
        }
    }

    pub fn installed(step: &str, version: Option<String>) -> Self {
        Self {
            step: step.to_string(),
            outcome: Outcome::Installed,
            version,
        }
    }

    pub fn failed(step: &str, failure: FailureKind) -> Self {
        Self {
            step: step.to_string(),
            outcome: Outcome::Failed { failure },
            version: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, Outcome::Failed { .. })
    }
}
