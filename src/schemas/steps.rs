//! # Step Schema
//!
//! A step is one entry of the bootstrap checklist: a tool, how to tell whether it is
//! already on the machine, how to install it when it is not, and what to do when the
//! install fails. The built-in checklist lives in [`crate::libs::registry`]; users can
//! replace it with their own list in `config.yaml`.
//!
//! ```yaml
//! steps:
//!   - name: hardhat
//!     installer:
//!       source: npm
//!       package: hardhat
//!     requires: [package_manager, "command:npm"]
//!   - name: docker
//!     installer:
//!       source: brew
//!       formula: docker
//!       cask: true
//!     confirm: "Install Docker Desktop?"
//! ```

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// What the runner does when a step's installer fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Print one warning line and carry on with the next step.
    #[default]
    Warn,
    /// Stop the run; remaining steps are never attempted.
    Abort,
}

/// A condition that must hold before a step is attempted. Unmet requirements turn
/// the step into `Skipped` without touching the detector or the installer.
///
/// Written in YAML as a plain string: `package_manager`, `os:macos`, `arch:arm64`
/// or `command:npm`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Requirement {
    /// Only on this operating system (`macos`, `linux`).
    Os(String),
    /// Only on this CPU architecture (`arm64`, `x86_64`).
    Arch(String),
    /// The foundational package manager step must not have failed.
    PackageManager,
    /// Another executable must resolve on the run's search path.
    Command(String),
}

impl FromStr for Requirement {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed == "package_manager" {
            return Ok(Requirement::PackageManager);
        }

        let Some((kind, value)) = trimmed.split_once(':') else {
            return Err(ConfigError::InvalidRequirement(raw.to_string()));
        };
        let value = value.trim();
        if value.is_empty() {
            return Err(ConfigError::InvalidRequirement(raw.to_string()));
        }

        match kind.trim() {
            "os" => Ok(Requirement::Os(value.to_lowercase())),
            "arch" => Ok(Requirement::Arch(value.to_lowercase())),
            "command" => Ok(Requirement::Command(value.to_string())),
            _ => Err(ConfigError::InvalidRequirement(raw.to_string())),
        }
    }
}

impl TryFrom<String> for Requirement {
    type Error = ConfigError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<Requirement> for String {
    fn from(requirement: Requirement) -> Self {
        requirement.to_string()
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Os(os) => write!(f, "os:{os}"),
            Requirement::Arch(arch) => write!(f, "arch:{arch}"),
            Requirement::PackageManager => write!(f, "package_manager"),
            Requirement::Command(command) => write!(f, "command:{command}"),
        }
    }
}

/// A plain program invocation used for post-install commands and the `command`
/// installer. `~` and `$VARS` in `program` are expanded before running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
        }
    }
}

fn default_version_args() -> Vec<String> {
    vec!["--version".to_string()]
}

fn default_shell() -> String {
    "bash".to_string()
}

/// How a missing tool gets installed. The `source` key selects the installer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum InstallerSpec {
    /// `brew tap <tap>` (when set) then `brew install [--cask] <formula>`.
    Brew {
        formula: String,
        #[serde(default)]
        cask: bool,
        #[serde(default)]
        tap: Option<String>,
    },
    /// `npm install -g <package>`.
    Npm { package: String },
    /// A vendor install script fetched with curl and piped into a shell.
    Script {
        url: String,
        #[serde(default = "default_shell")]
        shell: String,
        /// Arguments passed to the script (`<shell> -s -- <args>`).
        #[serde(default)]
        args: Vec<String>,
        /// Extra environment for the script, e.g. `NONINTERACTIVE=1`.
        #[serde(default)]
        env: BTreeMap<String, String>,
    },
    /// Any other program, run as-is.
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
}

impl InstallerSpec {
    /// Short name shown in logs and in `list` output.
    pub fn source_name(&self) -> &'static str {
        match self {
            InstallerSpec::Brew { .. } => "brew",
            InstallerSpec::Npm { .. } => "npm",
            InstallerSpec::Script { .. } => "script",
            InstallerSpec::Command { .. } => "command",
        }
    }

    /// The package, formula, URL or program this installer targets.
    pub fn target(&self) -> &str {
        match self {
            InstallerSpec::Brew { formula, .. } => formula,
            InstallerSpec::Npm { package } => package,
            InstallerSpec::Script { url, .. } => url,
            InstallerSpec::Command { program, .. } => program,
        }
    }
}

/// How the detector decides whether a step's tool is already present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// An executable resolvable on the search path, optionally queried for its
    /// version with `version_args`.
    Executable {
        binary: String,
        version_args: Vec<String>,
    },
    /// A file whose existence means the tool is installed (Rosetta has no binary
    /// on the search path).
    File(PathBuf),
}

/// One registered step of the checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSpec {
    /// Identifier used in logs, the summary table and the `skip` list.
    pub name: String,
    /// Executable probed on the search path. Defaults to `name`.
    #[serde(default)]
    pub binary: Option<String>,
    /// Arguments that make the binary print its version (`--version` unless set).
    /// An empty list means the version is reported as unknown.
    #[serde(default = "default_version_args")]
    pub version_args: Vec<String>,
    /// Probe a file instead of an executable.
    #[serde(default)]
    pub probe_path: Option<String>,
    pub installer: InstallerSpec,
    #[serde(default)]
    pub requires: Vec<Requirement>,
    #[serde(default)]
    pub on_failure: FailurePolicy,
    /// Marks the package manager step. When it fails, steps requiring
    /// `package_manager` are skipped (lenient) or the run aborts (strict).
    #[serde(default)]
    pub foundational: bool,
    /// Yes/no question asked before installing. Empty input means "no".
    #[serde(default)]
    pub confirm: Option<String>,
    /// Commands run after the installer succeeded, in order.
    #[serde(default)]
    pub post_install: Vec<CommandSpec>,
    /// Directories prepended to the run's search path once the step installed.
    #[serde(default)]
    pub path_entries: Vec<String>,
    /// Line appended to the login shell profile once the step installed.
    #[serde(default)]
    pub profile_line: Option<String>,
}

impl StepSpec {
    /// A step with defaults for everything but its name and installer.
    pub fn new(name: &str, installer: InstallerSpec) -> Self {
        Self {
            name: name.to_string(),
            binary: None,
            version_args: default_version_args(),
            probe_path: None,
            installer,
            requires: Vec::new(),
            on_failure: FailurePolicy::Warn,
            foundational: false,
            confirm: None,
            post_install: Vec::new(),
            path_entries: Vec::new(),
            profile_line: None,
        }
    }

    pub fn binary(&self) -> &str {
        self.binary.as_deref().unwrap_or(&self.name)
    }

    /// The detector for this step.
    pub fn probe(&self) -> Probe {
        match &self.probe_path {
            Some(path) => Probe::File(crate::libs::utilities::path_helpers::expand_path(path)),
            None => Probe::Executable {
                binary: self.binary().to_string(),
                version_args: self.version_args.clone(),
            },
        }
    }

    /// Checks the fields the runner relies on being non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let empty = |field: &'static str| ConfigError::EmptyField {
            step: self.name.clone(),
            field,
        };

        if self.name.trim().is_empty() {
            return Err(empty("name"));
        }
        if self.binary().trim().is_empty() {
            return Err(empty("binary"));
        }
        if self.installer.target().trim().is_empty() {
            return Err(empty("installer target"));
        }
        if let InstallerSpec::Script { shell, .. } = &self.installer {
            if shell.trim().is_empty() {
                return Err(empty("script shell"));
            }
        }
        if self.post_install.iter().any(|cmd| cmd.program.trim().is_empty()) {
            return Err(empty("post_install program"));
        }
        Ok(())
    }
}
