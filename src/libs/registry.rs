//! # Step Registry
//!
//! The built-in Web3 workstation checklist and the rules for tailoring it with
//! `config.yaml`. Order matters: Rosetta before anything that may ship x86-only
//! binaries, Homebrew before every `brew` step, Node.js before the npm packages.

use crate::errors::ConfigError;
use crate::libs::utilities::platform::Platform;
use crate::log_debug;
use crate::schemas::config::BootstrapConfig;
use crate::schemas::steps::{CommandSpec, InstallerSpec, Requirement, StepSpec};
use colored::Colorize;
use std::collections::{BTreeMap, HashSet};

const HOMEBREW_INSTALL_URL: &str = "https://raw.githubusercontent.com/Homebrew/install/HEAD/install.sh";
const FOUNDRY_INSTALL_URL: &str = "https://foundry.paradigm.xyz";
const SUBSTRATE_INSTALL_URL: &str = "https://getsubstrate.io";
const SOLANA_INSTALL_URL: &str = "https://release.solana.com/stable/install";
const ROSETTA_RUNTIME: &str = "/Library/Apple/usr/libexec/oah/libRosettaRuntime";
const ETHEREUM_TAP: &str = "ethereum/ethereum";

fn brew(name: &str, formula: &str) -> StepSpec {
    let mut step = StepSpec::new(
        name,
        InstallerSpec::Brew {
            formula: formula.to_string(),
            cask: false,
            tap: None,
        },
    );
    step.requires = vec![
        Requirement::PackageManager,
        Requirement::Command("brew".to_string()),
    ];
    step
}

fn tapped(name: &str, formula: &str, tap: &str) -> StepSpec {
    let mut step = brew(name, formula);
    if let InstallerSpec::Brew { tap: slot, .. } = &mut step.installer {
        *slot = Some(tap.to_string());
    }
    step
}

fn npm(name: &str, package: &str) -> StepSpec {
    let mut step = StepSpec::new(name, InstallerSpec::Npm { package: package.to_string() });
    step.requires = vec![Requirement::Command("npm".to_string())];
    step
}

fn script(name: &str, url: &str) -> StepSpec {
    StepSpec::new(
        name,
        InstallerSpec::Script {
            url: url.to_string(),
            shell: "bash".to_string(),
            args: Vec::new(),
            env: BTreeMap::new(),
        },
    )
}

fn rosetta() -> StepSpec {
    let mut step = StepSpec::new(
        "rosetta",
        InstallerSpec::Command {
            program: "softwareupdate".to_string(),
            args: vec!["--install-rosetta".to_string(), "--agree-to-license".to_string()],
        },
    );
    step.probe_path = Some(ROSETTA_RUNTIME.to_string());
    step.requires = vec![
        Requirement::Os("macos".to_string()),
        Requirement::Arch("arm64".to_string()),
    ];
    step
}

fn homebrew(platform: &Platform) -> StepSpec {
    let bin_dir = format!("{}/bin", platform.homebrew_prefix());
    let mut step = script("homebrew", HOMEBREW_INSTALL_URL);
    if let InstallerSpec::Script { env, .. } = &mut step.installer {
        env.insert("NONINTERACTIVE".to_string(), "1".to_string());
    }
    step.binary = Some("brew".to_string());
    step.foundational = true;
    step.profile_line = Some(format!("eval \"$({bin_dir}/brew shellenv)\""));
    step.path_entries = vec![bin_dir];
    step
}

fn foundry() -> StepSpec {
    let mut step = script("foundry", FOUNDRY_INSTALL_URL);
    step.binary = Some("forge".to_string());
    step.post_install = vec![CommandSpec::new("~/.foundry/bin/foundryup", &[])];
    step.path_entries = vec!["~/.foundry/bin".to_string()];
    step
}

fn substrate() -> StepSpec {
    let mut step = script("substrate", SUBSTRATE_INSTALL_URL);
    if let InstallerSpec::Script { args, .. } = &mut step.installer {
        args.push("--fast".to_string());
    }
    step.binary = Some("subkey".to_string());
    step.path_entries = vec!["~/.cargo/bin".to_string()];
    step
}

fn solana() -> StepSpec {
    let mut step = script("solana", SOLANA_INSTALL_URL);
    if let InstallerSpec::Script { shell, .. } = &mut step.installer {
        *shell = "sh".to_string();
    }
    step.path_entries = vec!["~/.local/share/solana/install/active_release/bin".to_string()];
    step
}

/// The built-in checklist for `platform`, in run order.
pub fn default_steps(platform: &Platform) -> Vec<StepSpec> {
    let mut near = npm("near-cli", "near-cli");
    near.binary = Some("near".to_string());

    let mut docker = brew("docker", "docker");
    if let InstallerSpec::Brew { cask, .. } = &mut docker.installer {
        *cask = true;
    }
    docker.confirm = Some("Install Docker Desktop?".to_string());

    let mut geth = tapped("geth", "ethereum", ETHEREUM_TAP);
    geth.binary = Some("geth".to_string());

    let mut solidity = tapped("solidity", "solidity", ETHEREUM_TAP);
    solidity.binary = Some("solc".to_string());

    vec![
        rosetta(),
        homebrew(platform),
        brew("node", "node"),
        npm("yarn", "yarn"),
        npm("hardhat", "hardhat"),
        npm("truffle", "truffle"),
        npm("ganache", "ganache"),
        foundry(),
        geth,
        brew("ipfs", "ipfs"),
        substrate(),
        solana(),
        near,
        docker,
        solidity,
    ]
}

/// Applies `config` to the built-in checklist: `steps` replaces it, `skip` removes
/// entries by name. Every resulting step is validated.
pub fn apply_config(
    defaults: Vec<StepSpec>,
    config: &BootstrapConfig,
) -> Result<Vec<StepSpec>, ConfigError> {
    let mut steps = match &config.steps {
        Some(custom) => {
            log_debug!("[Registry] Using {} step(s) from config", custom.len());
            custom.clone()
        }
        None => defaults,
    };

    for name in &config.skip {
        if !steps.iter().any(|step| &step.name == name) {
            return Err(ConfigError::UnknownStep(name.clone()));
        }
        log_debug!("[Registry] Skipping '{}' as configured", name.yellow());
    }
    steps.retain(|step| !config.skip.contains(&step.name));

    let mut seen = HashSet::new();
    for step in &steps {
        if !seen.insert(step.name.as_str()) {
            return Err(ConfigError::DuplicateStep(step.name.clone()));
        }
        step.validate()?;
    }
    Ok(steps)
}
