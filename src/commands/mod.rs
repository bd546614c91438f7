// Register application subcommands.
// Each module corresponds to a specific `setup-web3box` command-line action.

use crate::libs::config_loading::load_config;
use crate::libs::registry::{apply_config, default_steps};
use crate::libs::utilities::platform::Platform;
use crate::schemas::config::BootstrapConfig;
use crate::schemas::steps::StepSpec;
use anyhow::Context;

// Lists the checklist without touching the machine.
pub mod list;
// Runs the bootstrap.
pub mod now;
// Reports what is installed without installing anything.
pub mod status;
// Displays the version of setup-web3box.
pub mod version;

/// Loads `config.yaml` and builds the checklist it describes for `platform`.
pub(crate) fn load_checklist(
    config_path: Option<&str>,
    platform: &Platform,
) -> anyhow::Result<(BootstrapConfig, Vec<StepSpec>)> {
    let config = load_config(config_path).context("failed to load configuration")?;
    let steps = apply_config(default_steps(platform), &config)
        .context("invalid step list in configuration")?;
    Ok((config, steps))
}
