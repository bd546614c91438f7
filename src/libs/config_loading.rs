use crate::errors::ConfigError;
use crate::libs::utilities::path_helpers::{expand_path, get_web3box_dir};
use crate::schemas::config::BootstrapConfig;
use crate::{log_debug, log_info};
use colored::Colorize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Default location of the optional configuration file.
pub fn default_config_path() -> PathBuf {
    get_web3box_dir().join("config.yaml")
}

/// Loads the bootstrap configuration.
///
/// With `explicit` set (from `--config` or `SETUP_WEB3BOX_CONFIG`) the file must
/// exist. Without it, `~/.setup-web3box/config.yaml` is read when present and the
/// built-in defaults are used otherwise.
///
/// # Arguments
/// * `explicit`: A user-supplied path; `~` and `$VARS` are expanded.
///
/// # Returns
/// The parsed `BootstrapConfig`, or a `ConfigError` naming the file that could not
/// be read or parsed.
pub fn load_config(explicit: Option<&str>) -> Result<BootstrapConfig, ConfigError> {
    match explicit {
        Some(raw) => {
            let path = expand_path(raw);
            log_debug!("[Config] Using config file given on the command line: {}", path.display());
            read_config(&path)
        }
        None => {
            let path = default_config_path();
            match read_config(&path) {
                Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                    log_debug!(
                        "[Config] No config file at {}; using built-in defaults",
                        path.display().to_string().yellow()
                    );
                    Ok(BootstrapConfig::default())
                }
                other => other,
            }
        }
    }
}

/// Reads and parses one YAML config file. An empty file is the default config.
pub fn read_config(path: &Path) -> Result<BootstrapConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        log_debug!("[Config] {} is empty; using built-in defaults", path.display());
        return Ok(BootstrapConfig::default());
    }

    let config: BootstrapConfig =
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    log_info!(
        "[Config] Loaded configuration from {}",
        path.display().to_string().green()
    );
    log_debug!("[Config] {:?}", config);
    Ok(config)
}
