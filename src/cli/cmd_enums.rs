use crate::cli::type_enums::OutputFormat;
use clap::{Parser, Subcommand};

/// Defines the command-line interface (CLI) for 'setup-web3box'.
#[derive(Parser, Debug)]
#[command(name = "setup-web3box", version)]
#[command(about = "Bootstrap a Web3 development workstation", long_about = None)]
pub struct Cli {
    /// Enables detailed debug output (invocations, captured installer output).
    #[arg(short, long, global = true)]
    pub(crate) debug: bool,

    /// Path to config.yaml (defaults to ~/.setup-web3box/config.yaml).
    #[arg(long, global = true, env = "SETUP_WEB3BOX_CONFIG")]
    pub(crate) config: Option<String>,

    /// Without a subcommand the bootstrap runs, same as `now`.
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Detects every tool on the checklist and installs the missing ones.
    Now {
        /// Stop at the first failed step and exit non-zero.
        #[arg(long, conflicts_with = "lenient")]
        strict: bool,
        /// Warn about failed steps and carry on (the default).
        #[arg(long)]
        lenient: bool,
        /// Answer "yes" to every confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Reports which tools are installed, without installing anything.
    Status {
        /// Output format [possible values: table, json].
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Lists the checklist in run order.
    List,
    /// Show the current version of the tool.
    Version,
}

impl Commands {
    /// What a bare `setup-web3box` invocation runs.
    pub fn bootstrap() -> Self {
        Commands::Now {
            strict: false,
            lenient: false,
            yes: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_bootstrap() {
        let cli = Cli::try_parse_from(["setup-web3box"]).unwrap();
        assert_eq!(cli.command.unwrap_or_else(Commands::bootstrap), Commands::bootstrap());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["setup-web3box", "now", "--strict", "--debug", "--config", "/tmp/c.yaml"])
            .unwrap();
        assert!(cli.debug);
        assert_eq!(cli.config.as_deref(), Some("/tmp/c.yaml"));
        assert_eq!(
            cli.command,
            Some(Commands::Now { strict: true, lenient: false, yes: false })
        );
    }

    #[test]
    fn strict_and_lenient_conflict() {
        assert!(Cli::try_parse_from(["setup-web3box", "now", "--strict", "--lenient"]).is_err());
    }

    #[test]
    fn status_format_parses() {
        let cli = Cli::try_parse_from(["setup-web3box", "status", "--format", "json"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Status { format: OutputFormat::Json }));
    }
}
