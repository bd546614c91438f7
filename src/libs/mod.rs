// Core of the bootstrapper: everything between the CLI commands and the
// external programs it drives.

// Reads the optional `config.yaml`.
pub mod config_loading;
// Per-run state passed to every step.
pub mod context;
// Presence and version detection.
pub mod detection;
// The only place other programs are started.
pub mod process;
// Yes/no confirmation prompts.
pub mod prompt;
// The built-in checklist and config overrides.
pub mod registry;
// Summary table.
pub mod reporter;
// Walks the checklist.
pub mod runner;
// Login shell profile updates.
pub mod shell_profile;
#[cfg(test)]
pub(crate) mod testing;
pub mod utilities;
