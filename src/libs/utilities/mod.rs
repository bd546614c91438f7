// Small helpers shared by the runner, the installers and the commands.

// `~`/`$VAR` expansion and the bootstrapper's home directory.
pub mod path_helpers;
// OS/architecture detection and normalization.
pub mod platform;
// Version extraction from `--version` output.
pub mod version_text;
