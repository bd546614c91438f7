// Serde data model for configuration and run results.

// `config.yaml`.
pub mod config;
// Step results consumed by the reporter.
pub mod outcomes;
// Checklist entries.
pub mod steps;
