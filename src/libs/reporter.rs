//! # Summary Reporter
//!
//! Formats the results of a run as a table, one row per step in registry order,
//! followed by a counts line. Pure formatting: callers decide where it goes.
//!
//! ```text
//!  Tool      Outcome                      Version
//!  homebrew  skipped (already installed)  4.2.0
//!  node      installed                    20.11.0
//!  docker    skipped (declined)           Not installed
//! ```

use crate::schemas::outcomes::{ExecutionResult, Outcome};
use prettytable::{Table, format, row};

/// Version cell text for a step whose tool was not found.
pub const NOT_INSTALLED: &str = "Not installed";

/// `installed`, `failed`, or `skipped (<reason>)`.
pub fn outcome_cell(result: &ExecutionResult) -> String {
    match &result.outcome {
        Outcome::Skipped { reason } => format!("skipped ({reason})"),
        other => other.label().to_string(),
    }
}

/// The detected version, `unknown`, or [`NOT_INSTALLED`].
pub fn version_cell(result: &ExecutionResult) -> &str {
    result.version.as_deref().unwrap_or(NOT_INSTALLED)
}

/// The summary table for `results`.
pub fn render(results: &[ExecutionResult]) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(row!["Tool", "Outcome", "Version"]);
    for result in results {
        table.add_row(row![result.step, outcome_cell(result), version_cell(result)]);
    }
    table.to_string()
}

/// `2 installed, 11 skipped, 1 failed`.
pub fn counts_line(results: &[ExecutionResult]) -> String {
    let count = |label: &str| {
        results
            .iter()
            .filter(|result| result.outcome.label() == label)
            .count()
    };
    format!(
        "{} installed, {} skipped, {} failed",
        count("installed"),
        count("skipped"),
        count("failed")
    )
}

/// Writes the table and the counts line to stdout.
pub fn print_summary(results: &[ExecutionResult]) {
    println!();
    print!("{}", render(results));
    println!("{}", counts_line(results));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::outcomes::{FailureKind, SkipReason};

    fn results() -> Vec<ExecutionResult> {
        vec![
            ExecutionResult::skipped("homebrew", SkipReason::AlreadyPresent, Some("4.2.0".into())),
            ExecutionResult::installed("node", Some("20.11.0".into())),
            ExecutionResult::skipped("ipfs", SkipReason::AlreadyPresent, Some("unknown".into())),
            ExecutionResult::failed(
                "truffle",
                FailureKind::InstallFailed { command: "npm install -g truffle".into(), exit_code: 1 },
            ),
        ]
    }

    #[test]
    fn one_row_per_result_in_order() {
        let rendered = render(&results());
        let rows: Vec<&str> = rendered.lines().filter(|line| !line.trim().is_empty()).collect();

        assert_eq!(rows.len(), 5);
        assert!(rows[0].contains("Tool") && rows[0].contains("Version"));
        for (row, (tool, version)) in rows[1..].iter().zip([
            ("homebrew", "4.2.0"),
            ("node", "20.11.0"),
            ("ipfs", "unknown"),
            ("truffle", NOT_INSTALLED),
        ]) {
            assert!(row.contains(tool), "{row}");
            assert!(row.contains(version), "{row}");
        }
    }

    #[test]
    fn outcome_cells_carry_skip_reason() {
        let results = results();
        assert_eq!(outcome_cell(&results[0]), "skipped (already installed)");
        assert_eq!(outcome_cell(&results[1]), "installed");
        assert_eq!(outcome_cell(&results[3]), "failed");
    }

    #[test]
    fn counts_every_outcome() {
        assert_eq!(counts_line(&results()), "1 installed, 2 skipped, 1 failed");
        assert_eq!(counts_line(&[]), "0 installed, 0 skipped, 0 failed");
    }
}
