// Yes/no confirmation for optional steps (Docker Desktop is large and licensed, so
// it is never installed without asking).

use crate::log_warn;
use colored::Colorize;
use dialoguer::Confirm;

pub trait Prompter {
    /// Asks a yes/no question. Empty input, and any situation where nobody can
    /// answer, counts as "no".
    fn confirm(&self, question: &str) -> bool;
}

/// Asks on the controlling terminal with `dialoguer`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, question: &str) -> bool {
        match Confirm::new()
            .with_prompt(question)
            .default(false)
            .show_default(true)
            .wait_for_newline(true)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                log_warn!(
                    "[Prompt] Could not read an answer ({}); treating '{}' as declined",
                    e,
                    question.yellow()
                );
                false
            }
        }
    }
}
