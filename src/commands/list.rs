// `setup-web3box list`: the checklist in run order, with how each tool would be
// installed and what it needs first.

use crate::commands::load_checklist;
use crate::libs::utilities::platform::Platform;
use crate::schemas::steps::StepSpec;
use prettytable::{Table, format, row};
use std::process::ExitCode;

/// One row per step: position, name, probed binary, installer and requirements.
pub fn render_checklist(steps: &[StepSpec]) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(row!["#", "Step", "Binary", "Installer", "Requires"]);

    for (index, step) in steps.iter().enumerate() {
        let binary = match &step.probe_path {
            Some(path) => path.clone(),
            None => step.binary().to_string(),
        };
        let installer = format!("{} {}", step.installer.source_name(), step.installer.target());
        let mut requires: Vec<String> = step.requires.iter().map(ToString::to_string).collect();
        if step.confirm.is_some() {
            requires.push("confirm".to_string());
        }
        let requires = if requires.is_empty() { "-".to_string() } else { requires.join(", ") };
        table.add_row(row![index + 1, step.name, binary, installer, requires]);
    }
    table.to_string()
}

pub fn run(config_path: Option<String>) -> anyhow::Result<ExitCode> {
    let platform = Platform::current();
    let (_, steps) = load_checklist(config_path.as_deref(), &platform)?;
    print!("{}", render_checklist(&steps));
    Ok(ExitCode::SUCCESS)
}
