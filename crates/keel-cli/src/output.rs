//! Terminal rendering for `keel` reports.

use colored::Colorize;

use crate::commands::check::CheckedComponent;

/// Bold title followed by a rule of the same width.
pub(crate) fn title(text: &str) -> String {
    let rule = "━".repeat(text.chars().count());
    format!("{}\n{}", text.bold().cyan(), rule.dimmed())
}

/// One accepted component: its lifecycle position, capability and
/// implementation, with the description indented underneath.
pub(crate) fn component_row(position: usize, row: &CheckedComponent) -> String {
    let line = format!(
        "  {position:>2}. {} implemented by {}",
        row.capability.bold(),
        row.implementation
    );
    match &row.description {
        Some(description) => format!("{line}\n      {}", description.dimmed()),
        None => line,
    }
}

/// Closing line of `keel check`.
pub(crate) fn accepted(count: usize, host: &str) -> String {
    if count == 0 {
        return format!("{} no components found for host {host}", "✓".green());
    }
    format!("{} {count} component(s) accepted for host {host}", "✓".green())
}

/// Result of `keel config validate`, listing the files that were merged.
pub(crate) fn config_valid(loaded_files: &[String]) -> String {
    let mut lines = vec![format!("{} configuration is valid", "✓".green())];
    if loaded_files.is_empty() {
        lines.push(format!("  {}", "built-in defaults only".dimmed()));
    }
    lines.extend(loaded_files.iter().map(|path| format!("  - {path}")));
    lines.join("\n")
}

/// A command failure with its cause chain, one cause per line.
pub(crate) fn failure(err: &anyhow::Error) -> String {
    std::iter::once(format!("{} {}", "✗".red(), err.to_string().red()))
        .chain(
            err.chain()
                .skip(1)
                .map(|cause| format!("  {} {cause}", "caused by:".dimmed())),
        )
        .collect::<Vec<_>>()
        .join("\n")
}
