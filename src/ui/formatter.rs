//! Pure formatting functions for UI output.
//!
//! The `format_*` functions build plain strings and are what the tests check;
//! the `display_*` functions add color and print them.

use console::style;

use crate::finder::{DeletionOutcome, StaleReport};

pub const NO_STALE_BRANCHES: &str = "No stale branches found.";
pub const PRUNING_NOTICE: &str = "Pruning stale branches...";

/// The report line for a detection result.
///
/// Either exactly `No stale branches found.` or the comma-joined stale names.
pub fn format_stale_branches(stale: &[String]) -> String {
    if stale.is_empty() {
        NO_STALE_BRANCHES.to_string()
    } else {
        format!(
            "The following local branches are stale and can be removed: {}",
            stale.join(", ")
        )
    }
}

pub fn format_deletion(outcome: &DeletionOutcome) -> String {
    match &outcome.result {
        Ok(()) => format!("Deleted branch {}", outcome.branch),
        Err(message) => format!("Failed to delete {}: {}", outcome.branch, message),
    }
}

pub fn format_prune_hint() -> String {
    format!("Run with {} to remove them.", style("--prune").cyan())
}

pub fn format_force_hint() -> String {
    format!(
        "Some branches were not removed. Use {} to force deletion of unmerged branches.",
        style("--force").cyan()
    )
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Print a whole run report: the stale list, then one line per deletion.
///
/// Without pruning, a hint about `--prune` follows a non-empty list.
pub fn display_report(report: &StaleReport) {
    println!("{}", format_stale_branches(&report.stale));

    if report.is_empty() {
        return;
    }

    if !report.prune_requested {
        display_status(&format_prune_hint());
        return;
    }

    println!("{}", PRUNING_NOTICE);
    for outcome in &report.deletions {
        if outcome.is_deleted() {
            display_success(&format_deletion(outcome));
        } else {
            display_error(&format_deletion(outcome));
        }
    }

    if report.failed_deletions().next().is_some() {
        display_status(&format_force_hint());
    }
}
