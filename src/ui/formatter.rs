//! Pure formatting functions for UI output.
//!
//! Every line git-gate prints is tagged with [`PREFIX`] so its output stands
//! out from git's own when running as a hook. Multi-line messages are split
//! and each line is tagged separately.

use console::style;

use crate::boundary::BoundaryWarning;

/// Tag in front of every printed line
pub const PREFIX: &str = "[git-gate]";

/// Split a message into lines, dropping empty ones
pub fn tagged_lines(message: &str) -> Vec<String> {
    message
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| format!("{} {}", PREFIX, line))
        .collect()
}

/// Render the suggestion block shown at the end of a run.
///
/// Returns no lines when there is nothing to suggest.
pub fn suggestion_block(suggestions: &[String]) -> Vec<String> {
    if suggestions.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![format!("{} suggestion(s):", PREFIX)];
    lines.extend(suggestions.iter().map(|s| format!("  {}", s)));
    lines
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    for line in tagged_lines(message) {
        eprintln!("{}", style(line).red());
    }
}

/// Format and print a check title in bold yellow.
pub fn display_title(message: &str) {
    for line in tagged_lines(message) {
        println!("{}", style(line).yellow().bold());
    }
}

/// Format and print an informational message in yellow.
pub fn display_status(message: &str) {
    for line in tagged_lines(message) {
        println!("{}", style(line).yellow());
    }
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {} {}", PREFIX, style("✓").green(), message);
}

/// Display a boundary warning to the user.
///
/// # Arguments
/// * `warning` - The boundary warning to display
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!(
        "{} {} {}",
        PREFIX,
        style("⚠ WARNING:").yellow(),
        warning
    );
}

/// Display the trailing list of commands the user may want to run.
pub fn display_suggestions(suggestions: &[String]) {
    for line in suggestion_block(suggestions) {
        println!("{}", style(line).yellow());
    }
}
