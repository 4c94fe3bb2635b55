//! Console output helpers.
//!
//! All user-facing printing goes through [`OutputFormatter`] so wording and
//! coloring stay consistent: status lines on stdout, diagnostics on stderr.

use colored::*;

/// Formats and prints all CLI output.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints an informational line in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints an unstyled status line.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a bold section header preceded by a blank line.
    pub fn header(message: &str) {
        println!("\n{}", message.bold());
    }

    /// Prints a warning in yellow.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an error diagnostic in red on stderr.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a dry-run line in yellow with a `[DRY RUN]` marker.
    pub fn dry_run(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }
}
