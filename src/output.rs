//! Output formatting and styling module.
//!
//! Provides a centralized interface for all CLI output, including colored output,
//! progress tracking, and formatted tables.

use crate::organize::OrganizeReport;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling and formatting.
///
/// This struct provides methods for:
/// - Success messages (green with ✓)
/// - Error messages (red with ✗)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - Progress bars for operations
/// - Summary tables with statistics
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use prefixtidy::output::OutputFormatter;
    /// OutputFormatter::success("Copied data1.csv to data/");
    /// ```
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates and returns a progress bar for file operations.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use prefixtidy::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(100);
    /// pb.inc(1);
    /// pb.finish_with_message("Completed!");
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints a summary table with the number of files per group folder.
    ///
    /// Groups are listed in the order they were discovered.
    pub fn summary_table(report: &OrganizeReport) {
        Self::header("SUMMARY");

        let max_name_len = report
            .groups
            .iter()
            .map(|group| group.folder_name.chars().count() + 1)
            .max()
            .unwrap_or(0)
            .max(6); // At least "Folder" width

        println!(
            "{:<width$} | {}",
            "Folder".bold(),
            "Files".bold(),
            width = max_name_len
        );
        println!("{}", "-".repeat(max_name_len + 10));

        for group in &report.groups {
            let count = group.processed.to_string();
            let count = if group.processed == group.members {
                count.green()
            } else {
                count.yellow()
            };
            println!(
                "{:<width$} | {}/{} {}",
                format!("{}/", group.folder_name),
                count,
                group.members,
                if group.members == 1 { "file" } else { "files" },
                width = max_name_len
            );
        }

        println!("{}", "-".repeat(max_name_len + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            report.files_processed.to_string().green().bold(),
            if report.files_processed == 1 {
                "file"
            } else {
                "files"
            },
            width = max_name_len
        );
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }
}
