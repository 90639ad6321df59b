//! Output formatting and styling module.
//!
//! All human-facing output goes through [`OutputFormatter`]: colored status
//! lines, the preview listing, the progress bar shown while files move, and
//! the closing summary table. JSON output is produced by the CLI directly.

use crate::file_organizer::{FailedMove, RunSummary};
use crate::report::PreviewReport;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dirsort::output::OutputFormatter;
    /// OutputFormatter::error("The folder 'Downloads' does not exist");
    /// ```
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

    /// Prints a message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Creates a progress bar for moving `total` files.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dirsort::output::OutputFormatter;
    /// let pb = OutputFormatter::create_progress_bar(100);
    /// pb.inc(1);
    /// pb.finish_and_clear();
    /// ```
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        let pb = ProgressBar::new(total);
        pb.set_style(style);
        pb
    }

    /// Prints where each file would go, grouped by category.
    pub fn preview(report: &PreviewReport, skipped: usize) {
        match report {
            PreviewReport::Empty => {
                Self::warning("No files found to organize.");
            }
            PreviewReport::Grouped(groups) => {
                for group in groups {
                    println!(
                        "\n📂 {} ({} {}):",
                        group.category.bold(),
                        group.files.len(),
                        plural(group.files.len())
                    );
                    for file in &group.files {
                        println!("   └── {}", file);
                    }
                }
            }
        }
        if skipped > 0 {
            Self::plain(&format!(
                "\n{} {} left in place (directories or hidden files).",
                skipped,
                if skipped == 1 { "entry" } else { "entries" }
            ));
        }
    }

    /// Prints a summary table of moved files per category, then the totals.
    pub fn summary_table(summary: &RunSummary) {
        Self::header("SUMMARY");

        let counts = category_counts(summary);
        let width = counts
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max(8); // "Category"

        println!(
            "{:<width$} | {}",
            "Category".bold(),
            "Files".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));
        for (category, count) in &counts {
            println!(
                "{:<width$} | {} {}",
                category,
                count.to_string().green(),
                plural(*count),
                width = width
            );
        }
        println!("{}", "-".repeat(width + 10));

        println!("Files moved:   {}", summary.moved_files().to_string().green());
        println!("Files skipped: {}", summary.skipped_files());
        if summary.failed_files() > 0 {
            println!("Files failed:  {}", summary.failed_files().to_string().red());
            Self::failures(&summary.failed);
        }
    }

    /// Lists files whose move failed.
    pub fn failures(failed: &[FailedMove]) {
        for failure in failed {
            Self::error(&failure.error);
        }
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }
}

/// Moved-file counts per category, in the order categories were first filled.
pub fn category_counts(summary: &RunSummary) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for moved in &summary.moved {
        match counts.iter_mut().find(|(name, _)| *name == moved.category) {
            Some((_, count)) => *count += 1,
            None => counts.push((moved.category.clone(), 1)),
        }
    }
    counts
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "file" } else { "files" }
}
