//! Output formatting and styling module.
//!
//! Provides a centralized interface for all user-facing CLI output: per-file
//! lines, the run header and the final summary. Diagnostics go through
//! `tracing` instead and end up on stderr.

use crate::config::OrganizerConfig;
use crate::report::RunReport;
use colored::*;
use std::collections::BTreeMap;
use std::path::Path;

/// Manages all CLI output with consistent styling and formatting.
///
/// - Success messages (green with ✓)
/// - Error messages (red with ✗)
/// - Warning messages (yellow with ⚠)
/// - Info messages (cyan)
/// - Dry-run notices (yellow, prefixed)
/// - The end-of-run summary
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fileorg::output::OutputFormatter;
    /// OutputFormatter::success("Moved: a.pdf -> organized/Documents/a.pdf");
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

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Prints the settings a run is about to use.
    pub fn run_header(config: &OrganizerConfig) {
        Self::info("Starting file organization...");
        println!("Source: {}", config.source().display());
        println!("Target: {}", config.target().display());
        println!("Organize by: {}", config.mode());
        println!("Dry run: {}", config.is_dry_run());
        if config.is_recursive() {
            println!("Recursive: true");
        }
        println!();
    }

    /// Formats a `from -> to` pair for per-file lines.
    pub fn move_line(verb: &str, from: &Path, to: &Path) -> String {
        format!("{}: {} -> {}", verb, from.display(), to.display())
    }

    /// Prints the end-of-run summary.
    ///
    /// `folder_counts` maps destination subfolders to the number of files
    /// moved (or previewed) into them; an empty map skips the table.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use fileorg::output::OutputFormatter;
    /// use fileorg::RunReport;
    /// use std::collections::BTreeMap;
    ///
    /// let mut counts = BTreeMap::new();
    /// counts.insert("Documents".to_string(), 15);
    /// counts.insert("Images".to_string(), 8);
    /// let report = RunReport { moved: 23, ..RunReport::default() };
    /// OutputFormatter::summary(&report, &counts);
    /// ```
    pub fn summary(report: &RunReport, folder_counts: &BTreeMap<String, usize>) {
        if !folder_counts.is_empty() {
            Self::summary_table(folder_counts);
        }

        Self::header("--- Summary ---");
        println!("Files moved: {}", report.moved.to_string().green());
        println!("Files skipped: {}", report.skipped);
        if report.excluded > 0 {
            println!("Files excluded: {}", report.excluded);
        }
        println!(
            "Total processed: {}",
            report.total_processed().to_string().bold()
        );

        if report.has_warnings() {
            Self::warning(&format!(
                "{} {} could not be organized. Please review the warnings above.",
                report.warnings.len(),
                if report.warnings.len() == 1 {
                    "entry"
                } else {
                    "entries"
                }
            ));
        }
    }

    fn summary_table(folder_counts: &BTreeMap<String, usize>) {
        let max_folder_len = folder_counts
            .keys()
            .map(|name| name.len())
            .max()
            .unwrap_or(0)
            .max(6); // At least "Folder" width

        Self::header("FOLDERS");
        println!(
            "{:<width$} | {}",
            "Folder".bold(),
            "Files".bold(),
            width = max_folder_len
        );
        println!("{}", "-".repeat(max_folder_len + 10));

        for (folder, count) in folder_counts {
            let file_word = if *count == 1 { "file" } else { "files" };
            println!(
                "{:<width$} | {} {}",
                folder,
                count.to_string().green(),
                file_word,
                width = max_folder_len
            );
        }
    }
}
