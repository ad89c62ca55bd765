//! Command-line interface module for fileorg.
//!
//! This module handles all CLI-related functionality including:
//! - Flag parsing and pre-flight validation
//! - Running the organizer and printing per-file lines
//! - The end-of-run summary (text or JSON)

use crate::config::{ConfigError, FileFilter, OrganizeMode, OrganizerConfig};
use crate::file_organizer::{FileOrganizer, Outcome};
use crate::output::OutputFormatter;
use crate::report::RunReport;
use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Organize files into subfolders by type, modification date, or extension.
#[derive(Debug, Parser)]
#[command(name = "fileorg", version, about)]
pub struct Cli {
    /// Source directory to organize
    #[arg(long, default_value = ".")]
    pub source: PathBuf,

    /// Target directory for organized files
    #[arg(long, default_value = "./organized")]
    pub target: PathBuf,

    /// Organize by: type, date, or extension
    #[arg(long, default_value = "type")]
    pub by: String,

    /// Preview changes without moving files
    #[arg(long)]
    pub dry_run: bool,

    /// Process subdirectories recursively
    #[arg(long)]
    pub recursive: bool,

    /// Stop at the first file that cannot be organized
    #[arg(long)]
    pub fail_fast: bool,

    /// Leave files matching this glob in place (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Leave hidden files and files inside hidden directories in place
    #[arg(long)]
    pub skip_hidden: bool,

    /// Print the run report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Validates the flags and builds the run configuration.
    ///
    /// Nothing on disk is created or modified here, so an invalid mode or
    /// source directory stops the program before any file is touched.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for an unknown `--by` value, a missing or
    /// non-directory source, or an invalid `--exclude` pattern.
    pub fn to_config(&self) -> Result<OrganizerConfig, ConfigError> {
        let mode: OrganizeMode = self.by.parse()?;
        let filter = FileFilter::new(self.skip_hidden, &self.exclude)?;

        Ok(OrganizerConfig::new(&self.source, &self.target, mode)?
            .with_dry_run(self.dry_run)
            .with_recursive(self.recursive)
            .with_fail_fast(self.fail_fast)
            .with_filter(filter))
    }
}

/// Runs the organizer with the given configuration and prints the results.
///
/// In text mode every move (or planned move) is printed as it happens,
/// followed by a summary. In JSON mode only the final report is printed.
///
/// # Examples
///
/// ```no_run
/// use fileorg::cli::run_cli;
/// use fileorg::{OrganizeMode, OrganizerConfig};
///
/// let config = OrganizerConfig::new(".", "./organized", OrganizeMode::Type)?
///     .with_dry_run(true);
/// let report = run_cli(&config, false)?;
/// println!("{} files would move", report.moved);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn run_cli(config: &OrganizerConfig, json: bool) -> Result<RunReport> {
    if !json {
        OutputFormatter::run_header(config);
    }

    let organizer = FileOrganizer::new(config.clone());
    let mut folder_counts: BTreeMap<String, usize> = BTreeMap::new();

    let report = organizer
        .run(|outcome| {
            if let Some(folder) = destination_folder(outcome) {
                *folder_counts.entry(folder).or_insert(0) += 1;
            }
            if !json {
                print_outcome(outcome);
            }
        })
        .with_context(|| format!("Error organizing files in {}", config.source().display()))?;

    if json {
        let rendered = report.to_json().context("Failed to serialize run report")?;
        println!("{}", rendered);
    } else {
        OutputFormatter::summary(&report, &folder_counts);
        if config.is_dry_run() && report.moved > 0 {
            OutputFormatter::info("Dry run complete. No files were modified.");
        }
    }

    Ok(report)
}

fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::Moved { from, to } => {
            OutputFormatter::success(&OutputFormatter::move_line("Moved", from, to));
        }
        Outcome::Previewed { from, to } => {
            OutputFormatter::dry_run_notice(&OutputFormatter::move_line("Would move", from, to));
        }
        Outcome::Skipped { .. } => {}
    }
}

/// Name of the subfolder a moved or previewed file went into.
fn destination_folder(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Moved { to, .. } | Outcome::Previewed { to, .. } => to
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned()),
        Outcome::Skipped { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["fileorg"]).expect("defaults parse");

        assert_eq!(cli.source, PathBuf::from("."));
        assert_eq!(cli.target, PathBuf::from("./organized"));
        assert_eq!(cli.by, "type");
        assert!(!cli.dry_run);
        assert!(!cli.recursive);
        assert!(!cli.fail_fast);
        assert!(cli.exclude.is_empty());
        assert!(!cli.json);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "fileorg",
            "--source",
            "in",
            "--target",
            "out",
            "--by",
            "date",
            "--dry-run",
            "--recursive",
            "--fail-fast",
            "--exclude",
            "*.tmp",
            "--exclude",
            "*.part",
            "--skip-hidden",
            "--json",
            "-v",
        ])
        .expect("flags parse");

        assert_eq!(cli.source, PathBuf::from("in"));
        assert_eq!(cli.target, PathBuf::from("out"));
        assert_eq!(cli.by, "date");
        assert!(cli.dry_run && cli.recursive && cli.fail_fast);
        assert_eq!(cli.exclude, vec!["*.tmp", "*.part"]);
        assert!(cli.skip_hidden && cli.json && cli.verbose);
    }

    #[test]
    fn test_to_config_rejects_unknown_mode() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from(["fileorg", "--source", source.as_str(), "--by", "size"])
            .expect("any string is accepted by the parser");

        let err = cli.to_config().expect_err("size is not a mode");
        assert!(matches!(err, ConfigError::InvalidMode(_)));
    }

    #[test]
    fn test_to_config_builds_settings() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().to_string_lossy().to_string();
        let cli = Cli::try_parse_from([
            "fileorg",
            "--source",
            source.as_str(),
            "--by",
            "extension",
            "--dry-run",
            "--recursive",
        ])
        .expect("flags parse");

        let config = cli.to_config().expect("valid config");
        assert_eq!(config.mode(), OrganizeMode::Extension);
        assert!(config.is_dry_run());
        assert!(config.is_recursive());
        assert!(!config.is_fail_fast());
        assert_eq!(config.source(), temp_dir.path());
    }

    #[test]
    fn test_destination_folder() {
        let moved = Outcome::Moved {
            from: PathBuf::from("a.pdf"),
            to: PathBuf::from("out/Documents/a_1.pdf"),
        };
        let skipped = Outcome::Skipped {
            path: PathBuf::from("out/Documents/a.pdf"),
        };

        assert_eq!(destination_folder(&moved), Some("Documents".to_string()));
        assert_eq!(destination_folder(&skipped), None);
    }
}
