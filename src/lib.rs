//! fileorg - sort the files of a directory into subfolders
//!
//! This library classifies files by category, modification month or raw
//! extension, moves them under a target directory without overwriting
//! existing files, and reports what it did. Runs can be previewed with a
//! dry run and restricted with exclusion filters.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod file_category;
pub mod file_organizer;
pub mod output;
pub mod report;
pub mod resolver;
pub mod traversal;

pub use classifier::Classifier;
pub use config::{ConfigError, FileFilter, OrganizeMode, OrganizerConfig};
pub use file_category::{Category, CategoryTable};
pub use file_organizer::{FileOrganizer, OrganizeError, OrganizeResult, Outcome};
pub use report::{RunReport, RunWarning};
pub use traversal::{FileRecord, Traversal};

pub use cli::{Cli, run_cli};
