//! Run configuration and file filtering.
//!
//! Everything a run needs is collected once into an [`OrganizerConfig`],
//! validated up front so that a bad mode, a missing source directory or an
//! unparsable exclude pattern stops the program before any file is touched.
//!
//! Filtering supports two rules, both selected from the command line:
//! - hidden files (any path component starting with ".") can be skipped
//! - glob patterns exclude files by name or by path relative to the source

use glob::Pattern;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors detected while building the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The organizing mode is not one of `type`, `date` or `extension`.
    #[error("invalid organize method '{0}': use type, date, or extension")]
    InvalidMode(String),
    /// The source directory does not exist.
    #[error("source directory does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// The source path exists but is not a directory.
    #[error("source path is not a directory: {}", .0.display())]
    SourceNotDirectory(PathBuf),
    /// An exclude glob could not be parsed.
    #[error("invalid exclude pattern '{pattern}': {reason}")]
    InvalidExcludePattern {
        /// The glob pattern that failed to compile.
        pattern: String,
        /// Why the pattern was rejected.
        reason: String,
    },
}

/// The rule used to pick a destination subfolder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrganizeMode {
    /// Group by category ("Documents", "Images", ...).
    Type,
    /// Group by modification month (`YYYY-MM`).
    Date,
    /// Group by raw extension (`pdf`, `JPG`, `no-extension`).
    Extension,
}

impl OrganizeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrganizeMode::Type => "type",
            OrganizeMode::Date => "date",
            OrganizeMode::Extension => "extension",
        }
    }
}

impl fmt::Display for OrganizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrganizeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "type" => Ok(OrganizeMode::Type),
            "date" => Ok(OrganizeMode::Date),
            "extension" => Ok(OrganizeMode::Extension),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

/// Compiled exclusion rules applied to every enumerated file.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    skip_hidden: bool,
    exclude_patterns: Vec<Pattern>,
}

impl FileFilter {
    /// Compiles the given glob patterns.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidExcludePattern` for the first pattern
    /// that does not parse.
    pub fn new<S: AsRef<str>>(skip_hidden: bool, patterns: &[S]) -> Result<Self, ConfigError> {
        let exclude_patterns = patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Pattern::new(pattern).map_err(|e| ConfigError::InvalidExcludePattern {
                    pattern: pattern.to_string(),
                    reason: e.msg.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            skip_hidden,
            exclude_patterns,
        })
    }

    /// Returns true if the file should be organized.
    ///
    /// `path` is the file as enumerated, `root` the source directory it was
    /// found under. Patterns are tried against the file name and against the
    /// path relative to `root`.
    pub fn should_include(&self, path: &Path, root: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);

        if self.skip_hidden && is_hidden(relative) {
            return false;
        }

        let file_name = path.file_name().map(Path::new);
        !self.exclude_patterns.iter().any(|pattern| {
            pattern.matches_path(relative) || file_name.is_some_and(|n| pattern.matches_path(n))
        })
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        !self.skip_hidden && self.exclude_patterns.is_empty()
    }
}

fn is_hidden(relative: &Path) -> bool {
    relative.components().any(|component| match component {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

/// Immutable settings for a single organize run.
///
/// Built through [`OrganizerConfig::new`], which validates the source
/// directory, then refined with the builder-style setters before the run
/// starts.
#[derive(Debug, Clone)]
pub struct OrganizerConfig {
    source: PathBuf,
    target: PathBuf,
    mode: OrganizeMode,
    dry_run: bool,
    recursive: bool,
    fail_fast: bool,
    filter: FileFilter,
}

impl OrganizerConfig {
    /// Creates a configuration after checking that `source` is an existing
    /// directory. The target directory does not need to exist yet.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::SourceNotFound` or
    /// `ConfigError::SourceNotDirectory`.
    pub fn new(
        source: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        mode: OrganizeMode,
    ) -> Result<Self, ConfigError> {
        let source = source.into();
        if !source.exists() {
            return Err(ConfigError::SourceNotFound(source));
        }
        if !source.is_dir() {
            return Err(ConfigError::SourceNotDirectory(source));
        }

        Ok(Self {
            source,
            target: target.into(),
            mode,
            dry_run: false,
            recursive: false,
            fail_fast: false,
            filter: FileFilter::default(),
        })
    }

    /// Preview moves without touching the filesystem.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Walk the whole subtree instead of the top level only.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Abort on the first per-file error instead of recording a warning.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn with_filter(mut self, filter: FileFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn mode(&self) -> OrganizeMode {
        self.mode
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    pub fn is_fail_fast(&self) -> bool {
        self.fail_fast
    }

    pub fn filter(&self) -> &FileFilter {
        &self.filter
    }
}
