/// File placement: moving each enumerated file into its destination folder.
///
/// This module ties the pieces together. For every file found under the
/// source directory it asks the classifier for a subfolder, builds the
/// destination under the target directory, and then either skips the file
/// (already in place), reports the move (dry run) or creates the folder and
/// renames the file, picking a free name when the destination is taken.
use crate::classifier::Classifier;
use crate::config::OrganizerConfig;
use crate::file_category::CategoryTable;
use crate::report::RunReport;
use crate::resolver::resolve_conflict;
use crate::traversal::{FileRecord, Traversal};
use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while organizing files.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The source directory itself could not be read. Always aborts the run.
    #[error("failed to read source directory: {source}")]
    RootUnreadable { source: walkdir::Error },
    /// An entry below the source directory could not be read.
    #[error("failed to traverse directory: {source}")]
    Traversal { source: walkdir::Error },
    /// The modification time of a file could not be read.
    #[error("failed to get info for {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The modification time lies outside the representable calendar range.
    #[error("modification time of {} is out of range", .path.display())]
    TimestampOutOfRange { path: PathBuf },
    /// Failed to create a destination directory.
    #[error("failed to create directory {}: {source}", .path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file to its destination.
    #[error("failed to move {} to {}: {source}", .from.display(), .to.display())]
    FileMoveFailure {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    /// Every numbered alternative for a destination name is taken.
    #[error("too many naming conflicts for {} (tried {attempts} alternatives)", .path.display())]
    TooManyConflicts { path: PathBuf, attempts: u32 },
}

impl OrganizeError {
    /// Returns true if the run cannot continue after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RootUnreadable { .. })
    }

    /// The path the error is about, when there is one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::RootUnreadable { source } | Self::Traversal { source } => source.path(),
            Self::Metadata { path, .. }
            | Self::TimestampOutOfRange { path }
            | Self::DirectoryCreationFailed { path, .. }
            | Self::TooManyConflicts { path, .. } => Some(path),
            Self::FileMoveFailure { from, .. } => Some(from),
        }
    }
}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The file already sits at its destination.
    Skipped { path: PathBuf },
    /// Dry run: the file would be moved to `to`.
    Previewed { from: PathBuf, to: PathBuf },
    /// The file was moved; `to` is the final, conflict-free path.
    Moved { from: PathBuf, to: PathBuf },
}

/// Moves files from the source tree into classified subfolders of the target.
///
/// Owns the run configuration and the category table for the duration of
/// one run.
pub struct FileOrganizer {
    config: OrganizerConfig,
    categories: CategoryTable,
}

impl FileOrganizer {
    pub fn new(config: OrganizerConfig) -> Self {
        Self {
            config,
            categories: CategoryTable::default(),
        }
    }

    fn classifier(&self) -> Classifier<'_> {
        Classifier::new(&self.categories)
    }

    /// Places a single file.
    ///
    /// The destination is `target/<subfolder>/<file name>`. When it is the
    /// file's current path nothing happens and `Outcome::Skipped` is
    /// returned. In dry-run mode the planned move is returned without
    /// touching the filesystem. Otherwise the subfolder is created if needed,
    /// a free name is chosen and the file is renamed into place.
    ///
    /// # Errors
    ///
    /// Returns `TimestampOutOfRange` (date mode only),
    /// `DirectoryCreationFailed`, `TooManyConflicts` or `FileMoveFailure`.
    /// Cross-device moves are not supported and surface as
    /// `FileMoveFailure`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use fileorg::{FileOrganizer, FileRecord, OrganizeMode, OrganizerConfig};
    /// use std::time::SystemTime;
    ///
    /// let config = OrganizerConfig::new("downloads", "organized", OrganizeMode::Type)?;
    /// let organizer = FileOrganizer::new(config);
    /// let outcome = organizer.process(&FileRecord::new("downloads/report.pdf", SystemTime::now()))?;
    /// println!("{:?}", outcome);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn process(&self, file: &FileRecord) -> OrganizeResult<Outcome> {
        let subfolder = self.classifier().classify(file, self.config.mode())?;
        let destination_dir = self.config.target().join(&subfolder);

        let file_name = file
            .path()
            .file_name()
            .ok_or_else(|| OrganizeError::FileMoveFailure {
                from: file.path().to_path_buf(),
                to: destination_dir.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;
        let destination = destination_dir.join(file_name);

        if normalize_path(file.path()) == normalize_path(&destination) {
            debug!("Already in place: {}", file.path().display());
            return Ok(Outcome::Skipped {
                path: file.path().to_path_buf(),
            });
        }

        if self.config.is_dry_run() {
            return Ok(Outcome::Previewed {
                from: file.path().to_path_buf(),
                to: destination,
            });
        }

        fs::create_dir_all(&destination_dir).map_err(|source| {
            OrganizeError::DirectoryCreationFailed {
                path: destination_dir.clone(),
                source,
            }
        })?;

        let final_path = resolve_conflict(&destination)?;
        if final_path != destination {
            debug!(
                "Name taken, using {} instead of {}",
                final_path.display(),
                destination.display()
            );
        }

        fs::rename(file.path(), &final_path).map_err(|source| OrganizeError::FileMoveFailure {
            from: file.path().to_path_buf(),
            to: final_path.clone(),
            source,
        })?;

        Ok(Outcome::Moved {
            from: file.path().to_path_buf(),
            to: final_path,
        })
    }

    /// Organizes every file under the source directory.
    ///
    /// `on_outcome` is called once per processed file, in traversal order.
    /// Files rejected by the configured filter are only counted as excluded.
    ///
    /// Recoverable errors (unreadable entries, bad timestamps, failed moves)
    /// are logged and recorded as warnings in the returned report, and the
    /// run goes on with the next file, in both flat and recursive mode. With
    /// fail-fast enabled the first such error ends the run instead.
    ///
    /// # Errors
    ///
    /// Returns `RootUnreadable` if the source directory cannot be listed, or
    /// the first per-file error when fail-fast is enabled.
    pub fn run<F>(&self, mut on_outcome: F) -> OrganizeResult<RunReport>
    where
        F: FnMut(&Outcome),
    {
        info!(
            "Organizing {} into {} by {}",
            self.config.source().display(),
            self.config.target().display(),
            self.config.mode()
        );

        let mut report = RunReport::default();
        // Files this run moved; a recursive walk may reach them again when
        // the target lies inside the source.
        let mut placed: HashSet<PathBuf> = HashSet::new();

        for item in Traversal::new(self.config.source(), self.config.is_recursive()) {
            let file = match item {
                Ok(file) => file,
                Err(err) => {
                    self.recover(err, &mut report)?;
                    continue;
                }
            };

            if placed.contains(&normalize_path(file.path())) {
                continue;
            }

            if !self
                .config
                .filter()
                .should_include(file.path(), self.config.source())
            {
                debug!("Excluded: {}", file.path().display());
                report.excluded += 1;
                continue;
            }

            match self.process(&file) {
                Ok(outcome) => {
                    if let Outcome::Moved { to, .. } = &outcome {
                        placed.insert(normalize_path(to));
                    }
                    report.record(&outcome);
                    on_outcome(&outcome);
                }
                Err(err) => self.recover(err, &mut report)?,
            }
        }

        info!(
            "Run finished: {} moved, {} skipped, {} warnings",
            report.moved,
            report.skipped,
            report.warnings.len()
        );
        Ok(report)
    }

    fn recover(&self, err: OrganizeError, report: &mut RunReport) -> OrganizeResult<()> {
        if err.is_fatal() || self.config.is_fail_fast() {
            return Err(err);
        }
        warn!("{}", err);
        report.record_warning(&err);
        Ok(())
    }
}

/// Lexically normalizes a path for comparison: made absolute against the
/// current directory, `.` dropped and `..` folded into its parent. Symlinks
/// are not resolved.
pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() && !normalized.has_root() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
