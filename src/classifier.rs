//! Maps a file to the name of its destination subfolder.

use crate::config::OrganizeMode;
use crate::file_category::CategoryTable;
use crate::file_organizer::{OrganizeError, OrganizeResult};
use crate::traversal::FileRecord;
use chrono::{DateTime, Local, Utc};
use std::ffi::OsStr;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Subfolder used in `extension` mode for files without an extension.
pub const NO_EXTENSION_DIR: &str = "no-extension";

/// Picks the destination subfolder for a file under a given mode.
///
/// - `type`: the category label from the [`CategoryTable`] ("Documents", ...)
/// - `date`: the modification month as `YYYY-MM`, in the local time zone of
///   the running process
/// - `extension`: the extension without its dot, original case kept
///
/// The extension is whatever follows the last `.` of the file name, so
/// `.bashrc` has the extension `bashrc` and `name.` has none.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    categories: &'a CategoryTable,
}

impl<'a> Classifier<'a> {
    pub fn new(categories: &'a CategoryTable) -> Self {
        Self { categories }
    }

    /// # Errors
    ///
    /// Returns `OrganizeError::TimestampOutOfRange` in `date` mode when the
    /// modification time cannot be represented as a calendar date.
    pub fn classify(&self, file: &FileRecord, mode: OrganizeMode) -> OrganizeResult<String> {
        let folder = match mode {
            OrganizeMode::Type => {
                let extension = extension_of(file).unwrap_or_default();
                self.categories
                    .lookup(&format!(".{extension}"))
                    .dir_name()
                    .to_string()
            }
            OrganizeMode::Date => modification_month(file)?,
            OrganizeMode::Extension => {
                extension_of(file).unwrap_or_else(|| NO_EXTENSION_DIR.to_string())
            }
        };
        Ok(folder)
    }
}

/// Splits a file name at its last `.` into stem and extension.
///
/// Unlike [`Path::extension`], a name whose only dot is the leading one
/// (`.bashrc`) has an empty stem and a non-empty extension. A trailing dot
/// gives an empty extension.
pub(crate) fn split_file_name(path: &Path) -> (&OsStr, Option<&OsStr>) {
    let name = path.file_name().unwrap_or_default();
    if let Some(extension) = path.extension() {
        return (path.file_stem().unwrap_or_default(), Some(extension));
    }
    match name.to_str().and_then(|n| n.strip_prefix('.')) {
        Some(rest) if !rest.is_empty() => (OsStr::new(""), Some(OsStr::new(rest))),
        _ => (name, None),
    }
}

fn extension_of(file: &FileRecord) -> Option<String> {
    split_file_name(file.path())
        .1
        .map(|ext| ext.to_string_lossy().into_owned())
        .filter(|ext| !ext.is_empty())
}

fn modification_month(file: &FileRecord) -> OrganizeResult<String> {
    let utc = to_utc(file.modified()).ok_or_else(|| OrganizeError::TimestampOutOfRange {
        path: file.path().to_path_buf(),
    })?;
    Ok(utc.with_timezone(&Local).format("%Y-%m").to_string())
}

// chrono's `From<SystemTime>` panics outside its supported range.
fn to_utc(time: SystemTime) -> Option<DateTime<Utc>> {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => {
            let secs = i64::try_from(after.as_secs()).ok()?;
            DateTime::from_timestamp(secs, after.subsec_nanos())
        }
        Err(before) => {
            let before = before.duration();
            let secs = i64::try_from(before.as_secs()).ok()?;
            match before.subsec_nanos() {
                0 => DateTime::from_timestamp(-secs, 0),
                nanos => DateTime::from_timestamp((-secs).checked_sub(1)?, 1_000_000_000 - nanos),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;

    fn record(name: &str) -> FileRecord {
        FileRecord::new(format!("/src/{name}"), SystemTime::UNIX_EPOCH)
    }

    fn record_at(name: &str, year: i32, month: u32, day: u32) -> FileRecord {
        let local = Local
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .single()
            .expect("unambiguous local time");
        FileRecord::new(format!("/src/{name}"), local.into())
    }

    fn folder(file: &FileRecord, mode: OrganizeMode) -> String {
        let table = CategoryTable::default();
        Classifier::new(&table)
            .classify(file, mode)
            .expect("classification should succeed")
    }

    #[test]
    fn test_type_mode_uses_category_labels() {
        assert_eq!(folder(&record("report.pdf"), OrganizeMode::Type), "Documents");
        assert_eq!(folder(&record("photo.jpg"), OrganizeMode::Type), "Images");
        assert_eq!(folder(&record("clip.mov"), OrganizeMode::Type), "Videos");
        assert_eq!(folder(&record("song.ogg"), OrganizeMode::Type), "Audio");
        assert_eq!(folder(&record("dump.tar"), OrganizeMode::Type), "Archives");
        assert_eq!(folder(&record("main.go"), OrganizeMode::Type), "Code");
    }

    #[test]
    fn test_type_mode_ignores_case() {
        assert_eq!(folder(&record("REPORT.PDF"), OrganizeMode::Type), "Documents");
        assert_eq!(folder(&record("Photo.JpEg"), OrganizeMode::Type), "Images");
    }

    #[test]
    fn test_type_mode_unknown_goes_to_others() {
        assert_eq!(folder(&record("data.xyz"), OrganizeMode::Type), "Others");
        assert_eq!(folder(&record("Makefile"), OrganizeMode::Type), "Others");
        assert_eq!(folder(&record(".bashrc"), OrganizeMode::Type), "Others");
        assert_eq!(folder(&record("trailing."), OrganizeMode::Type), "Others");
    }

    #[test]
    fn test_type_mode_dotfile_named_after_extension() {
        // The whole name after the leading dot is the extension.
        assert_eq!(folder(&record(".pdf"), OrganizeMode::Type), "Documents");
    }

    #[test]
    fn test_extension_mode_preserves_case() {
        assert_eq!(folder(&record("a.pdf"), OrganizeMode::Extension), "pdf");
        assert_eq!(folder(&record("IMG_01.JPG"), OrganizeMode::Extension), "JPG");
        assert_eq!(folder(&record("backup.tar.gz"), OrganizeMode::Extension), "gz");
    }

    #[test]
    fn test_extension_mode_without_extension() {
        for name in ["README", "trailing."] {
            assert_eq!(
                folder(&record(name), OrganizeMode::Extension),
                NO_EXTENSION_DIR,
                "{name}"
            );
        }
    }

    #[test]
    fn test_extension_mode_dotfiles() {
        assert_eq!(folder(&record(".bashrc"), OrganizeMode::Extension), "bashrc");
        assert_eq!(folder(&record(".gitignore"), OrganizeMode::Extension), "gitignore");
        assert_eq!(folder(&record(".config.bak"), OrganizeMode::Extension), "bak");
    }

    #[test]
    fn test_split_file_name() {
        let split = |name: &'static str| split_file_name(Path::new(name));

        assert_eq!(split("report.pdf"), (OsStr::new("report"), Some(OsStr::new("pdf"))));
        assert_eq!(split("backup.tar.gz"), (OsStr::new("backup.tar"), Some(OsStr::new("gz"))));
        assert_eq!(split(".bashrc"), (OsStr::new(""), Some(OsStr::new("bashrc"))));
        assert_eq!(split("Makefile"), (OsStr::new("Makefile"), None));
        assert_eq!(split("trailing."), (OsStr::new("trailing"), Some(OsStr::new(""))));
    }

    #[test]
    fn test_date_mode_formats_year_month() {
        let file = record_at("report.pdf", 2024, 3, 15);
        assert_eq!(folder(&file, OrganizeMode::Date), "2024-03");

        let file = record_at("old.txt", 987, 11, 2);
        assert_eq!(folder(&file, OrganizeMode::Date), "0987-11");
    }

    #[test]
    fn test_date_mode_just_before_epoch() {
        let file = FileRecord::new("/src/a.txt", UNIX_EPOCH - Duration::from_nanos(1));
        let expected = Local.timestamp_nanos(-1).format("%Y-%m").to_string();
        assert_eq!(folder(&file, OrganizeMode::Date), expected);
    }

    #[test]
    fn test_date_mode_out_of_range_timestamp() {
        let table = CategoryTable::default();
        let classifier = Classifier::new(&table);
        let file = FileRecord::new(
            "/src/a.txt",
            UNIX_EPOCH + Duration::from_secs(10_000_000_000_000),
        );

        let err = classifier
            .classify(&file, OrganizeMode::Date)
            .expect_err("year is beyond the calendar range");
        assert!(matches!(err, OrganizeError::TimestampOutOfRange { .. }));
        assert_eq!(err.path(), Some(Path::new("/src/a.txt")));
        assert!(!err.is_fatal());

        // Other modes do not look at the timestamp.
        assert_eq!(classifier.classify(&file, OrganizeMode::Extension).unwrap(), "txt");
    }

    #[test]
    fn test_date_mode_is_monotonic() {
        let folders: Vec<String> = [(2023, 12, 31), (2024, 1, 1), (2024, 1, 20), (2024, 2, 1)]
            .iter()
            .map(|&(y, m, d)| folder(&record_at("f.txt", y, m, d), OrganizeMode::Date))
            .collect();

        assert_eq!(folders, vec!["2023-12", "2024-01", "2024-01", "2024-02"]);
        assert!(folders.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
