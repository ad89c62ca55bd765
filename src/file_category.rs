/// Extension-based categorization used by the `type` organizing mode.
///
/// This module maps file extensions (with their leading dot) to broad
/// categories such as "Documents" or "Images". Anything not in the table
/// falls back to [`Category::Other`].
///
/// # Examples
///
/// ```
/// use fileorg::file_category::{Category, CategoryTable};
///
/// let table = CategoryTable::default();
/// assert_eq!(table.lookup(".pdf"), Category::Document);
/// assert_eq!(table.lookup(".JPG"), Category::Image);
/// assert_eq!(table.lookup(".xyz"), Category::Other);
/// ```
use std::collections::HashMap;

const DOCUMENT_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".txt", ".rtf", ".odt", ".xlsx", ".xls", ".pptx", ".ppt",
];
const IMAGE_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp", ".ico",
];
const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".avi", ".mkv", ".mov", ".wmv", ".flv", ".webm"];
const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".wav", ".flac", ".aac", ".ogg", ".m4a"];
const ARCHIVE_EXTENSIONS: &[&str] = &[".zip", ".rar", ".7z", ".tar", ".gz"];
const CODE_EXTENSIONS: &[&str] = &[
    ".go", ".py", ".js", ".java", ".cpp", ".c", ".html", ".css", ".json", ".xml",
];

/// Represents a broad file category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Documents, spreadsheets and presentations (PDF, DOCX, XLSX, ...)
    Document,
    /// Image files (PNG, JPG, GIF, ...)
    Image,
    /// Video files (MP4, MKV, AVI, ...)
    Video,
    /// Audio files (MP3, WAV, FLAC, ...)
    Audio,
    /// Archive files (ZIP, RAR, 7Z, ...)
    Archive,
    /// Source code and markup (Go, Python, HTML, JSON, ...)
    Code,
    /// Unknown or uncategorized files
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 7] = [
        Category::Document,
        Category::Image,
        Category::Video,
        Category::Audio,
        Category::Archive,
        Category::Code,
        Category::Other,
    ];

    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use fileorg::file_category::Category;
    ///
    /// assert_eq!(Category::Image.dir_name(), "Images");
    /// assert_eq!(Category::Audio.dir_name(), "Audio");
    /// assert_eq!(Category::Other.dir_name(), "Others");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Document => "Documents",
            Category::Image => "Images",
            Category::Video => "Videos",
            Category::Audio => "Audio",
            Category::Archive => "Archives",
            Category::Code => "Code",
            Category::Other => "Others",
        }
    }

    fn extensions(&self) -> &'static [&'static str] {
        match self {
            Category::Document => DOCUMENT_EXTENSIONS,
            Category::Image => IMAGE_EXTENSIONS,
            Category::Video => VIDEO_EXTENSIONS,
            Category::Audio => AUDIO_EXTENSIONS,
            Category::Archive => ARCHIVE_EXTENSIONS,
            Category::Code => CODE_EXTENSIONS,
            Category::Other => &[],
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Read-only lookup table from extension to category.
///
/// Built once per run and shared by reference with the classifier.
/// Keys are lowercase and include the leading dot (`".pdf"`).
#[derive(Debug, Clone)]
pub struct CategoryTable {
    extension_map: HashMap<&'static str, Category>,
}

impl CategoryTable {
    /// Creates a table holding all standard extension groups.
    pub fn new() -> Self {
        let extension_map = Category::ALL
            .iter()
            .flat_map(|category| {
                category
                    .extensions()
                    .iter()
                    .map(move |ext| (*ext, *category))
            })
            .collect();

        Self { extension_map }
    }

    /// Maps an extension (leading dot included) to its category.
    ///
    /// The lookup is case-insensitive. Unknown or empty extensions
    /// return [`Category::Other`].
    pub fn lookup(&self, extension: &str) -> Category {
        self.extension_map
            .get(extension.to_lowercase().as_str())
            .copied()
            .unwrap_or(Category::Other)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.extension_map.len()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::new()
    }
}
