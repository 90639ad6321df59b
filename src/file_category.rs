//! Extension-based file classification.
//!
//! This module holds the ordered category table and the classifier that maps a
//! file name to the category subdirectory it belongs in. Matching is by the
//! lowercase extension only; the first category (in declaration order) that
//! lists an extension wins.
//!
//! # Examples
//!
//! ```
//! use dirsort::file_category::{Classifier, OTHERS};
//!
//! let classifier = Classifier::default();
//! assert_eq!(classifier.classify("photo.JPG").category, "Images");
//! assert_eq!(classifier.classify("budget.xlsx").category, "Documents");
//! assert_eq!(classifier.classify("README").category, OTHERS);
//! ```

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Name of the catch-all category for unmatched and extension-less files.
pub const OTHERS: &str = "Others";

/// Leading character that marks a hidden file.
pub const HIDDEN_MARKER: char = '.';

/// The standard category table, in declaration order.
///
/// Some extensions appear in more than one category (`.xls`, `.xlsx`, `.ppt`,
/// `.pptx`); they resolve to the earliest one, Documents.
const STANDARD_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Documents",
        &[
            ".pdf", ".doc", ".docx", ".txt", ".ppt", ".pptx", ".xls", ".xlsx", ".rtf", ".odt",
        ],
    ),
    (
        "Images",
        &[
            ".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp", ".tiff", ".ico",
        ],
    ),
    (
        "Videos",
        &[
            ".mp4", ".mkv", ".mov", ".avi", ".flv", ".wmv", ".webm", ".m4v", ".3gp",
        ],
    ),
    (
        "Music",
        &[".mp3", ".wav", ".aac", ".flac", ".ogg", ".m4a", ".wma", ".aiff"],
    ),
    ("Archives", &[".zip", ".rar", ".tar", ".gz", ".7z", ".bz2", ".xz"]),
    ("Programs", &[".exe", ".msi", ".dmg", ".pkg", ".deb", ".rpm"]),
    (
        "Code",
        &[
            ".py", ".java", ".cpp", ".c", ".html", ".css", ".js", ".php", ".json", ".xml",
        ],
    ),
    ("Spreadsheets", &[".csv", ".xls", ".xlsx", ".ods"]),
    ("Presentations", &[".ppt", ".pptx", ".key", ".odp"]),
];

/// Errors raised while building a [`CategoryTable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The category name is empty or only whitespace.
    #[error("category name must not be empty")]
    EmptyName,

    /// The category name cannot be used as a single directory name.
    #[error("category name '{0}' is not a valid directory name")]
    InvalidName(String),

    /// The category name collides with the catch-all category.
    #[error("category name '{0}' is reserved for unmatched files")]
    ReservedName(String),

    /// The same category was declared twice.
    #[error("category '{0}' is declared more than once")]
    DuplicateCategory(String),

    /// An extension is not of the form `.suffix`.
    #[error("invalid extension '{extension}' in category '{category}'")]
    InvalidExtension { category: String, extension: String },
}

/// A named bucket of extensions sharing one destination subdirectory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    name: String,
    extensions: Vec<String>,
}

impl Category {
    /// Builds a category from already-normalized extensions, dropping duplicates.
    fn from_normalized<I>(name: &str, extensions: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for ext in extensions {
            if !unique.contains(&ext) {
                unique.push(ext);
            }
        }
        Self {
            name: name.to_string(),
            extensions: unique,
        }
    }

    /// The category name, which is also its directory name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lowercase extensions with their leading dot, in declaration order.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns true if this category lists the given lowercase extension.
    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.iter().any(|ext| ext == extension)
    }
}

/// Ordered mapping from category names to extension sets.
///
/// The table is built once, then shared read-only (usually behind an [`Arc`]).
/// Lookups scan categories in declaration order, so an extension listed by
/// several categories always resolves to the first of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTable {
    categories: Vec<Category>,
}

impl CategoryTable {
    /// Creates a table with no categories; every file classifies as [`OTHERS`].
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    /// Creates the standard table of nine categories.
    pub fn standard() -> Self {
        let categories = STANDARD_CATEGORIES
            .iter()
            .map(|(name, exts)| {
                Category::from_normalized(name, exts.iter().map(|ext| ext.to_string()))
            })
            .collect();
        Self { categories }
    }

    /// Appends a category after the existing ones.
    ///
    /// Extensions are lowercased and given a leading dot if it is missing, so
    /// `"PDF"`, `".pdf"` and `".PDF"` are equivalent.
    ///
    /// # Errors
    ///
    /// Returns a [`TableError`] if the name is empty, reserved, already
    /// declared, or not a plain directory name, or if an extension contains
    /// more than its leading dot.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::file_category::CategoryTable;
    ///
    /// let table = CategoryTable::empty()
    ///     .with_category("Books", ["epub", ".MOBI"])
    ///     .unwrap();
    /// assert_eq!(table.lookup(".mobi"), Some("Books"));
    /// ```
    pub fn with_category<I, S>(mut self, name: &str, extensions: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = validate_category_name(name)?;
        if self.categories.iter().any(|c| c.name == name) {
            return Err(TableError::DuplicateCategory(name.to_string()));
        }

        let normalized = extensions
            .into_iter()
            .map(|ext| normalize_extension(name, ext.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        self.categories
            .push(Category::from_normalized(name, normalized));
        Ok(self)
    }

    /// Categories in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Returns the first category that lists `extension` (lowercase, with dot).
    pub fn lookup(&self, extension: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|category| category.contains(extension))
            .map(Category::name)
    }

    /// Number of categories, not counting [`OTHERS`].
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns true if the table has no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate_category_name(name: &str) -> Result<&str, TableError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TableError::EmptyName);
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(TableError::InvalidName(name.to_string()));
    }
    if name.eq_ignore_ascii_case(OTHERS) {
        return Err(TableError::ReservedName(name.to_string()));
    }
    Ok(name)
}

fn normalize_extension(category: &str, raw: &str) -> Result<String, TableError> {
    let trimmed = raw.trim().to_lowercase();
    let ext = if trimmed.starts_with('.') {
        trimmed
    } else {
        format!(".{}", trimmed)
    };

    let suffix = &ext[1..];
    if suffix.is_empty() || suffix.contains(['.', '/', '\\']) {
        return Err(TableError::InvalidExtension {
            category: category.to_string(),
            extension: raw.to_string(),
        });
    }
    Ok(ext)
}

/// Splits a file name into its stem and extension (extension keeps its dot).
///
/// Leading dots belong to the stem, so `.bashrc` has no extension, while a
/// trailing dot is an extension of its own (`"notes."` → `("notes", ".")`).
///
/// # Examples
///
/// ```
/// use dirsort::file_category::split_extension;
///
/// assert_eq!(split_extension("archive.tar.gz"), ("archive.tar", ".gz"));
/// assert_eq!(split_extension(".bashrc"), (".bashrc", ""));
/// assert_eq!(split_extension("Makefile"), ("Makefile", ""));
/// ```
pub fn split_extension(file_name: &str) -> (&str, &str) {
    let leading = file_name.len() - file_name.trim_start_matches(HIDDEN_MARKER).len();
    match file_name[leading..].rfind('.') {
        Some(idx) => file_name.split_at(leading + idx),
        None => (file_name, ""),
    }
}

/// Returns the lowercase extension of a file name, or an empty string.
pub fn extension_of(file_name: &str) -> String {
    split_extension(file_name).1.to_lowercase()
}

/// The category chosen for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementDecision {
    /// A table category name, or [`OTHERS`].
    pub category: String,
    /// False when the file had no extension and skipped the table lookup.
    pub has_extension: bool,
}

impl PlacementDecision {
    fn others(has_extension: bool) -> Self {
        Self {
            category: OTHERS.to_string(),
            has_extension,
        }
    }

    /// Returns true if the file landed in the catch-all category.
    pub fn is_others(&self) -> bool {
        self.category == OTHERS
    }
}

/// Maps file names to categories using an injected [`CategoryTable`].
#[derive(Debug, Clone)]
pub struct Classifier {
    table: Arc<CategoryTable>,
}

impl Classifier {
    /// Creates a classifier over the given table.
    pub fn new(table: Arc<CategoryTable>) -> Self {
        Self { table }
    }

    /// The table this classifier reads from.
    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    /// Classifies a file by the extension of its name.
    ///
    /// The lookup is case-insensitive. Names without an extension go straight
    /// to [`OTHERS`] with `has_extension == false`; extensions no category lists
    /// go to [`OTHERS`] too.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::file_category::Classifier;
    ///
    /// let classifier = Classifier::default();
    /// let decision = classifier.classify("Report.PDF");
    /// assert_eq!(decision.category, "Documents");
    /// assert!(decision.has_extension);
    ///
    /// let decision = classifier.classify("LICENSE");
    /// assert!(decision.is_others());
    /// assert!(!decision.has_extension);
    /// ```
    pub fn classify(&self, file_name: &str) -> PlacementDecision {
        let extension = extension_of(file_name);
        if extension.is_empty() {
            return PlacementDecision::others(false);
        }

        match self.table.lookup(&extension) {
            Some(category) => PlacementDecision {
                category: category.to_string(),
                has_extension: true,
            },
            None => PlacementDecision::others(true),
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Arc::new(CategoryTable::default()))
    }
}
