//! Planning and executing the placement of files into category directories.
//!
//! Organizing a directory happens in two steps. [`FileOrganizer::plan`] lists
//! the immediate children of the directory and classifies every regular,
//! non-hidden file without touching the filesystem. [`FileOrganizer::execute`]
//! then creates the category subdirectories and moves each planned file,
//! renaming it (`name_1.ext`, `name_2.ext`, ...) when the destination is taken.
//!
//! A run assumes it is the only writer in the target directory: the free-name
//! check and the move that follows it are not atomic.

use crate::file_category::{
    CategoryTable, Classifier, HIDDEN_MARKER, OTHERS, PlacementDecision, extension_of,
};
use serde::Serialize;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while planning or executing an organization run.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The target path does not exist.
    #[error("The folder '{}' does not exist", .path.display())]
    DirectoryNotFound { path: PathBuf },

    /// The target path exists but is not a directory.
    #[error("'{}' is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    /// The target directory could not be listed.
    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDirFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A category subdirectory could not be created.
    #[error("Failed to create category directory '{category}' at {}: {source}", .path.display())]
    DirectoryCreateFailed {
        category: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single file could not be moved into its category.
    #[error("Failed to move {} to {}: {source}", .file.display(), .destination.display())]
    MoveFailed {
        file: PathBuf,
        destination: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// A regular, non-hidden file found directly inside the target directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// The file name, lossily converted to UTF-8 for classification and display.
    pub name: String,
    /// The file name exactly as the filesystem reported it.
    #[serde(skip)]
    pub file_name: OsString,
    /// The full path to the file.
    pub path: PathBuf,
    /// Lowercase extension with its leading dot, or empty.
    pub extension: String,
}

/// Why an entry was left out of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The entry is a directory (or a link to one).
    Directory,
    /// The name starts with the hidden-file marker.
    Hidden,
}

/// An entry excluded during planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub name: String,
    pub reason: SkipReason,
}

/// One file of the plan together with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    pub entry: FileEntry,
    pub decision: PlacementDecision,
}

/// The classified contents of one directory level.
///
/// `files` keeps the order of the underlying directory listing, which is not
/// sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub files: Vec<PlannedFile>,
    pub skipped: Vec<SkippedEntry>,
}

impl Plan {
    /// Returns true if there is nothing to move.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Distinct categories referenced by the plan, in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for planned in &self.files {
            let category = planned.decision.category.as_str();
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }
}

/// A planned file with its final, collision-free destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMove {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub category: String,
    pub has_extension: bool,
}

/// A file that could not be moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedMove {
    pub file: PathBuf,
    pub destination: PathBuf,
    /// The rendered [`OrganizeError::MoveFailed`] for this file.
    pub error: String,
}

/// Reported to the progress callback after each file is handled.
#[derive(Debug, Clone, Copy)]
pub enum MoveEvent<'a> {
    Moved(&'a ResolvedMove),
    Failed(&'a FailedMove),
}

/// Outcome of one organization run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Files moved into a category directory.
    pub moved: Vec<ResolvedMove>,
    /// Entries left in place because they were excluded during planning.
    pub skipped: Vec<SkippedEntry>,
    /// Files whose move failed; the rest of the run went on without them.
    pub failed: Vec<FailedMove>,
}

impl RunSummary {
    /// Number of files moved into a category directory.
    pub fn moved_files(&self) -> usize {
        self.moved.len()
    }

    /// Number of entries excluded during planning.
    pub fn skipped_files(&self) -> usize {
        self.skipped.len()
    }

    /// Number of files whose move failed.
    pub fn failed_files(&self) -> usize {
        self.failed.len()
    }

    /// Returns true if every planned file was moved.
    pub fn is_complete_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Organizes the files of a directory into category subdirectories.
#[derive(Debug, Clone, Default)]
pub struct FileOrganizer {
    classifier: Classifier,
}

impl FileOrganizer {
    /// Creates an organizer that classifies with the given table.
    pub fn new(table: Arc<CategoryTable>) -> Self {
        Self::with_classifier(Classifier::new(table))
    }

    /// Creates an organizer around an existing classifier.
    pub fn with_classifier(classifier: Classifier) -> Self {
        Self { classifier }
    }

    /// The classifier used while planning.
    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Lists and classifies the immediate children of `base_path`.
    ///
    /// Directories and hidden entries are recorded in [`Plan::skipped`]; every
    /// other entry is classified and appended to [`Plan::files`]. Nothing on
    /// disk is changed.
    ///
    /// # Errors
    ///
    /// * [`OrganizeError::DirectoryNotFound`] if `base_path` does not exist
    /// * [`OrganizeError::NotADirectory`] if it is not a directory
    /// * [`OrganizeError::ReadDirFailed`] if it cannot be listed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirsort::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// let organizer = FileOrganizer::default();
    /// let plan = organizer.plan(Path::new("/home/user/Downloads")).unwrap();
    /// for planned in &plan.files {
    ///     println!("{} -> {}", planned.entry.name, planned.decision.category);
    /// }
    /// ```
    pub fn plan(&self, base_path: &Path) -> OrganizeResult<Plan> {
        validate_directory(base_path)?;

        let read_failed = |source| OrganizeError::ReadDirFailed {
            path: base_path.to_path_buf(),
            source,
        };
        let entries = fs::read_dir(base_path).map_err(read_failed)?;

        let mut plan = Plan::default();
        for entry in entries {
            let entry = entry.map_err(read_failed)?;
            let path = entry.path();

            let file_name = entry.file_name();
            let name = file_name.to_string_lossy().into_owned();
            if file_name.to_str().is_none() {
                debug!(name = ?file_name, "Entry name is not valid UTF-8");
            }

            let reason = if path.is_dir() {
                Some(SkipReason::Directory)
            } else if name.starts_with(HIDDEN_MARKER) {
                Some(SkipReason::Hidden)
            } else {
                None
            };
            if let Some(reason) = reason {
                debug!(file = %name, ?reason, "Skipping entry");
                plan.skipped.push(SkippedEntry { name, reason });
                continue;
            }

            let decision = self.classifier.classify(&name);
            debug!(file = %name, category = %decision.category, "Classified file");
            plan.files.push(PlannedFile {
                entry: FileEntry {
                    extension: extension_of(&name),
                    name,
                    file_name,
                    path,
                },
                decision,
            });
        }

        info!(
            directory = %base_path.display(),
            planned = plan.files.len(),
            skipped = plan.skipped.len(),
            "Planned organization"
        );
        Ok(plan)
    }

    /// Moves every planned file into its category directory.
    ///
    /// See [`FileOrganizer::execute_with_progress`].
    pub fn execute(&self, base_path: &Path, plan: &Plan) -> OrganizeResult<RunSummary> {
        self.execute_with_progress(base_path, plan, |_| {})
    }

    /// Moves every planned file, reporting each one to `on_event`.
    ///
    /// The category directories referenced by the plan, and `Others`, are
    /// created first if missing. Each file then goes to
    /// `base_path/<category>/<name>`, or to the first free `<stem>_<n><ext>`
    /// when that path is taken. A failed move is recorded in
    /// [`RunSummary::failed`] and does not stop the run.
    ///
    /// # Errors
    ///
    /// Fails before moving anything if `base_path` is missing or not a
    /// directory, or if a category directory cannot be created.
    pub fn execute_with_progress<F>(
        &self,
        base_path: &Path,
        plan: &Plan,
        mut on_event: F,
    ) -> OrganizeResult<RunSummary>
    where
        F: FnMut(MoveEvent<'_>),
    {
        validate_directory(base_path)?;
        ensure_category_dirs(base_path, plan)?;

        let mut summary = RunSummary {
            skipped: plan.skipped.clone(),
            ..RunSummary::default()
        };

        for planned in &plan.files {
            let category = &planned.decision.category;
            let destination = resolve_destination(&base_path.join(category), &planned.entry.file_name);

            match move_file(&planned.entry.path, &destination) {
                Ok(()) => {
                    debug!(
                        file = %planned.entry.name,
                        destination = %destination.display(),
                        "Moved file"
                    );
                    let resolved = ResolvedMove {
                        source: planned.entry.path.clone(),
                        destination,
                        category: category.clone(),
                        has_extension: planned.decision.has_extension,
                    };
                    on_event(MoveEvent::Moved(&resolved));
                    summary.moved.push(resolved);
                }
                Err(source) => {
                    let error = OrganizeError::MoveFailed {
                        file: planned.entry.path.clone(),
                        destination: destination.clone(),
                        source,
                    };
                    warn!(%error, "Could not organize file");
                    let failed = FailedMove {
                        file: planned.entry.path.clone(),
                        destination,
                        error: error.to_string(),
                    };
                    on_event(MoveEvent::Failed(&failed));
                    summary.failed.push(failed);
                }
            }
        }

        info!(
            directory = %base_path.display(),
            moved = summary.moved_files(),
            skipped = summary.skipped_files(),
            failed = summary.failed_files(),
            "Organization complete"
        );
        Ok(summary)
    }
}

/// Returns the first free destination for `file_name` inside `category_dir`.
///
/// The plain name is used when nothing occupies it; otherwise a counter
/// starting at 1 is inserted before the extension until a free name is found.
/// The name is split on its raw bytes, so names that are not valid UTF-8 keep
/// every byte.
///
/// # Examples
///
/// ```no_run
/// use dirsort::file_organizer::resolve_destination;
/// use std::path::Path;
///
/// // With Documents/report.txt already present:
/// let dest = resolve_destination(Path::new("/data/Documents"), "report.txt");
/// assert_eq!(dest, Path::new("/data/Documents/report_1.txt"));
/// ```
pub fn resolve_destination(category_dir: &Path, file_name: impl AsRef<OsStr>) -> PathBuf {
    let file_name = file_name.as_ref();
    let candidate = category_dir.join(file_name);
    if !is_occupied(&candidate) {
        return candidate;
    }

    let (stem, ext) = split_os_extension(file_name);
    let mut counter: u64 = 1;
    loop {
        let mut numbered = stem.to_os_string();
        numbered.push(format!("_{counter}"));
        numbered.push(ext);
        let candidate = category_dir.join(numbered);
        if !is_occupied(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Byte-level counterpart of [`split_extension`](crate::file_category::split_extension).
fn split_os_extension(file_name: &OsStr) -> (&OsStr, &OsStr) {
    let marker = HIDDEN_MARKER as u8;
    let bytes = file_name.as_encoded_bytes();
    let leading = bytes.iter().take_while(|&&b| b == marker).count();
    match bytes[leading..].iter().rposition(|&b| b == b'.') {
        Some(idx) => {
            let (stem, ext) = bytes.split_at(leading + idx);
            // SAFETY: both halves come from an encoded OsStr split right before
            // an ASCII byte, which keeps each half a valid encoding.
            unsafe {
                (
                    OsStr::from_encoded_bytes_unchecked(stem),
                    OsStr::from_encoded_bytes_unchecked(ext),
                )
            }
        }
        None => (file_name, OsStr::new("")),
    }
}

// Dangling symlinks count as occupied so they are never replaced.
fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn validate_directory(path: &Path) -> OrganizeResult<()> {
    match fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(OrganizeError::NotADirectory {
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(OrganizeError::DirectoryNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(OrganizeError::ReadDirFailed {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Creates the plan's category directories plus `Others`, keeping existing ones.
fn ensure_category_dirs(base_path: &Path, plan: &Plan) -> OrganizeResult<()> {
    let mut categories = plan.categories();
    if !categories.contains(&OTHERS) {
        categories.push(OTHERS);
    }

    for category in categories {
        let path = base_path.join(category);
        match fs::create_dir(&path) {
            Ok(()) => debug!(directory = %path.display(), "Created category directory"),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => {}
            Err(source) => {
                return Err(OrganizeError::DirectoryCreateFailed {
                    category: category.to_string(),
                    path,
                    source,
                });
            }
        }
    }
    Ok(())
}

/// Renames `source` to `destination`, copying across filesystems if needed.
fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => {
            debug!(
                source = %source.display(),
                "Rename crossed devices, falling back to copy and remove"
            );
            copy_then_remove(source, destination)
        }
        Err(e) => Err(e),
    }
}

// EXDEV is 18 on Linux and macOS.
fn is_cross_device(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::CrossesDevices || error.raw_os_error() == Some(18)
}

/// Copies `source` to `destination` and removes `source`.
///
/// A symlink is recreated as a symlink with the same target instead of being
/// copied as the file it points to.
fn copy_then_remove(source: &Path, destination: &Path) -> io::Result<()> {
    let copied = if fs::symlink_metadata(source)?.file_type().is_symlink() {
        copy_link(source, destination)
    } else {
        fs::copy(source, destination).map(|_| ())
    };
    if let Err(e) = copied {
        let _ = fs::remove_file(destination);
        return Err(e);
    }
    if let Err(e) = fs::remove_file(source) {
        let _ = fs::remove_file(destination);
        return Err(e);
    }
    Ok(())
}

#[cfg(unix)]
fn copy_link(source: &Path, destination: &Path) -> io::Result<()> {
    let target = fs::read_link(source)?;
    std::os::unix::fs::symlink(target, destination)
}

#[cfg(not(unix))]
fn copy_link(source: &Path, destination: &Path) -> io::Result<()> {
    fs::copy(source, destination).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    fn names(plan: &Plan) -> Vec<&str> {
        let mut names: Vec<&str> = plan.files.iter().map(|f| f.entry.name.as_str()).collect();
        names.sort();
        names
    }

    #[test]
    fn test_plan_classifies_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        touch(temp_dir.path(), "a.txt", "a");
        touch(temp_dir.path(), "b.jpg", "b");
        touch(temp_dir.path(), "c", "c");

        let plan = FileOrganizer::default().plan(temp_dir.path()).unwrap();

        assert_eq!(names(&plan), vec!["a.txt", "b.jpg", "c"]);
        for planned in &plan.files {
            let expected = match planned.entry.name.as_str() {
                "a.txt" => "Documents",
                "b.jpg" => "Images",
                _ => OTHERS,
            };
            assert_eq!(planned.decision.category, expected);
        }
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn test_plan_skips_directories_and_hidden_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir(temp_dir.path().join("d")).unwrap();
        touch(temp_dir.path(), ".env", "SECRET=1");
        touch(temp_dir.path(), "keep.md", "#");

        let plan = FileOrganizer::default().plan(temp_dir.path()).unwrap();

        assert_eq!(names(&plan), vec!["keep.md"]);
        assert_eq!(plan.skipped.len(), 2);
        assert!(plan.skipped.contains(&SkippedEntry {
            name: "d".to_string(),
            reason: SkipReason::Directory,
        }));
        assert!(plan.skipped.contains(&SkippedEntry {
            name: ".env".to_string(),
            reason: SkipReason::Hidden,
        }));
    }

    #[test]
    fn test_plan_records_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        touch(temp_dir.path(), "Photo.PNG", "");

        let organizer = FileOrganizer::new(Arc::new(CategoryTable::standard()));
        assert_eq!(organizer.classifier().table().len(), 9);

        let plan = organizer.plan(temp_dir.path()).unwrap();
        assert_eq!(plan.files[0].entry.extension, ".png");
        assert!(plan.files[0].decision.has_extension);
    }

    #[test]
    fn test_plan_missing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("nope");

        let result = FileOrganizer::default().plan(&missing);
        assert!(matches!(
            result,
            Err(OrganizeError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_plan_on_file_is_not_a_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file = touch(temp_dir.path(), "file.txt", "x");

        let result = FileOrganizer::default().plan(&file);
        assert!(matches!(result, Err(OrganizeError::NotADirectory { .. })));
    }

    #[test]
    fn test_plan_categories_first_seen_order() {
        let plan = Plan {
            files: ["x.jpg", "y.txt", "z.png"]
                .iter()
                .map(|name| PlannedFile {
                    entry: FileEntry {
                        name: name.to_string(),
                        file_name: OsString::from(name),
                        path: PathBuf::from(name),
                        extension: extension_of(name),
                    },
                    decision: Classifier::default().classify(name),
                })
                .collect(),
            skipped: Vec::new(),
        };
        assert_eq!(plan.categories(), vec!["Images", "Documents"]);
    }

    #[test]
    fn test_resolve_destination_free_name() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dest = resolve_destination(temp_dir.path(), "report.txt");
        assert_eq!(dest, temp_dir.path().join("report.txt"));
    }

    #[test]
    fn test_resolve_destination_counts_up() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        touch(temp_dir.path(), "report.txt", "1");
        assert_eq!(
            resolve_destination(temp_dir.path(), "report.txt"),
            temp_dir.path().join("report_1.txt")
        );

        touch(temp_dir.path(), "report_1.txt", "2");
        assert_eq!(
            resolve_destination(temp_dir.path(), "report.txt"),
            temp_dir.path().join("report_2.txt")
        );
    }

    #[test]
    fn test_resolve_destination_without_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        touch(temp_dir.path(), "Makefile", "");
        assert_eq!(
            resolve_destination(temp_dir.path(), "Makefile"),
            temp_dir.path().join("Makefile_1")
        );
    }

    #[test]
    fn test_resolve_destination_keeps_inner_dots() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        touch(temp_dir.path(), "backup.tar.gz", "");
        assert_eq!(
            resolve_destination(temp_dir.path(), "backup.tar.gz"),
            temp_dir.path().join("backup.tar_1.gz")
        );
    }

    #[test]
    fn test_execute_moves_and_counts() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        touch(base, "a.txt", "a");
        touch(base, "b.jpg", "b");
        touch(base, "c", "c");
        fs::create_dir(base.join("d")).unwrap();

        let organizer = FileOrganizer::default();
        let plan = organizer.plan(base).unwrap();
        let summary = organizer.execute(base, &plan).unwrap();

        assert_eq!(summary.moved_files(), 3);
        assert_eq!(summary.skipped_files(), 1);
        assert_eq!(summary.failed_files(), 0);
        assert!(base.join("Documents/a.txt").is_file());
        assert!(base.join("Images/b.jpg").is_file());
        assert!(base.join("Others/c").is_file());
        assert!(base.join("d").is_dir());
    }

    #[test]
    fn test_execute_creates_others_even_when_unused() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        touch(temp_dir.path(), "a.txt", "a");

        let organizer = FileOrganizer::default();
        let plan = organizer.plan(temp_dir.path()).unwrap();
        organizer.execute(temp_dir.path(), &plan).unwrap();

        assert!(temp_dir.path().join(OTHERS).is_dir());
        assert!(!temp_dir.path().join("Images").exists());
    }

    #[test]
    fn test_execute_renames_on_collision() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        fs::create_dir(base.join("Documents")).unwrap();
        touch(&base.join("Documents"), "report.txt", "old");
        touch(base, "report.txt", "new");

        let organizer = FileOrganizer::default();
        let plan = organizer.plan(base).unwrap();
        let summary = organizer.execute(base, &plan).unwrap();

        assert_eq!(summary.moved[0].destination, base.join("Documents/report_1.txt"));
        assert_eq!(
            fs::read_to_string(base.join("Documents/report.txt")).unwrap(),
            "old"
        );
        assert_eq!(
            fs::read_to_string(base.join("Documents/report_1.txt")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_execute_continues_after_failed_move() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let vanished = touch(base, "gone.txt", "x");
        touch(base, "stays.png", "y");

        let organizer = FileOrganizer::default();
        let plan = organizer.plan(base).unwrap();
        fs::remove_file(&vanished).unwrap();

        let mut events = Vec::new();
        let summary = organizer
            .execute_with_progress(base, &plan, |event| {
                events.push(matches!(event, MoveEvent::Moved(_)));
            })
            .unwrap();

        assert_eq!(summary.moved_files(), 1);
        assert_eq!(summary.failed_files(), 1);
        assert_eq!(summary.failed[0].file, vanished);
        assert!(!summary.is_complete_success());
        assert_eq!(events.len(), 2);
        assert!(base.join("Images/stays.png").is_file());
    }

    #[test]
    fn test_execute_fails_when_category_name_is_a_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        touch(base, "a.txt", "a");

        let organizer = FileOrganizer::default();
        let plan = organizer.plan(base).unwrap();
        touch(base, "Documents", "in the way");

        let result = organizer.execute(base, &plan);
        match result {
            Err(OrganizeError::DirectoryCreateFailed { category, .. }) => {
                assert_eq!(category, "Documents");
            }
            other => panic!("expected DirectoryCreateFailed, got {other:?}"),
        }
        assert!(base.join("a.txt").is_file());
    }

    #[test]
    fn test_execute_missing_directory_is_fatal() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let missing = temp_dir.path().join("missing");

        let result = FileOrganizer::default().execute(&missing, &Plan::default());
        assert!(matches!(
            result,
            Err(OrganizeError::DirectoryNotFound { .. })
        ));
        assert!(!missing.exists());
    }

    #[test]
    fn test_copy_then_remove_moves_content() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = touch(temp_dir.path(), "src.bin", "payload");
        let destination = temp_dir.path().join("dst.bin");

        copy_then_remove(&source, &destination).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&destination).unwrap(), "payload");
    }

    #[test]
    fn test_copy_then_remove_missing_source_leaves_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("absent.bin");
        let destination = temp_dir.path().join("dst.bin");

        assert!(copy_then_remove(&source, &destination).is_err());
        assert!(!destination.exists());
    }

    #[test]
    fn test_split_os_extension_matches_str_split() {
        for name in ["archive.tar.gz", ".bashrc", "Makefile", "notes.", "..x.y"] {
            let (stem, ext) = split_os_extension(OsStr::new(name));
            let (expected_stem, expected_ext) = crate::file_category::split_extension(name);
            assert_eq!(stem, OsStr::new(expected_stem), "{name}");
            assert_eq!(ext, OsStr::new(expected_ext), "{name}");
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_is_organized() {
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base = temp_dir.path();
        let raw = OsStr::from_bytes(b"caf\xe9.txt");
        fs::write(base.join(raw), "menu").unwrap();

        let organizer = FileOrganizer::default();
        let plan = organizer.plan(base).unwrap();
        assert_eq!(plan.files.len(), 1);
        assert!(plan.skipped.is_empty());
        assert_eq!(plan.files[0].entry.file_name.as_os_str(), raw);
        assert_eq!(plan.files[0].decision.category, "Documents");

        let summary = organizer.execute(base, &plan).unwrap();
        assert_eq!(summary.moved_files(), 1);
        assert_eq!(summary.failed_files(), 0);
        assert_eq!(
            fs::read_to_string(base.join("Documents").join(raw)).unwrap(),
            "menu"
        );
        assert!(!base.join(raw).exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_destination_keeps_non_utf8_bytes() {
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let raw = OsStr::from_bytes(b"caf\xe9.txt");
        fs::write(temp_dir.path().join(raw), "old").unwrap();

        assert_eq!(
            resolve_destination(temp_dir.path(), raw),
            temp_dir.path().join(OsStr::from_bytes(b"caf\xe9_1.txt"))
        );
    }

    #[test]
    fn test_is_cross_device() {
        assert!(is_cross_device(&io::Error::from_raw_os_error(18)));
        assert!(is_cross_device(&io::Error::from(
            io::ErrorKind::CrossesDevices
        )));
        assert!(!is_cross_device(&io::Error::from(io::ErrorKind::NotFound)));
        assert!(!is_cross_device(&io::Error::from_raw_os_error(2)));
    }

    #[test]
    fn test_move_file_renames_within_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = touch(temp_dir.path(), "in.txt", "body");
        let destination = temp_dir.path().join("out.txt");

        move_file(&source, &destination).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&destination).unwrap(), "body");
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_then_remove_recreates_symlink() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let target = touch(temp_dir.path(), "target.txt", "data");
        let link = temp_dir.path().join("link.txt");
        std::os::unix::fs::symlink(&target, &link).unwrap();
        let destination = temp_dir.path().join("moved.txt");

        copy_then_remove(&link, &destination).unwrap();

        assert!(fs::symlink_metadata(&link).is_err());
        let metadata = fs::symlink_metadata(&destination).unwrap();
        assert!(metadata.file_type().is_symlink());
        assert_eq!(fs::read_link(&destination).unwrap(), target);
        assert!(target.is_file());
    }
}
