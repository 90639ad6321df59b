//! dirsort - sort the files of a directory into category subdirectories
//!
//! This library classifies files by extension against an ordered category
//! table, plans where each immediate child of a directory should go, previews
//! that plan, and moves the files with collision-safe renaming.

pub mod cli;
pub mod file_category;
pub mod file_organizer;
pub mod output;
pub mod report;

pub use file_category::{CategoryTable, Classifier, PlacementDecision, TableError};
pub use file_organizer::{FileOrganizer, OrganizeError, Plan, RunSummary};
pub use report::{PreviewReport, report};

pub use cli::{OrganizeCommand, run_cli};
