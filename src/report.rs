//! Preview of an organization plan.
//!
//! Turns a [`Plan`] into a per-category view without touching the filesystem.

use crate::file_organizer::Plan;
use serde::Serialize;

/// Files that would go into one category directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    /// File names in plan order.
    pub files: Vec<String>,
}

/// What a preview shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "groups", rename_all = "snake_case")]
pub enum PreviewReport {
    /// The plan has no files to move.
    Empty,
    /// Groups in the order their category first appears in the plan.
    Grouped(Vec<CategoryGroup>),
}

impl PreviewReport {
    pub fn is_empty(&self) -> bool {
        matches!(self, PreviewReport::Empty)
    }

    /// The groups of the report, empty for [`PreviewReport::Empty`].
    pub fn groups(&self) -> &[CategoryGroup] {
        match self {
            PreviewReport::Empty => &[],
            PreviewReport::Grouped(groups) => groups,
        }
    }

    /// Total number of files across all groups.
    pub fn total_files(&self) -> usize {
        self.groups().iter().map(|group| group.files.len()).sum()
    }
}

/// Groups the plan by category.
///
/// # Examples
///
/// ```
/// use dirsort::file_organizer::Plan;
/// use dirsort::report::{report, PreviewReport};
///
/// assert_eq!(report(&Plan::default()), PreviewReport::Empty);
/// ```
pub fn report(plan: &Plan) -> PreviewReport {
    if plan.is_empty() {
        return PreviewReport::Empty;
    }

    let mut groups: Vec<CategoryGroup> = Vec::new();
    for planned in &plan.files {
        let category = &planned.decision.category;
        let name = planned.entry.name.clone();
        match groups.iter_mut().find(|group| &group.category == category) {
            Some(group) => group.files.push(name),
            None => groups.push(CategoryGroup {
                category: category.clone(),
                files: vec![name],
            }),
        }
    }
    PreviewReport::Grouped(groups)
}
