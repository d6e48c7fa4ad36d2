use chrono::{DateTime, Utc};
use revdiff_core::ChangeType;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineKind {
    Added,
    Removed,
    Unchanged,
}

/// One line inside a hunk. `line_number` is 1-based in the new text for
/// added lines and in the old text otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChange {
    pub kind: LineKind,
    pub text: String,
    pub line_number: usize,
}

impl LineChange {
    pub(crate) fn new(kind: LineKind, text: &str, line_number: usize) -> Self {
        Self {
            kind,
            text: text.to_string(),
            line_number,
        }
    }
}

/// A contiguous block of changes with its surrounding context. Starts are
/// 1-based; an empty side starts at the line it follows, as in unified diffs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunk {
    pub old_start: usize,
    pub old_lines: usize,
    pub new_start: usize,
    pub new_lines: usize,
    pub changes: Vec<LineChange>,
}

impl Hunk {
    /// Builds a hunk from its changes, where `old_index` and `new_index` are
    /// the 0-based positions of its first line on each side.
    pub(crate) fn from_changes(
        old_index: usize,
        new_index: usize,
        changes: Vec<LineChange>,
    ) -> Self {
        let old_lines = changes.iter().filter(|c| c.kind != LineKind::Added).count();
        let new_lines = changes.iter().filter(|c| c.kind != LineKind::Removed).count();
        Self {
            old_start: range_start(old_index, old_lines),
            old_lines,
            new_start: range_start(new_index, new_lines),
            new_lines,
            changes,
        }
    }

    #[must_use]
    pub fn count(&self, kind: LineKind) -> usize {
        self.changes.iter().filter(|c| c.kind == kind).count()
    }
}

fn range_start(index: usize, lines: usize) -> usize {
    if lines == 0 { index } else { index + 1 }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiff {
    pub path: String,
    pub change_type: ChangeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_text: Option<String>,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub hunks: Vec<Hunk>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffSummary {
    pub total_files: usize,
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
    pub lines_added: u64,
    pub lines_removed: u64,
}

impl DiffSummary {
    pub(crate) fn of(files: &[FileDiff]) -> Self {
        let count = |change: ChangeType| files.iter().filter(|f| f.change_type == change).count();
        Self {
            total_files: files.len(),
            added: count(ChangeType::Added),
            modified: count(ChangeType::Modified),
            deleted: count(ChangeType::Deleted),
            lines_added: files.iter().map(|f| f.lines_added).sum(),
            lines_removed: files.iter().map(|f| f.lines_removed).sum(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffMetadata {
    pub generated_at: DateTime<Utc>,
    pub version_a: String,
    pub version_b: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffReport {
    pub summary: DiffSummary,
    pub files: Vec<FileDiff>,
    pub metadata: DiffMetadata,
}

impl DiffReport {
    #[must_use]
    pub fn file(&self, path: &str) -> Option<&FileDiff> {
        self.files.iter().find(|f| f.path == path)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hunk_ranges_count_each_side() {
        let hunk = Hunk::from_changes(
            4,
            4,
            vec![
                LineChange::new(LineKind::Unchanged, "a", 5),
                LineChange::new(LineKind::Removed, "b", 6),
                LineChange::new(LineKind::Added, "c", 6),
                LineChange::new(LineKind::Added, "d", 7),
            ],
        );

        assert_eq!((hunk.old_start, hunk.old_lines), (5, 2));
        assert_eq!((hunk.new_start, hunk.new_lines), (5, 3));
        assert_eq!(hunk.count(LineKind::Added), 2);
    }

    #[test]
    fn empty_side_starts_at_preceding_line() {
        let hunk = Hunk::from_changes(0, 0, vec![LineChange::new(LineKind::Added, "x", 1)]);

        assert_eq!((hunk.old_start, hunk.old_lines), (0, 0));
        assert_eq!((hunk.new_start, hunk.new_lines), (1, 1));
    }

    #[test]
    fn serializes_camel_case() {
        let change = LineChange::new(LineKind::Removed, "x", 3);

        let json = serde_json::to_value(&change).expect("serializes");

        assert_eq!(json["lineNumber"], 3);
        assert_eq!(json["kind"], "Removed");
    }
}
