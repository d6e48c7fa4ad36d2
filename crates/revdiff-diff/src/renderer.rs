use chrono::Utc;
use indexmap::IndexMap;
use revdiff_core::{ChangeType, FileEntry, ProjectSnapshot};

use crate::hunk::hunks;
use crate::{
    ContentProvider, DiffMetadata, DiffOptions, DiffReport, DiffSummary, FileDiff, LineKind,
};

/// Produces [`DiffReport`]s, asking `provider` for the bodies of modified files.
pub struct DiffRenderer<'p> {
    provider: &'p dyn ContentProvider,
}

impl<'p> DiffRenderer<'p> {
    #[must_use]
    pub fn new(provider: &'p dyn ContentProvider) -> Self {
        Self { provider }
    }

    /// Diffs every file that was added, deleted or modified between `a` and
    /// `b`. Added and deleted files carry metadata line counts only; modified
    /// files are hunked when both bodies are available.
    #[must_use]
    pub fn generate_diff(
        &self,
        a: &ProjectSnapshot,
        b: &ProjectSnapshot,
        options: &DiffOptions,
    ) -> DiffReport {
        let old_files: IndexMap<&str, &FileEntry> =
            a.files.iter().map(|f| (f.path.as_str(), f)).collect();
        let new_files: IndexMap<&str, &FileEntry> =
            b.files.iter().map(|f| (f.path.as_str(), f)).collect();

        let mut files = Vec::new();
        for (path, entry) in &new_files {
            if !old_files.contains_key(path) {
                files.push(metadata_only(path, ChangeType::Added, entry.line_count, 0));
            }
        }
        for (path, entry) in &old_files {
            if !new_files.contains_key(path) {
                files.push(metadata_only(path, ChangeType::Deleted, 0, entry.line_count));
            }
        }
        for (path, entry) in &new_files {
            if let Some(previous) = old_files.get(path).filter(|p| p.differs_from(entry)) {
                files.push(self.modified(path, previous, entry, a, b, options));
            }
        }

        let summary = DiffSummary::of(&files);
        tracing::debug!(
            from = %a.version_label,
            to = %b.version_label,
            files = summary.total_files,
            added = summary.lines_added,
            removed = summary.lines_removed,
            "generated diff"
        );

        DiffReport {
            summary,
            files,
            metadata: DiffMetadata {
                generated_at: options.generated_at.unwrap_or_else(Utc::now),
                version_a: a.version_label.clone(),
                version_b: b.version_label.clone(),
            },
        }
    }

    fn modified(
        &self,
        path: &str,
        previous: &FileEntry,
        current: &FileEntry,
        a: &ProjectSnapshot,
        b: &ProjectSnapshot,
        options: &DiffOptions,
    ) -> FileDiff {
        let old_text = self.lookup(path, &a.version_label);
        let new_text = self.lookup(path, &b.version_label);

        let (Some(old_text), Some(new_text)) = (old_text, new_text) else {
            return metadata_only(
                path,
                ChangeType::Modified,
                current.line_count.saturating_sub(previous.line_count),
                previous.line_count.saturating_sub(current.line_count),
            );
        };

        let hunks = hunks(&old_text, &new_text, options);
        let lines_added = hunks.iter().map(|h| h.count(LineKind::Added)).sum::<usize>();
        let lines_removed = hunks.iter().map(|h| h.count(LineKind::Removed)).sum::<usize>();
        tracing::debug!(path, hunks = hunks.len(), "hunked modified file");

        FileDiff {
            path: path.to_string(),
            change_type: ChangeType::Modified,
            old_text: Some(old_text),
            new_text: Some(new_text),
            lines_added: lines_added as u64,
            lines_removed: lines_removed as u64,
            hunks,
        }
    }

    fn lookup(&self, path: &str, snapshot_id: &str) -> Option<String> {
        let text = self.provider.content(path, snapshot_id);
        if text.is_none() {
            tracing::warn!(
                path,
                snapshot = snapshot_id,
                "no content available, using metadata line counts"
            );
        }
        text
    }
}

fn metadata_only(path: &str, change_type: ChangeType, added: u64, removed: u64) -> FileDiff {
    FileDiff {
        path: path.to_string(),
        change_type,
        old_text: None,
        new_text: None,
        lines_added: added,
        lines_removed: removed,
        hunks: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{HunkAlgorithm, InMemoryContent, NoContent};
    use chrono::DateTime;

    fn snapshots() -> (ProjectSnapshot, ProjectSnapshot) {
        let a = ProjectSnapshot::new("app", "1.0.0")
            .with_file(FileEntry::new("a.x", 100, 10))
            .with_file(FileEntry::new("b.x", 50, 5));
        let b = ProjectSnapshot::new("app", "1.1.0")
            .with_file(FileEntry::new("a.x", 120, 12))
            .with_file(FileEntry::new("c.x", 30, 3));
        (a, b)
    }

    fn fixed_options() -> DiffOptions {
        DiffOptions::default().generated_at(DateTime::from_timestamp(0, 0).expect("valid"))
    }

    #[test]
    fn identical_snapshots_produce_empty_report() {
        let (a, _) = snapshots();

        let report = DiffRenderer::new(&NoContent).generate_diff(&a, &a, &fixed_options());

        assert_eq!(report.summary.total_files, 0);
        assert!(report.is_empty());
    }

    #[test]
    fn metadata_counts_without_content() {
        let (a, b) = snapshots();

        let report = DiffRenderer::new(&NoContent).generate_diff(&a, &b, &fixed_options());

        let paths: Vec<_> = report.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["c.x", "b.x", "a.x"]);
        assert_eq!(report.summary.added, 1);
        assert_eq!(report.summary.deleted, 1);
        assert_eq!(report.summary.modified, 1);
        assert_eq!(report.summary.lines_added, 3 + 2);
        assert_eq!(report.summary.lines_removed, 5);
        assert!(report.file("a.x").expect("present").hunks.is_empty());
        assert_eq!(report.metadata.version_a, "1.0.0");
        assert_eq!(report.metadata.version_b, "1.1.0");
    }

    #[test]
    fn modified_files_are_hunked_from_content() {
        let (a, b) = snapshots();
        let provider = InMemoryContent::new()
            .with_file("1.0.0", "a.x", "one\ntwo\nthree\n")
            .with_file("1.1.0", "a.x", "one\nTWO\nthree\nfour\n");

        let report = DiffRenderer::new(&provider).generate_diff(&a, &b, &fixed_options());
        let file = report.file("a.x").expect("present");

        assert_eq!(file.hunks.len(), 2);
        assert_eq!(file.lines_added, 2);
        assert_eq!(file.lines_removed, 1);
        assert_eq!(file.old_text.as_deref(), Some("one\ntwo\nthree\n"));
    }

    #[test]
    fn lcs_algorithm_is_selectable() {
        let (a, b) = snapshots();
        let provider = InMemoryContent::new()
            .with_file("1.0.0", "a.x", "a\nb\nc\n")
            .with_file("1.1.0", "a.x", "a\nx\nb\nc\n");

        let options = fixed_options().with_algorithm(HunkAlgorithm::Lcs);
        let report = DiffRenderer::new(&provider).generate_diff(&a, &b, &options);
        let file = report.file("a.x").expect("present");

        assert_eq!(file.lines_added, 1);
        assert_eq!(file.lines_removed, 0);
    }

    #[test]
    fn provider_is_asked_once_per_side_of_modified_files() {
        let (a, b) = snapshots();
        let calls = RefCell::new(Vec::new());
        let provider = |path: &str, id: &str| {
            calls.borrow_mut().push(format!("{id}:{path}"));
            Some(String::new())
        };

        let _ = DiffRenderer::new(&provider).generate_diff(&a, &b, &fixed_options());

        assert_eq!(calls.into_inner(), vec!["1.0.0:a.x", "1.1.0:a.x"]);
    }
}
