use indexmap::IndexMap;
use revdiff_core::{ChangeCategory, ChangeType, FileEntry, ProjectSnapshot};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// File-level delta between two snapshots.
///
/// `files_changed` and `change_types` are parallel: additions first (in the
/// new snapshot's order), then deletions (old snapshot's order), then
/// modifications (new snapshot's order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeInfo {
    pub files_changed: Vec<String>,
    pub change_types: Vec<ChangeType>,
    pub change_count: usize,
    pub change_hash: String,
    pub categories: Vec<ChangeCategory>,
}

impl ChangeInfo {
    pub(crate) fn between(old: &ProjectSnapshot, new: &ProjectSnapshot) -> Self {
        let old_files = index_by_path(&old.files);
        let new_files = index_by_path(&new.files);

        let mut entries: Vec<(String, ChangeType)> = Vec::new();
        entries.extend(
            new_files
                .keys()
                .filter(|path| !old_files.contains_key(*path))
                .map(|path| ((*path).to_string(), ChangeType::Added)),
        );
        entries.extend(
            old_files
                .keys()
                .filter(|path| !new_files.contains_key(*path))
                .map(|path| ((*path).to_string(), ChangeType::Deleted)),
        );
        entries.extend(new_files.iter().filter_map(|(path, entry)| {
            old_files
                .get(path)
                .filter(|previous| previous.differs_from(entry))
                .map(|_| ((*path).to_string(), ChangeType::Modified))
        }));

        let mut categories = Vec::new();
        for (_, change) in &entries {
            let category = ChangeCategory::for_change(*change);
            if !categories.contains(&category) {
                categories.push(category);
            }
        }

        let change_hash = change_hash(&entries);
        let (files_changed, change_types): (Vec<_>, Vec<_>) = entries.into_iter().unzip();

        Self {
            change_count: files_changed.len(),
            files_changed,
            change_types,
            change_hash,
            categories,
        }
    }

    /// Pairs each changed path with its change type.
    pub fn iter(&self) -> impl Iterator<Item = (&str, ChangeType)> {
        self.files_changed
            .iter()
            .map(String::as_str)
            .zip(self.change_types.iter().copied())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.change_count == 0
    }

    #[must_use]
    pub fn has_category(&self, category: ChangeCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Paths with the given change type, in report order.
    #[must_use]
    pub fn paths_with(&self, change: ChangeType) -> Vec<&str> {
        self.iter()
            .filter(|(_, c)| *c == change)
            .map(|(path, _)| path)
            .collect()
    }

    #[must_use]
    pub fn count_of(&self, change: ChangeType) -> usize {
        self.change_types.iter().filter(|c| **c == change).count()
    }
}

fn index_by_path(files: &[FileEntry]) -> IndexMap<&str, &FileEntry> {
    files.iter().map(|f| (f.path.as_str(), f)).collect()
}

/// SHA-256 over the `(path, type)` pairs sorted by path, so the digest does
/// not depend on the order files are listed in either snapshot.
fn change_hash(entries: &[(String, ChangeType)]) -> String {
    let mut sorted: Vec<_> = entries.iter().collect();
    sorted.sort();

    let mut hasher = Sha256::new();
    for (path, change) in sorted {
        hasher.update((path.len() as u64).to_le_bytes());
        hasher.update(path.as_bytes());
        hasher.update(change.as_str().as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn snapshot(label: &str, files: &[(&str, u64, u64)]) -> ProjectSnapshot {
        files
            .iter()
            .fold(ProjectSnapshot::new("app", label), |s, (path, size, lines)| {
                s.with_file(FileEntry::new(*path, *size, *lines))
            })
    }

    #[test]
    fn partitions_files_in_report_order() {
        let old = snapshot("1", &[("a.x", 100, 10), ("b.x", 50, 5), ("d.x", 1, 1)]);
        let new = snapshot("2", &[("e.x", 9, 9), ("a.x", 120, 12), ("c.x", 30, 3), ("d.x", 1, 1)]);

        let info = ChangeInfo::between(&old, &new);

        assert_eq!(info.files_changed, vec!["e.x", "c.x", "b.x", "a.x"]);
        assert_eq!(
            info.change_types,
            vec![
                ChangeType::Added,
                ChangeType::Added,
                ChangeType::Deleted,
                ChangeType::Modified
            ]
        );
        assert_eq!(info.change_count, 4);
        assert_eq!(
            info.categories,
            vec![
                ChangeCategory::Feature,
                ChangeCategory::Breaking,
                ChangeCategory::Bugfix
            ]
        );
    }

    #[test]
    fn modification_time_alone_counts_as_modified() {
        let old = snapshot("1", &[("a.x", 1, 1)]);
        let mut new = old.clone();
        new.files[0] = FileEntry::new("a.x", 1, 1)
            .modified_at(DateTime::from_timestamp(60, 0).expect("valid timestamp"));

        let info = ChangeInfo::between(&old, &new);

        assert_eq!(info.paths_with(ChangeType::Modified), vec!["a.x"]);
    }

    #[test]
    fn identical_snapshots_have_no_changes() {
        let old = snapshot("1", &[("a.x", 100, 10), ("b.x", 50, 5)]);

        let info = ChangeInfo::between(&old, &old);

        assert!(info.is_empty());
        assert!(info.categories.is_empty());
    }

    #[test]
    fn hash_is_repeatable() {
        let old = snapshot("1", &[("a.x", 100, 10)]);
        let new = snapshot("2", &[("a.x", 120, 12), ("c.x", 30, 3)]);

        assert_eq!(
            ChangeInfo::between(&old, &new).change_hash,
            ChangeInfo::between(&old, &new).change_hash
        );
    }

    #[test]
    fn hash_ignores_file_list_order() {
        let old = snapshot("1", &[("a.x", 100, 10), ("b.x", 50, 5)]);
        let new = snapshot("2", &[("c.x", 30, 3), ("d.x", 30, 3)]);
        let new_reordered = snapshot("2", &[("d.x", 30, 3), ("c.x", 30, 3)]);

        let first = ChangeInfo::between(&old, &new);
        let second = ChangeInfo::between(&old, &new_reordered);

        assert_ne!(first.files_changed, second.files_changed);
        assert_eq!(first.change_hash, second.change_hash);
    }

    #[test]
    fn hash_distinguishes_change_types() {
        let base = snapshot("1", &[("a.x", 1, 1)]);
        let empty = snapshot("2", &[]);

        let added = ChangeInfo::between(&empty, &base);
        let deleted = ChangeInfo::between(&base, &empty);

        assert_ne!(added.change_hash, deleted.change_hash);
        assert_eq!(added.change_hash.len(), 64);
    }
}
