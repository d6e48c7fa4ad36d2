use std::path::{Component, Path, PathBuf};

use indexmap::IndexMap;
use revdiff_diff::ContentProvider;

/// Reads file bodies from checked-out trees, one root directory per
/// snapshot version label.
#[derive(Debug, Default)]
pub(crate) struct DirectoryContent {
    roots: IndexMap<String, PathBuf>,
}

impl DirectoryContent {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Maps `label` to `root`. The first root registered for a label wins.
    pub(crate) fn with_root(mut self, label: &str, root: Option<&Path>) -> Self {
        if let Some(root) = root {
            if self.roots.contains_key(label) {
                tracing::warn!(
                    label,
                    root = %root.display(),
                    "both snapshots share a version label; ignoring the second root"
                );
            } else {
                self.roots.insert(label.to_string(), root.to_path_buf());
            }
        }
        self
    }
}

impl ContentProvider for DirectoryContent {
    fn content(&self, path: &str, snapshot_id: &str) -> Option<String> {
        let root = self.roots.get(snapshot_id)?;
        if !stays_inside_root(Path::new(path)) {
            tracing::warn!(path, "refusing to read a file body outside the content root");
            return None;
        }
        let file = root.join(path);
        match std::fs::read_to_string(&file) {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::debug!(file = %file.display(), error = %err, "cannot read file body");
                None
            }
        }
    }
}

/// Relative paths made of plain components only; no `..`, root or prefix.
fn stays_inside_root(path: &Path) -> bool {
    path.components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_from_the_root_of_the_matching_label() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(dir.path().join("old/src")).expect("create old tree");
        std::fs::write(dir.path().join("old/src/a.x"), "one\n").expect("write file");

        let old_root = dir.path().join("old");
        let provider = DirectoryContent::new()
            .with_root("1.0.0", Some(&old_root))
            .with_root("1.1.0", None);

        assert_eq!(provider.content("src/a.x", "1.0.0").as_deref(), Some("one\n"));
        assert_eq!(provider.content("src/a.x", "1.1.0"), None);
        assert_eq!(provider.content("src/missing.x", "1.0.0"), None);
    }

    #[test]
    fn first_root_wins_for_shared_labels() {
        let provider = DirectoryContent::new()
            .with_root("dev", Some(Path::new("/first")))
            .with_root("dev", Some(Path::new("/second")));

        assert_eq!(provider.roots.get("dev"), Some(&PathBuf::from("/first")));
    }

    #[test]
    fn paths_escaping_the_root_are_not_read() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(dir.path().join("old")).expect("create old tree");
        let secret = dir.path().join("secret.x");
        std::fs::write(&secret, "hidden\n").expect("write file");

        let old_root = dir.path().join("old");
        let provider = DirectoryContent::new().with_root("1.0.0", Some(&old_root));

        assert_eq!(provider.content("../secret.x", "1.0.0"), None);
        assert_eq!(provider.content("src/../../secret.x", "1.0.0"), None);
        let absolute = secret.to_str().expect("utf-8 temp path");
        assert_eq!(provider.content(absolute, "1.0.0"), None);
    }

    #[test]
    fn only_plain_relative_paths_stay_inside_the_root() {
        assert!(stays_inside_root(Path::new("src/a.x")));
        assert!(stays_inside_root(Path::new("./src/a.x")));
        assert!(!stays_inside_root(Path::new("../a.x")));
        assert!(!stays_inside_root(Path::new("/etc/passwd")));
    }
}
