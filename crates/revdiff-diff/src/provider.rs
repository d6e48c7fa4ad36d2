use indexmap::IndexMap;

/// Supplies file bodies for hunking. `snapshot_id` is the snapshot's version
/// label. Returning `None` makes the file diff fall back to metadata counts.
pub trait ContentProvider {
    fn content(&self, path: &str, snapshot_id: &str) -> Option<String>;
}

impl<F> ContentProvider for F
where
    F: Fn(&str, &str) -> Option<String>,
{
    fn content(&self, path: &str, snapshot_id: &str) -> Option<String> {
        self(path, snapshot_id)
    }
}

/// Provider with no bodies at all; every modified file is metadata-only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl ContentProvider for NoContent {
    fn content(&self, _path: &str, _snapshot_id: &str) -> Option<String> {
        None
    }
}

/// File bodies held in memory, keyed by snapshot id then path.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContent {
    files: IndexMap<String, IndexMap<String, String>>,
}

impl InMemoryContent {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(
        mut self,
        snapshot_id: impl Into<String>,
        path: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.insert(snapshot_id, path, text);
        self
    }

    pub fn insert(
        &mut self,
        snapshot_id: impl Into<String>,
        path: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.files
            .entry(snapshot_id.into())
            .or_default()
            .insert(path.into(), text.into());
    }
}

impl ContentProvider for InMemoryContent {
    fn content(&self, path: &str, snapshot_id: &str) -> Option<String> {
        self.files.get(snapshot_id)?.get(path).cloned()
    }
}
