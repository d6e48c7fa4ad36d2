use std::path::Path;

use revdiff_core::ProjectSnapshot;

use crate::error::{CliError, Result};

/// Reads and validates a snapshot JSON file.
pub(crate) fn load(path: &Path) -> Result<ProjectSnapshot> {
    let json = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = ProjectSnapshot::from_json(&json).map_err(|source| CliError::Snapshot {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        path = %path.display(),
        name = %snapshot.name,
        version = %snapshot.version_label,
        files = snapshot.files.len(),
        "loaded snapshot"
    );
    Ok(snapshot)
}
