use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("snapshot has an empty name")]
    EmptySnapshotName,

    #[error("snapshot '{snapshot}' lists file '{path}' more than once")]
    DuplicatePath { snapshot: String, path: String },

    #[error("snapshot '{snapshot}' exports symbol '{name}' more than once")]
    DuplicateSymbol { snapshot: String, name: String },

    #[error("failed to decode snapshot JSON")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_path_error_includes_snapshot_and_path() {
        let err = CoreError::DuplicatePath {
            snapshot: "app".to_string(),
            path: "src/a.ts".to_string(),
        };

        let msg = err.to_string();

        assert!(msg.contains("app"));
        assert!(msg.contains("src/a.ts"));
    }

    #[test]
    fn decode_error_has_source_chain() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        let err: CoreError = json_err.into();

        assert!(std::error::Error::source(&err).is_some());
    }
}
