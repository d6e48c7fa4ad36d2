use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot '{path}'")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: revdiff_core::CoreError,
    },

    #[error("failed to parse config '{path}'")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("'{version}' is not a valid {strategy} version")]
    InvalidVersion {
        version: String,
        strategy: &'static str,
    },

    #[error("the {strategy} strategy needs a current version to derive the next one")]
    MissingVersion { strategy: &'static str },

    #[error("failed to encode output")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Version(#[from] revdiff_version::VersionError),

    #[error(transparent)]
    Compare(#[from] revdiff_compare::CompareError),
}

pub type Result<T> = std::result::Result<T, CliError>;
