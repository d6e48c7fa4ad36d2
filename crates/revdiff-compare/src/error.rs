use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompareError {
    #[error("cannot compare: the {side} snapshot is invalid")]
    InvalidVersions {
        side: &'static str,
        #[source]
        source: revdiff_core::CoreError,
    },

    #[error("unsupported report format '{0}' (expected json, markdown or html)")]
    InvalidFormat(String),

    #[error("failed to serialize comparison result")]
    Serialization(#[from] serde_json::Error),
}
