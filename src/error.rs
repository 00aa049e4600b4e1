// File: src/error.rs

/// Everything that can go wrong between loading the catalogs and answering a request.
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    /// A word or concept has no entry in the value catalog.
    #[error("no vocabulary entry for '{0}'")]
    LookupMiss(String),

    /// A source record is missing a field, or repeats a knowledge base key.
    #[error("malformed source: {0}")]
    MalformedSource(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("snapshot: {0}")]
    Snapshot(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, RecommendError>;
