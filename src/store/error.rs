use std::path::PathBuf;

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("could not open database at {path}: {source}")]
    Unavailable {
        path: PathBuf,
        source: rusqlite::Error,
    },
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

impl StoreError {
    pub(crate) fn empty_content() -> Self {
        StoreError::Validation("content must not be empty".to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
