use thiserror::Error;

/// Result type for key-value store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SlugError {
    #[error("slug is empty")]
    Empty,
    #[error("slug length must be at most {max}, got {len}")]
    TooLong { len: usize, max: usize },
    #[error("slug contains invalid character {ch:?} at byte {position}")]
    InvalidCharacter { ch: char, position: usize },
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage rejected the write: {0}")]
    Rejected(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}
