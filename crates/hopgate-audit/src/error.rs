use hopgate_core::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AuditError>;

/// Any failure while building or persisting an audit record.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("failed to serialize audit record: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("failed to compress audit record: {0}")]
    Compression(#[source] std::io::Error),
    #[error("audit payload is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("failed to generate record id: {0}")]
    RecordId(#[from] hopgate_flake::Error),
    #[error("failed to write audit record: {0}")]
    Write(#[from] StorageError),
    #[error("audit collector request failed: {0}")]
    Collector(String),
}
