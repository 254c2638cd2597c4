use jiff::Timestamp;
use thiserror::Error;

/// Errors returned by record id generation and parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("clock reads {now}, which is before the Unix epoch")]
    ClockBeforeEpoch { now: Timestamp },
    #[error("overtime limit")]
    OverTimeLimit,
    #[error("generator state lock is poisoned")]
    StatePoisoned,
    #[error("malformed record id: {0}")]
    Malformed(String),
}
