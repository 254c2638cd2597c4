//! Best-effort audit trail for redirect requests.
//!
//! Every request produces one [`AuditRecord`]: a redacted snapshot of the
//! request and the response that was sent. The [`AuditRecorder`] serializes
//! the record, compresses it with zstd, base64-encodes the result and hands
//! it to an [`AuditSink`] under a time-ordered key such as
//! `abc123:entries:01890a5d-ac96-774b-bcce-b302099a8057`.
//!
//! Nothing in this crate is allowed to affect the response: the recorder
//! returns a [`Result`](std::result::Result) and
//! [`AuditRecorder::record_or_log`] turns any error into a log line.

pub mod codec;
pub mod error;
pub mod key;
pub mod record;
pub mod recorder;
pub mod sanitizer;
pub mod sink;

pub use error::{AuditError, Result};
pub use key::{AuditKey, KeySchema};
pub use record::{AuditRecord, ClientInfo, RequestSnapshot, ResponseSnapshot};
pub use recorder::{AuditInput, AuditRecorder};
pub use sink::{AuditSink, CollectorCredentials, CollectorSink, StoreSink};
