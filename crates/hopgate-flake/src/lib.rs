//! Time-ordered record identifiers.
//!
//! A [`Flake`] hands out [`RecordId`]s in UUIDv7 layout: a 48-bit Unix
//! millisecond timestamp, a 12-bit sub-millisecond counter and a 62-bit
//! random tail. Ids from one generator sort lexically in creation order.

mod clock;
pub mod error;
mod flake;
mod record_id;

pub use clock::{Clock, SystemClock};
pub use error::Error;
pub use flake::Flake;
pub use record_id::RecordId;
