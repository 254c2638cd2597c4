use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub(crate) const MAX_TIMESTAMP_MS: u64 = (1_u64 << 48) - 1;
pub(crate) const MAX_COUNTER: u16 = 0x0FFF;
const TAIL_MASK: u64 = (1_u64 << 62) - 1;

const VERSION: u128 = 0x7;
const VARIANT: u128 = 0b10;

/// A 128-bit time-ordered record identifier in UUIDv7 layout.
///
/// | bits    | field                          |
/// |---------|--------------------------------|
/// | 127..80 | Unix timestamp, milliseconds   |
/// | 79..76  | version (`7`)                  |
/// | 75..64  | sub-millisecond counter        |
/// | 63..62  | variant (`0b10`)               |
/// | 61..0   | random tail                    |
///
/// The textual form is the 36-character lowercase hyphenated hex string, so
/// comparing two ids as strings agrees with comparing them as numbers.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RecordId(Uuid);

impl RecordId {
    pub(crate) fn from_parts(unix_ms: u64, counter: u16, tail: u64) -> Self {
        let value = (u128::from(unix_ms & MAX_TIMESTAMP_MS) << 80)
            | (VERSION << 76)
            | (u128::from(counter & MAX_COUNTER) << 64)
            | (VARIANT << 62)
            | u128::from(tail & TAIL_MASK);
        Self(Uuid::from_u128(value))
    }

    /// Milliseconds since the Unix epoch at which the id was minted.
    pub fn unix_millis(&self) -> u64 {
        (self.0.as_u128() >> 80) as u64
    }

    /// The sub-millisecond counter.
    pub fn counter(&self) -> u16 {
        ((self.0.as_u128() >> 64) as u16) & MAX_COUNTER
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordId")
            .field("unix_millis", &self.unix_millis())
            .field("counter", &self.counter())
            .field("uuid", &self.0)
            .finish()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for RecordId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::try_parse(s).map_err(|e| Error::Malformed(e.to_string()))?;
        if uuid.get_version_num() != VERSION as usize {
            return Err(Error::Malformed(format!(
                "expected a version 7 id, got version {}",
                uuid.get_version_num()
            )));
        }
        Ok(Self(uuid))
    }
}

impl TryFrom<String> for RecordId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.to_string()
    }
}
