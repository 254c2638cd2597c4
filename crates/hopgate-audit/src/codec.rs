//! Wire form of an audit record: compact JSON, zstd-compressed, base64 text.

use crate::error::{AuditError, Result};
use crate::record::AuditRecord;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::io::{Read, Write};

const COMPRESSION_LEVEL: i32 = 3;

/// Encodes a record into the text stored under its audit key.
pub fn encode_record(record: &AuditRecord) -> Result<String> {
    let json = serde_json::to_vec(record)?;

    let mut encoder = zstd::stream::write::Encoder::new(
        Vec::with_capacity(json.len() / 2),
        COMPRESSION_LEVEL,
    )
    .map_err(AuditError::Compression)?;
    encoder.write_all(&json).map_err(AuditError::Compression)?;
    let compressed = encoder.finish().map_err(AuditError::Compression)?;

    Ok(STANDARD.encode(compressed))
}

/// Reverses [`encode_record`].
pub fn decode_record(encoded: &str) -> Result<AuditRecord> {
    let compressed = STANDARD.decode(encoded)?;

    let mut decoder =
        zstd::stream::read::Decoder::new(compressed.as_slice()).map_err(AuditError::Compression)?;
    let mut json = Vec::new();
    decoder
        .read_to_end(&mut json)
        .map_err(AuditError::Compression)?;

    Ok(serde_json::from_slice(&json)?)
}
