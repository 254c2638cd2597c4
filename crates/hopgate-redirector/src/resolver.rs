use crate::destination::Destination;
use crate::error::DestinationError;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use hopgate_core::{KvStore, Slug};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Standard alphabet with optional padding and discarded trailing bits,
/// matching what `atob` accepts.
const MAPPING_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Why a stored mapping value could not be turned into a destination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeFailure {
    #[error("mapping value is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("decoded mapping value is not utf-8")]
    Utf8,
    #[error("decoded mapping value is not a usable destination: {0}")]
    Destination(#[from] DestinationError),
}

/// Outcome of resolving one slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The slug maps to a decodable destination.
    Hit(Destination),
    /// Nothing is stored for the slug, or the store could not be read.
    Miss,
    /// Something is stored, but it does not decode to a destination.
    DecodeError(DecodeFailure),
}

/// Resolves slugs against the mapping store.
///
/// Performs exactly one read per call and never retries.
#[derive(Debug, Clone)]
pub struct Resolver<S> {
    store: Arc<S>,
}

impl<S: KvStore> Resolver<S> {
    /// Creates a new Resolver reading from the given store.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Resolves a slug to its destination.
    ///
    /// A store error is reported as [`Resolution::Miss`] so the redirect path
    /// stays available while the store is degraded.
    pub async fn resolve(&self, slug: &Slug) -> Resolution {
        trace!(slug = %slug, "resolving slug");

        let encoded = match self.store.get(slug.as_str()).await {
            Ok(Some(encoded)) if !encoded.is_empty() => encoded,
            Ok(_) => {
                trace!(slug = %slug, "slug not found");
                return Resolution::Miss;
            }
            Err(e) => {
                warn!(slug = %slug, error = %e, "store read failed, treating as miss");
                return Resolution::Miss;
            }
        };

        match decode_destination(&encoded) {
            Ok(destination) => {
                debug!(slug = %slug, destination = %destination, "resolved slug");
                Resolution::Hit(destination)
            }
            Err(e) => {
                debug!(slug = %slug, error = %e, "stored mapping does not decode");
                Resolution::DecodeError(e)
            }
        }
    }
}

/// Decodes a stored mapping value into a destination.
///
/// ASCII whitespace is ignored, padding is optional and trailing bits of
/// the last symbol are discarded.
pub fn decode_destination(encoded: &str) -> Result<Destination, DecodeFailure> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = MAPPING_ENGINE.decode(compact)?;
    let text = String::from_utf8(bytes).map_err(|_| DecodeFailure::Utf8)?;
    Ok(Destination::parse(text)?)
}
