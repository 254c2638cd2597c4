use thiserror::Error;

pub type Result<T> = std::result::Result<T, RedirectorError>;

#[derive(Debug, Clone, Error)]
pub enum RedirectorError {
    #[error("fallback url is invalid: {0}")]
    InvalidFallbackUrl(#[source] DestinationError),
}

/// Why a string cannot be used as a redirect target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DestinationError {
    #[error("not an absolute url: {0}")]
    NotAbsolute(#[from] url::ParseError),
    #[error("not representable as a Location header value")]
    InvalidHeaderValue,
}
