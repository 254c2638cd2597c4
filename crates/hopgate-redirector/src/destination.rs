use crate::error::DestinationError;
use http::HeaderValue;
use std::fmt::Display;
use url::Url;

/// A redirect target: an absolute URL that fits in a `Location` header.
///
/// The original text is kept verbatim; parsing only checks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    url: String,
    header: HeaderValue,
}

impl Destination {
    pub fn parse(raw: impl Into<String>) -> Result<Self, DestinationError> {
        let url = raw.into();
        Url::parse(&url)?;
        let header =
            HeaderValue::from_str(&url).map_err(|_| DestinationError::InvalidHeaderValue)?;
        Ok(Self { url, header })
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn header_value(&self) -> &HeaderValue {
        &self.header
    }
}

impl Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}
