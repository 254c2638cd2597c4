use crate::config::RedirectConfig;
use crate::destination::Destination;
use crate::error::{RedirectorError, Result};
use http::header::{CONTENT_TYPE, LOCATION};
use http::{HeaderValue, Response, StatusCode};

/// Body of the `500` sent when there is nowhere to fall back to.
pub const MISSING_FALLBACK_MESSAGE: &str = "Fallback URL is not configured";

/// Decides the response for requests that cannot be resolved.
#[derive(Debug, Clone, Default)]
pub struct FallbackPolicy {
    destination: Option<Destination>,
}

impl FallbackPolicy {
    /// Validates the fallback url once, at startup.
    pub fn new(fallback_url: Option<&str>) -> Result<Self> {
        let destination = fallback_url
            .map(Destination::parse)
            .transpose()
            .map_err(RedirectorError::InvalidFallbackUrl)?;
        Ok(Self { destination })
    }

    pub fn from_config(config: &RedirectConfig) -> Result<Self> {
        Self::new(config.fallback_url.as_deref())
    }

    pub fn destination(&self) -> Option<&Destination> {
        self.destination.as_ref()
    }

    /// A `302` to the fallback url, or a `500` with a fixed body.
    pub fn respond(&self) -> Response<String> {
        match &self.destination {
            Some(destination) => redirect(destination),
            None => {
                let mut response = Response::new(MISSING_FALLBACK_MESSAGE.to_string());
                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                response.headers_mut().insert(
                    CONTENT_TYPE,
                    HeaderValue::from_static("text/plain; charset=utf-8"),
                );
                response
            }
        }
    }
}

/// A `302 Found` pointing at `destination`, with an empty body.
pub fn redirect(destination: &Destination) -> Response<String> {
    let mut response = Response::new(String::new());
    *response.status_mut() = StatusCode::FOUND;
    response
        .headers_mut()
        .insert(LOCATION, destination.header_value().clone());
    response
}
