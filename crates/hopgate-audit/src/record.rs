use crate::sanitizer::{sanitize_header_map, SanitizedHeaders};
use hopgate_core::Slug;
use http::{HeaderMap, Method, StatusCode};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;

/// What is known about the client beyond its headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Peer address of the connection, when the transport exposes it.
    pub remote_addr: Option<SocketAddr>,
    /// Free-form attributes supplied by the hosting environment.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

/// Raw view of the inbound request, captured before the response is sent.
#[derive(Debug, Clone)]
pub struct RequestSnapshot {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub client: ClientInfo,
}

/// Raw view of the response that was returned to the caller.
#[derive(Debug, Clone)]
pub struct ResponseSnapshot {
    pub status: StatusCode,
    pub headers: HeaderMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub method: String,
    pub url: String,
    pub client: ClientInfo,
    pub headers: SanitizedHeaders,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub status: u16,
    pub headers: SanitizedHeaders,
}

/// A redacted, immutable snapshot of one request/response pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub slug: Option<Slug>,
    pub request: RequestRecord,
    pub response: ResponseRecord,
    pub timestamp: Timestamp,
}

impl AuditRecord {
    /// Builds the record, sanitizing both header sets.
    pub fn build(
        slug: Option<Slug>,
        request: &RequestSnapshot,
        response: &ResponseSnapshot,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            slug,
            request: RequestRecord {
                method: request.method.to_string(),
                url: request.url.clone(),
                client: request.client.clone(),
                headers: sanitize_header_map(&request.headers),
            },
            response: ResponseRecord {
                status: response.status.as_u16(),
                headers: sanitize_header_map(&response.headers),
            },
            timestamp,
        }
    }
}
