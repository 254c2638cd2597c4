use hopgate_audit::{ClientInfo, RequestSnapshot};
use http::{HeaderMap, Method, Uri};

/// A request as seen by the dispatcher, independent of the HTTP server.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub client: ClientInfo,
}

impl InboundRequest {
    pub fn new(method: Method, uri: Uri, headers: HeaderMap) -> Self {
        Self {
            method,
            uri,
            headers,
            client: ClientInfo::default(),
        }
    }

    /// A bare `GET` with no headers.
    pub fn get(uri: Uri) -> Self {
        Self::new(Method::GET, uri, HeaderMap::new())
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_client(mut self, client: ClientInfo) -> Self {
        self.client = client;
        self
    }

    /// The slug candidate: the path with one leading `/` removed.
    pub fn slug_segment(&self) -> &str {
        slug_segment(&self.uri)
    }

    pub fn into_snapshot(self) -> RequestSnapshot {
        RequestSnapshot {
            method: self.method,
            url: self.uri.to_string(),
            headers: self.headers,
            client: self.client,
        }
    }
}

/// Strips exactly one leading `/` from the path. The query is never part of
/// the slug.
pub fn slug_segment(uri: &Uri) -> &str {
    let path = uri.path();
    path.strip_prefix('/').unwrap_or(path)
}
