use crate::state::AppState;
use axum::body::Body;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::HOST;
use axum::http::request::Parts;
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use hopgate_audit::ClientInfo;
use hopgate_redirector::InboundRequest;
use std::collections::BTreeMap;
use std::net::SocketAddr;

const FORWARDED_PROTO_HEADER: &str = "x-forwarded-proto";

/// Handles every path that is not a gateway route. The body is never read.
pub async fn redirect_handler(State(state): State<AppState>, request: Request) -> Response {
    let (parts, _body) = request.into_parts();
    let inbound = inbound_request(parts);
    state
        .dispatcher()
        .dispatch(inbound)
        .await
        .map(Body::from)
        .into_response()
}

fn inbound_request(parts: Parts) -> InboundRequest {
    let remote_addr = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let mut attributes = BTreeMap::new();
    attributes.insert("http_version".to_string(), format!("{:?}", parts.version));

    let uri = absolute_uri(&parts);
    InboundRequest::new(parts.method, uri, parts.headers).with_client(ClientInfo {
        remote_addr,
        attributes,
    })
}

/// Rebuilds the full request url from the `Host` header, so audit records
/// carry the url the client asked for. Falls back to the origin-form uri.
fn absolute_uri(parts: &Parts) -> Uri {
    if parts.uri.authority().is_some() {
        return parts.uri.clone();
    }
    let Some(host) = parts.headers.get(HOST).and_then(|v| v.to_str().ok()) else {
        return parts.uri.clone();
    };
    let scheme = parts
        .headers
        .get(FORWARDED_PROTO_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    Uri::builder()
        .scheme(scheme)
        .authority(host)
        .path_and_query(path_and_query)
        .build()
        .unwrap_or_else(|_| parts.uri.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request as HttpRequest};

    fn parts(uri: &str, host: Option<&str>, proto: Option<&str>) -> Parts {
        let mut request = HttpRequest::builder().uri(uri).body(()).unwrap();
        if let Some(host) = host {
            request
                .headers_mut()
                .insert(HOST, HeaderValue::from_str(host).unwrap());
        }
        if let Some(proto) = proto {
            request
                .headers_mut()
                .insert(FORWARDED_PROTO_HEADER, HeaderValue::from_str(proto).unwrap());
        }
        request.into_parts().0
    }

    #[test]
    fn rebuilds_url_from_host_header() {
        let uri = absolute_uri(&parts("/abc123?x=1", Some("go.example"), None));
        assert_eq!(uri.to_string(), "http://go.example/abc123?x=1");
    }

    #[test]
    fn honours_forwarded_proto() {
        let uri = absolute_uri(&parts("/abc123", Some("go.example"), Some("https")));
        assert_eq!(uri.to_string(), "https://go.example/abc123");
    }

    #[test]
    fn keeps_origin_form_without_host() {
        let uri = absolute_uri(&parts("/abc123", None, None));
        assert_eq!(uri.to_string(), "/abc123");
    }

    #[test]
    fn unusable_host_keeps_origin_form() {
        let uri = absolute_uri(&parts("/abc123", Some("bad host"), None));
        assert_eq!(uri.to_string(), "/abc123");
    }

    #[test]
    fn slug_survives_reconstruction() {
        let inbound = inbound_request(parts("/abc123?x=1", Some("go.example"), None));
        assert_eq!(inbound.slug_segment(), "abc123");
        assert_eq!(
            inbound.client.attributes.get("http_version").map(String::as_str),
            Some("HTTP/1.1")
        );
        assert!(inbound.client.remote_addr.is_none());
    }
}
