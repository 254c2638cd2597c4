use http::HeaderMap;
use std::collections::BTreeMap;

/// Access-credential header carrying the client id for the log collector.
pub const ACCESS_CLIENT_ID_HEADER: &str = "cf-access-client-id";
/// Access-credential header carrying the client secret for the log collector.
pub const ACCESS_CLIENT_SECRET_HEADER: &str = "cf-access-client-secret";

/// Lower-cased header names that never reach an audit record.
pub const FORBIDDEN_HEADERS: [&str; 4] = [
    "authorization",
    "cookie",
    ACCESS_CLIENT_ID_HEADER,
    ACCESS_CLIENT_SECRET_HEADER,
];

/// Canonical header name → value, ordered by name.
pub type SanitizedHeaders = BTreeMap<String, String>;

/// Strips forbidden headers and canonicalizes the remaining names.
///
/// Names are compared case-insensitively. Names that collapse onto the same
/// canonical form have their values joined with `", "` in input order.
/// Sanitizing an already sanitized set returns it unchanged.
pub fn sanitize<I, K, V>(headers: I) -> SanitizedHeaders
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut sanitized = SanitizedHeaders::new();
    for (name, value) in headers {
        let name = name.as_ref();
        if is_forbidden(name) {
            continue;
        }
        let value = value.as_ref();
        sanitized
            .entry(canonical_name(name))
            .and_modify(|existing: &mut String| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_owned());
    }
    sanitized
}

/// [`sanitize`] for an [`http::HeaderMap`]; non-UTF-8 values are rendered lossily.
pub fn sanitize_header_map(headers: &HeaderMap) -> SanitizedHeaders {
    sanitize(
        headers
            .iter()
            .map(|(name, value)| (name.as_str(), String::from_utf8_lossy(value.as_bytes()))),
    )
}

pub fn is_forbidden(name: &str) -> bool {
    FORBIDDEN_HEADERS
        .iter()
        .any(|forbidden| name.eq_ignore_ascii_case(forbidden))
}

/// `x-forwarded-FOR` → `X-Forwarded-For`.
pub fn canonical_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, segment) in name.split('-').enumerate() {
        if i > 0 {
            out.push('-');
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
        }
    }
    out
}
