//! Client identification utilities
//!
//! Common functions for identifying clients via HTTP headers.

use axum::http::{HeaderMap, HeaderName, header};
use std::borrow::Cow;
use std::net::IpAddr;

use crate::crypto::sha256_hex;

/// Client-declared fingerprint token header
pub const FINGERPRINT_HEADER: HeaderName = HeaderName::from_static("x-fingerprint");

/// Delimiter placed between fingerprint fields
const FIELD_DELIMITER: char = '|';

/// Client fingerprint derived from the connection and request headers
///
/// A low-assurance identity surrogate, not a security credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFingerprint {
    /// Hex SHA-256 digest of the joined fields
    pub digest: String,
    /// Client address the digest was computed for
    pub address: String,
    /// Whether the request carried an `X-Fingerprint` header
    pub token_supplied: bool,
}

/// Derive a fingerprint digest from the four identifying fields
///
/// Fields are joined in the fixed order `address|user_agent|accept_language|token`.
/// Backslashes and delimiters inside a field are escaped first, so two
/// different field tuples never produce the same pre-image.
pub fn fingerprint(
    address: &str,
    user_agent: &str,
    accept_language: &str,
    supplied_token: &str,
) -> String {
    let fields = [address, user_agent, accept_language, supplied_token];
    let mut joined = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            joined.push(FIELD_DELIMITER);
        }
        joined.push_str(&escape_field(field));
    }
    sha256_hex(joined.as_bytes())
}

/// Extract client fingerprint from request headers
///
/// Missing headers are treated as empty strings; this never fails.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `client_address` - Client address in string form
pub fn extract_fingerprint(headers: &HeaderMap, client_address: &str) -> ClientFingerprint {
    let user_agent = header_lossy(headers, &header::USER_AGENT);
    let accept_language = header_lossy(headers, &header::ACCEPT_LANGUAGE);
    let supplied_token = header_lossy(headers, &FINGERPRINT_HEADER);

    ClientFingerprint {
        digest: fingerprint(client_address, &user_agent, &accept_language, &supplied_token),
        address: client_address.to_string(),
        token_supplied: headers.contains_key(FINGERPRINT_HEADER),
    }
}

/// Extract client IP address from headers
///
/// When `trust_forwarded_for` is set, the first address in
/// X-Forwarded-For wins (reverse proxy setups); otherwise, and when the
/// header is absent or unparseable, the direct connection IP is used.
///
/// ## Returns
/// The client IP address, or None if not determinable
pub fn extract_client_ip(
    headers: &HeaderMap,
    direct_ip: Option<IpAddr>,
    trust_forwarded_for: bool,
) -> Option<IpAddr> {
    if trust_forwarded_for {
        if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
            if let Some(first_ip) = xff.split(',').next() {
                if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                    return Some(ip);
                }
            }
        }
    }
    direct_ip
}

fn header_lossy(headers: &HeaderMap, name: &HeaderName) -> String {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default()
}

fn escape_field(field: &str) -> Cow<'_, str> {
    if !field.contains(['\\', FIELD_DELIMITER]) {
        return Cow::Borrowed(field);
    }
    let mut escaped = String::with_capacity(field.len() + 4);
    for ch in field.chars() {
        if ch == '\\' || ch == FIELD_DELIMITER {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    Cow::Owned(escaped)
}
