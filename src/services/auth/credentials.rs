/*
 * Responsibility
 * - turn raw header values into credentials
 * - fail closed: any malformed input is `None`, never an error
 */
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Raw credentials extracted from a `Basic` Authorization header.
#[derive(Clone, Debug, PartialEq)]
pub struct BasicCredentials {
    pub email: String,
    pub password: String,
}

/// Parse an `Authorization: Basic <base64>` header value.
///
/// The scheme prefix is case-sensitive, the payload must be standard
/// base64 decoding to UTF-8, and the decoded string splits on the FIRST
/// `:` only — the password itself may contain `:`. Anything else is
/// `None`.
pub fn parse_basic_auth(header: &str) -> Option<BasicCredentials> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;

    let (email, password) = decoded.split_once(':')?;

    Some(BasicCredentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// A session token is opaque: any non-empty value passes through.
pub fn parse_session_token(value: &str) -> Option<&str> {
    if value.is_empty() { None } else { Some(value) }
}
