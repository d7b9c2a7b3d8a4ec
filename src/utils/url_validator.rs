//! Structural validation of long URLs.
//!
//! URLs are checked but never rewritten: the stored value must round-trip
//! byte-for-byte through create and resolve.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL must not contain whitespace or control characters")]
    UnsafeCharacter,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must contain a host")]
    MissingHost,
}

/// Validates that `input` is a well-formed absolute HTTP(S) URL.
///
/// # Rules
///
/// 1. Must not be empty or whitespace only
/// 2. Must not contain whitespace or control characters, which the parser
///    would strip or escape and a `Location` header cannot carry
/// 3. Must parse as an absolute URL (relative references are rejected)
/// 4. Scheme must be `http` or `https`
/// 5. Must carry a non-empty host
///
/// # Errors
///
/// Returns the first rule that fails as a [`UrlValidationError`].
///
/// # Examples
///
/// ```ignore
/// assert!(validate_url("https://example.com/a").is_ok());
/// assert!(validate_url("not-a-url").is_err());
/// assert!(validate_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if input.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(UrlValidationError::UnsafeCharacter);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
