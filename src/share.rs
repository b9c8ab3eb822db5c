//! Share-link codec: a reversible text encoding of the document source.
//!
//! The payload is percent-encoded UTF-8 wrapped in URL-safe base64, carried in
//! a `code` query parameter. No server side; the link *is* the document.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};

/// Fixed origin used when building share links from the desktop app.
pub const SHARE_ORIGIN: &str = "https://less.playground/";

/// Encode source text into a URL-safe payload.
pub fn encode(source: &str) -> String {
    let escaped = utf8_percent_encode(source, NON_ALPHANUMERIC).to_string();
    URL_SAFE_NO_PAD.encode(escaped.as_bytes())
}

/// Decode a payload produced by [`encode`].
pub fn decode(payload: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim()).ok()?;
    let escaped = String::from_utf8(bytes).ok()?;
    percent_decode_str(&escaped)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}

/// Build the full shareable URL for a source document.
pub fn share_url(source: &str) -> String {
    format!("{SHARE_ORIGIN}?code={}", encode(source))
}

/// Extract the source from a share URL or a bare payload.
///
/// Accepts either `https://.../?code=<payload>` or `<payload>` directly, so a
/// copied link can be passed straight to the binary as its first argument.
pub fn decode_link(link: &str) -> Option<String> {
    let payload = match link.split_once("code=") {
        Some((_, rest)) => rest.split('&').next().unwrap_or(rest),
        None => link,
    };
    decode(payload)
}
