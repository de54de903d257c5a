//! Cookie header parsing.

use percent_encoding::percent_decode_str;

/// Name of the dashboard's anti-forgery cookie.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Extract the value of a named cookie from a raw `Cookie` header string.
///
/// The input is the header as transmitted (`"a=1; b=2"`); the output is the
/// percent-decoded value of the first pair whose name matches `name`
/// exactly, or `None` when no pair matches. Pairs are split on `;` and
/// trimmed, names compare case-sensitively, and an empty value yields
/// `Some("")`. Invalid UTF-8 in percent-escapes is decoded lossily.
///
/// # Example
///
/// ```
/// use comptoir_core::cookie::cookie_value;
///
/// let header = "sessionid=xyz; csrftoken=abc123";
/// assert_eq!(cookie_value(header, "csrftoken").as_deref(), Some("abc123"));
/// assert_eq!(cookie_value(header, "missing"), None);
/// ```
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    for pair in header.split(';') {
        let pair = pair.trim();
        if let Some(raw) = pair.strip_prefix(name).and_then(|r| r.strip_prefix('=')) {
            return Some(percent_decode_str(raw).decode_utf8_lossy().into_owned());
        }
    }
    None
}
