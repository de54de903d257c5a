//! CSRF token source trait.

/// Provider of the current anti-forgery token.
///
/// The dashboard echoes a CSRF cookie value back to the server in an
/// `X-CSRFToken` header. Implementations read the token from wherever the
/// cookie lives (a cookie jar, a fixed value in tests); the client calls
/// [`csrf_token`](CsrfTokenSource::csrf_token) fresh on every request and
/// never caches the result.
///
/// Absence is not an error: a request without a CSRF token is sent with an
/// empty header value and left for the server to judge.
pub trait CsrfTokenSource: Send + Sync {
    /// Read the current CSRF token, if one is available.
    fn csrf_token(&self) -> Option<String>;
}
