//! Credential pair types.

use std::fmt;

/// The short-lived credential attached to authenticated requests.
///
/// The dashboard issues a fresh access token at login and again on every
/// refresh; between those moments the token is opaque to this client and
/// is only ever turned into an `Authorization` header. Its value never
/// appears in `Debug` output.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a token string received from the token endpoint or a store.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for persisting into a store slot.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `Authorization` header value carrying this token.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// The long-lived credential exchanged for new access tokens.
///
/// A refresh token is sent to exactly one endpoint, the token refresh
/// route, and is otherwise carried around untouched. Losing it means the
/// next expired session can only be recovered by logging in again. Its
/// value never appears in `Debug` output.
#[derive(Clone)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Wrap a token string received from the token endpoint or a store.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token, for the refresh request body or a store slot.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}
