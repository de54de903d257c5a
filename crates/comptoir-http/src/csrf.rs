//! CSRF token source backed by a reqwest cookie jar.

use std::sync::Arc;

use reqwest::cookie::{CookieStore, Jar};

use comptoir_core::cookie::{CSRF_COOKIE, cookie_value};
use comptoir_core::{CsrfTokenSource, DashboardUrl};

/// Reads the dashboard's `csrftoken` cookie from a shared cookie jar.
///
/// The jar is the same one the HTTP client stores responses into, so a
/// token rotated by the server is picked up on the very next request.
/// Nothing is cached.
pub struct CookieJarCsrf {
    jar: Arc<Jar>,
    base: DashboardUrl,
}

impl CookieJarCsrf {
    /// Create a source reading cookies scoped to the given dashboard origin.
    pub fn new(jar: Arc<Jar>, base: DashboardUrl) -> Self {
        Self { jar, base }
    }
}

impl CsrfTokenSource for CookieJarCsrf {
    fn csrf_token(&self) -> Option<String> {
        let header = self.jar.cookies(self.base.as_url())?;
        let header = header.to_str().ok()?;
        cookie_value(header, CSRF_COOKIE)
    }
}

// Custom Debug impl that hides the jar contents (session cookies)
impl std::fmt::Debug for CookieJarCsrf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieJarCsrf")
            .field("base", &self.base)
            .field("jar", &"[REDACTED]")
            .finish()
    }
}
