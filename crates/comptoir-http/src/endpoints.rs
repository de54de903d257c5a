//! Dashboard API endpoint definitions and request/response types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// POST /api/token/
pub const TOKEN_PATH: &str = "/token/";

/// POST /api/token/refresh/
pub const TOKEN_REFRESH_PATH: &str = "/token/refresh/";

/// Dashboard route a caller should navigate to after logging out.
pub const LOGIN_ROUTE: &str = "/dashboard/login/";

/// Header carrying the CSRF token on mutating requests.
pub const CSRF_HEADER: &str = "x-csrftoken";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for the token endpoint.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from the token endpoint.
#[derive(Debug, Deserialize)]
pub struct TokenPairResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Request body for the token refresh endpoint.
#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Response from the token refresh endpoint.
/// Note: only a new access token is issued; the refresh token is unchanged.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
}
