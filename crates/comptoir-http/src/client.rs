//! Authenticated HTTP client for the dashboard API.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use comptoir_core::error::{AuthError, Error, InvalidInputError, LoginError, TransportError};
use comptoir_core::{AccessToken, CsrfTokenSource, DashboardUrl, RefreshToken, TokenStore};

use crate::csrf::CookieJarCsrf;
use crate::endpoints::{
    CSRF_HEADER, LOGIN_ROUTE, LoginRequest, RefreshRequest, RefreshResponse, TOKEN_PATH,
    TOKEN_REFRESH_PATH, TokenPairResponse,
};
use crate::request::ApiRequest;

/// HTTP client for the dashboard API.
///
/// Every dispatched request carries the JSON content type, the CSRF header
/// and, when a session exists, a JWT bearer token. A 401 answer to an
/// authenticated request triggers one token refresh and one retry before
/// the response is handed back.
///
/// Clients are cheap to clone and safe to share across tasks; the token
/// store and CSRF source are injected so callers choose where credentials
/// live.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: DashboardUrl,
    store: Arc<dyn TokenStore>,
    csrf: Arc<dyn CsrfTokenSource>,
}

impl ApiClient {
    /// Create a client with an injected token store and CSRF source.
    pub fn new(
        base: DashboardUrl,
        store: Arc<dyn TokenStore>,
        csrf: Arc<dyn CsrfTokenSource>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("comptoir/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base,
            store,
            csrf,
        }
    }

    /// Create a client whose transport and CSRF source share one cookie jar.
    ///
    /// Cookies set by the server are sent back automatically and the CSRF
    /// token is read from the same jar, the way a browser session behaves.
    pub fn with_cookie_jar(base: DashboardUrl, store: Arc<dyn TokenStore>) -> Self {
        let jar = Arc::new(reqwest::cookie::Jar::default());
        let http = reqwest::Client::builder()
            .user_agent(concat!("comptoir/", env!("CARGO_PKG_VERSION")))
            .cookie_provider(jar.clone())
            .build()
            .expect("failed to build HTTP client");

        let csrf = Arc::new(CookieJarCsrf::new(jar, base.clone()));

        Self {
            http,
            base,
            store,
            csrf,
        }
    }

    /// Returns the dashboard base URL this client is configured for.
    pub fn base(&self) -> &DashboardUrl {
        &self.base
    }

    /// Send a request, refreshing the access token once on a 401.
    ///
    /// The response is returned whatever its status; only the 401-refresh
    /// case is handled here. Transport failures of either send propagate
    /// unmodified, while refresh failures are swallowed by
    /// [`refresh_access_token`](Self::refresh_access_token) and leave the
    /// original 401 to be returned.
    #[instrument(skip(self, request), fields(method = %request.method(), path = request.path()))]
    pub async fn dispatch(&self, request: &ApiRequest) -> Result<reqwest::Response, Error> {
        let access = self.store.access_token()?;
        let had_token = access.is_some();
        let mut headers = self.request_headers(request, access.as_ref())?;

        debug!("Dispatching request");
        let response = self.send(request, headers.clone()).await?;

        if response.status() == StatusCode::UNAUTHORIZED && had_token {
            debug!("Access token rejected, attempting refresh");
            if let Some(access) = self.refresh_access_token().await {
                headers.insert(AUTHORIZATION, bearer_value(&access)?);
                return self.send(request, headers).await;
            }
        }

        Ok(response)
    }

    /// Send a GET request and parse the response body as JSON.
    ///
    /// The body is parsed whatever the status code: the dashboard's error
    /// payloads are JSON too, and callers inspect the parsed shape.
    pub async fn get<R>(&self, path: &str) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        let request = ApiRequest::new(Method::GET, path);
        let response = self.dispatch(&request).await?;
        response.json::<R>().await.map_err(transport_error)
    }

    /// Send a POST request with a JSON body, returning the raw response.
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<reqwest::Response, Error>
    where
        B: Serialize + ?Sized,
    {
        let request = ApiRequest::json(Method::POST, path, body)?;
        self.dispatch(&request).await
    }

    /// Send a PUT request with a JSON body, returning the raw response.
    pub async fn put<B>(&self, path: &str, body: &B) -> Result<reqwest::Response, Error>
    where
        B: Serialize + ?Sized,
    {
        let request = ApiRequest::json(Method::PUT, path, body)?;
        self.dispatch(&request).await
    }

    /// Send a PATCH request with a JSON body, returning the raw response.
    pub async fn patch<B>(&self, path: &str, body: &B) -> Result<reqwest::Response, Error>
    where
        B: Serialize + ?Sized,
    {
        let request = ApiRequest::json(Method::PATCH, path, body)?;
        self.dispatch(&request).await
    }

    /// Send a DELETE request, returning the raw response.
    pub async fn delete(&self, path: &str) -> Result<reqwest::Response, Error> {
        let request = ApiRequest::new(Method::DELETE, path);
        self.dispatch(&request).await
    }

    /// Log in with username and password.
    ///
    /// On success both tokens are persisted and the client is authenticated
    /// for subsequent requests. Failures collapse into the two cases the
    /// dashboard shows its users: rejected credentials or a connection
    /// problem. The crate-level [`Error`] never escapes this method.
    #[instrument(skip(self, password), fields(base = %self.base, %username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<(), LoginError> {
        info!("Logging in");

        match self.try_login(username, password).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(LoginError::InvalidCredentials),
            Err(e) => {
                warn!(error = %e, "Login attempt failed");
                Err(LoginError::Connection)
            }
        }
    }

    /// Log out, clearing both stored tokens.
    ///
    /// Returns the dashboard login route the embedding UI should navigate
    /// to, the library-side rendition of the browser redirect.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<&'static str, Error> {
        self.store.clear()?;
        info!("Logged out");
        Ok(LOGIN_ROUTE)
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// A missing (or unreadable) refresh token short-circuits to `None`
    /// without touching the store. Any other failure clears both slots so
    /// the next request starts unauthenticated instead of looping on a dead
    /// session. Errors are swallowed here and only here; they surface as
    /// warnings in the log.
    #[instrument(skip(self), fields(base = %self.base))]
    pub async fn refresh_access_token(&self) -> Option<AccessToken> {
        let refresh = match self.store.refresh_token() {
            Ok(Some(token)) => token,
            Ok(None) => {
                debug!("No refresh token stored");
                return None;
            }
            Err(e) => {
                warn!(error = %e, "Could not read refresh token");
                return None;
            }
        };

        match self.try_refresh(&refresh).await {
            Ok(access) => Some(access),
            Err(e) => {
                warn!(error = %e, "Token refresh failed, clearing session");
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "Could not clear token store");
                }
                None
            }
        }
    }

    async fn try_login(&self, username: &str, password: &str) -> Result<bool, Error> {
        let url = self.base.api_url(TOKEN_PATH);
        let request = LoginRequest { username, password };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Ok(false);
        }

        let body: TokenPairResponse = response.json().await.map_err(transport_error)?;
        let access = AccessToken::new(body.access);
        let refresh = body.refresh.map(RefreshToken::new);
        self.store.store_tokens(&access, refresh.as_ref())?;

        debug!("Login succeeded");
        Ok(true)
    }

    async fn try_refresh(&self, refresh: &RefreshToken) -> Result<AccessToken, Error> {
        let url = self.base.api_url(TOKEN_REFRESH_PATH);
        let request = RefreshRequest {
            refresh: refresh.as_str(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::RefreshRejected {
                status: status.as_u16(),
            }
            .into());
        }

        let body: RefreshResponse = response.json().await.map_err(transport_error)?;
        let access = AccessToken::new(body.access);

        // Only the access slot is replaced; the refresh token stays valid.
        self.store.store_tokens(&access, None)?;
        debug!("Access token refreshed");

        Ok(access)
    }

    /// Build the header map for a dispatched request.
    ///
    /// Merge order matters: defaults first, caller overrides last so they
    /// win. The CSRF token is read fresh on every call because the server
    /// rotates the cookie.
    fn request_headers(
        &self,
        request: &ApiRequest,
        access: Option<&AccessToken>,
    ) -> Result<HeaderMap, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let csrf = self.csrf.csrf_token().unwrap_or_default();
        let csrf_value = HeaderValue::from_str(&csrf).unwrap_or(HeaderValue::from_static(""));
        headers.insert(HeaderName::from_static(CSRF_HEADER), csrf_value);

        if let Some(access) = access {
            headers.insert(AUTHORIZATION, bearer_value(access)?);
        }

        for (name, value) in request.headers() {
            headers.insert(name, value.clone());
        }

        Ok(headers)
    }

    async fn send(
        &self,
        request: &ApiRequest,
        headers: HeaderMap,
    ) -> Result<reqwest::Response, Error> {
        let url = self.base.api_url(request.path());

        let mut builder = self
            .http
            .request(request.method().clone(), &url)
            .headers(headers);
        if let Some(body) = request.body() {
            builder = builder.body(body.to_string());
        }

        builder.send().await.map_err(transport_error)
    }
}

// Custom Debug impl that hides the credential collaborators
impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base)
            .field("store", &"[REDACTED]")
            .finish()
    }
}

fn bearer_value(token: &AccessToken) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(&token.bearer()).map_err(|_| {
        InvalidInputError::Token {
            reason: "token contains bytes not allowed in a header".to_string(),
        }
        .into()
    })
}

fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else if err.is_decode() {
        TransportError::Decode {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}
