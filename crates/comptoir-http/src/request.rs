//! Outbound request descriptor.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

use comptoir_core::error::{Error, InvalidInputError};

/// A dashboard API request before dispatch.
///
/// The path is relative to the fixed `/api` prefix and must start with `/`.
/// Bodies are captured as serialized strings so the request can be re-sent
/// unchanged after a mid-flight token refresh. Headers set here override
/// the ones the client injects.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    body: Option<String>,
    headers: HeaderMap,
}

impl ApiRequest {
    /// Create a request with no body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: HeaderMap::new(),
        }
    }

    /// Create a request carrying a JSON-serialized body.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInputError::Body`] if the body cannot be serialized.
    pub fn json<B>(method: Method, path: impl Into<String>, body: &B) -> Result<Self, Error>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_string(body).map_err(|e| InvalidInputError::Body {
            reason: e.to_string(),
        })?;
        Ok(Self::new(method, path).with_body(body))
    }

    /// Attach a pre-serialized body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a header, overriding any default the client would inject.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path suffix after the `/api` prefix.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The serialized body, if any.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Caller-supplied header overrides.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
