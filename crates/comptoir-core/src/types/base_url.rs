//! Dashboard base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// The fixed API prefix prepended to every relative path.
pub const API_PREFIX: &str = "/api";

/// A validated dashboard origin URL.
///
/// This type ensures the URL is absolute, uses HTTP or HTTPS, and is
/// normalized for API endpoint construction. The `/api` prefix of the
/// dashboard API is fixed: every relative path handed to the client is
/// appended to `<origin>/api`.
///
/// # Example
///
/// ```
/// use comptoir_core::DashboardUrl;
///
/// let base = DashboardUrl::new("https://pos.example.com").unwrap();
/// assert_eq!(base.api_url("/orders/"), "https://pos.example.com/api/orders/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DashboardUrl(Url);

impl DashboardUrl {
    /// Create a new dashboard URL from a string, validating the format.
    ///
    /// Plain HTTP is accepted alongside HTTPS: POS dashboards routinely run
    /// on intranet hosts without TLS.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute, lacks a host, or uses a
    /// scheme other than `http`/`https`.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::Url {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Returns the full API URL for a relative path.
    ///
    /// The path must start with `/`; it is appended verbatim after the
    /// fixed `/api` prefix, exactly as the dashboard does.
    pub fn api_url(&self, path: &str) -> String {
        // The URL crate always adds a trailing slash to root paths,
        // so trim it before appending the API prefix
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}{}{}", base, API_PREFIX, path)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        // Must be absolute
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::Url {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        let scheme = url.scheme();
        if scheme != "https" && scheme != "http" {
            return Err(InvalidInputError::Url {
                value: original.to_string(),
                reason: "must use HTTP or HTTPS".to_string(),
            }
            .into());
        }

        // Must have a host
        if url.host_str().is_none() {
            return Err(InvalidInputError::Url {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for DashboardUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DashboardUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for DashboardUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for DashboardUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DashboardUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for DashboardUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}
