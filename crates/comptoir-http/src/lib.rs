//! comptoir-http - Authenticated HTTP client for the POS dashboard API.
//!
//! Wraps `reqwest` with the dashboard's request conventions: every call
//! carries the JSON content type, the CSRF header and, when a session
//! exists, a JWT bearer token. A request answered with 401 triggers one
//! token refresh and one retry before the response is handed back, so
//! callers never see a 401 caused merely by an expired access token.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use comptoir_core::{DashboardUrl, MemoryTokenStore, StaticCsrf};
//! use comptoir_http::ApiClient;
//!
//! # async fn example() -> Result<(), comptoir_core::Error> {
//! let base = DashboardUrl::new("https://pos.example.com")?;
//! let store = Arc::new(MemoryTokenStore::new());
//! let client = ApiClient::new(base, store, Arc::new(StaticCsrf::none()));
//!
//! if client.login("vendeur", "secret").await.is_ok() {
//!     let offers: serde_json::Value = client.get("/offers/").await?;
//!     println!("{offers}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod endpoints;

mod client;
mod csrf;
mod request;

pub use client::ApiClient;
pub use csrf::CookieJarCsrf;
pub use endpoints::LOGIN_ROUTE;
pub use request::ApiRequest;
