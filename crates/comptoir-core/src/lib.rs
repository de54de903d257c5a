//! comptoir-core - Core types and traits for the comptoir dashboard client.

pub mod cookie;
pub mod error;
pub mod format;
pub mod memory;
pub mod traits;
pub mod types;

pub use error::{AuthError, Error, InvalidInputError, LoginError, StoreError, TransportError};
pub use memory::{MemoryTokenStore, StaticCsrf};
pub use traits::{CsrfTokenSource, TokenStore};
pub use types::{API_PREFIX, AccessToken, DashboardUrl, RefreshToken};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
