//! Core traits for token storage and CSRF lookup.

mod csrf;
mod store;

pub use csrf::CsrfTokenSource;
pub use store::TokenStore;
