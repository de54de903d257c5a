//! Core types for the dashboard client.
//!
//! These types enforce their invariants at construction time.

mod base_url;
mod tokens;

pub use base_url::{API_PREFIX, DashboardUrl};
pub use tokens::{AccessToken, RefreshToken};
