//! comptoir-file - File-backed token storage.
//!
//! Provides [`FileTokenStore`], a [`comptoir_core::TokenStore`] that keeps
//! the credential pair in a JSON file so a session survives process
//! restarts, the desktop counterpart of the dashboard's browser storage.

mod store;

pub use store::FileTokenStore;
