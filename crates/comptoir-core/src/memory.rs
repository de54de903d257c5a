//! In-memory implementations of the storage and CSRF traits.
//!
//! These are the test doubles the client was designed around, and they also
//! serve single-process uses that have no reason to persist tokens.

use std::fmt;
use std::sync::RwLock;

use crate::error::StoreError;
use crate::traits::{CsrfTokenSource, TokenStore};
use crate::types::{AccessToken, RefreshToken};

#[derive(Default)]
struct Slots {
    access: Option<String>,
    refresh: Option<String>,
}

/// A [`TokenStore`] holding the credential pair in process memory.
///
/// Nothing survives the process; use `comptoir-file`'s store when tokens
/// must outlive a restart.
#[derive(Default)]
pub struct MemoryTokenStore {
    slots: RwLock<Slots>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with the given slot contents.
    ///
    /// Any combination of slots may be seeded, which tests use to set up
    /// states the trait alone cannot reach (a refresh token without an
    /// access token, for instance).
    pub fn with_tokens(access: Option<&str>, refresh: Option<&str>) -> Self {
        Self {
            slots: RwLock::new(Slots {
                access: access.map(str::to_string),
                refresh: refresh.map(str::to_string),
            }),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Slots> {
        self.slots.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Slots> {
        self.slots.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn access_token(&self) -> Result<Option<AccessToken>, StoreError> {
        Ok(self.read().access.as_deref().map(AccessToken::new))
    }

    fn refresh_token(&self) -> Result<Option<RefreshToken>, StoreError> {
        Ok(self.read().refresh.as_deref().map(RefreshToken::new))
    }

    fn store_tokens(
        &self,
        access: &AccessToken,
        refresh: Option<&RefreshToken>,
    ) -> Result<(), StoreError> {
        let mut slots = self.write();
        slots.access = Some(access.as_str().to_string());
        if let Some(refresh) = refresh {
            slots.refresh = Some(refresh.as_str().to_string());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut slots = self.write();
        slots.access = None;
        slots.refresh = None;
        Ok(())
    }
}

// Hide slot contents in Debug output
impl fmt::Debug for MemoryTokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryTokenStore")
            .field("slots", &"[REDACTED]")
            .finish()
    }
}

/// A [`CsrfTokenSource`] returning a fixed value.
#[derive(Debug, Clone)]
pub struct StaticCsrf(Option<String>);

impl StaticCsrf {
    /// A source that always yields the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// A source that never yields a token.
    pub fn none() -> Self {
        Self(None)
    }
}

impl CsrfTokenSource for StaticCsrf {
    fn csrf_token(&self) -> Option<String> {
        self.0.clone()
    }
}
