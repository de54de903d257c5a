//! Persistent token storage trait.

use crate::error::StoreError;
use crate::types::{AccessToken, RefreshToken};

/// Persistent storage for the credential pair.
///
/// A store holds two independent named string slots, `access_token` and
/// `refresh_token`, surviving process restarts when the backing medium is
/// durable. An absent access token means the client is unauthenticated; an
/// absent refresh token means a refresh is impossible and an expired session
/// can only be ended by logging in again.
///
/// # Concurrency
///
/// Slots are read then written non-atomically. When two refreshes race, the
/// last write to the access slot wins and earlier in-flight results are
/// silently discarded. That is acceptable for a single-user dashboard client.
pub trait TokenStore: Send + Sync {
    /// Read the current access token, if any.
    fn access_token(&self) -> Result<Option<AccessToken>, StoreError>;

    /// Read the current refresh token, if any.
    fn refresh_token(&self) -> Result<Option<RefreshToken>, StoreError>;

    /// Persist tokens.
    ///
    /// The access slot is always overwritten. The refresh slot is written
    /// only when `refresh` is `Some`; passing `None` leaves whatever was
    /// stored there untouched, which is how a successful refresh replaces
    /// the access token without disturbing the refresh token.
    fn store_tokens(
        &self,
        access: &AccessToken,
        refresh: Option<&RefreshToken>,
    ) -> Result<(), StoreError>;

    /// Empty both slots.
    fn clear(&self) -> Result<(), StoreError>;
}
