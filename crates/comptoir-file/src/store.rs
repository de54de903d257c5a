//! Filesystem storage for the credential pair.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use comptoir_core::error::StoreError;
use comptoir_core::{AccessToken, RefreshToken, TokenStore};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// On-disk shape of the two token slots.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredTokens {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// A [`TokenStore`] persisting tokens to a single JSON file.
///
/// The file is created on first write with `0o600` permissions on Unix.
/// A missing file simply means both slots are empty; clearing removes the
/// file altogether.
#[derive(Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store backed by the given file path.
    ///
    /// The file and its parent directories are created lazily on the first
    /// write, so constructing a store never touches the filesystem.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Result<StoredTokens, StoreError> {
        if !self.path.exists() {
            return Ok(StoredTokens::default());
        }

        let json = fs::read_to_string(&self.path)?;
        serde_json::from_str(&json).map_err(|e| StoreError::Corrupt {
            message: e.to_string(),
        })
    }

    fn write_slots(&self, slots: &StoredTokens) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(slots).map_err(|e| StoreError::Corrupt {
            message: e.to_string(),
        })?;
        fs::write(&self.path, &json)?;

        // Tokens grant account access; keep the file private (Unix only)
        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn access_token(&self) -> Result<Option<AccessToken>, StoreError> {
        Ok(self.read_slots()?.access_token.map(AccessToken::new))
    }

    fn refresh_token(&self) -> Result<Option<RefreshToken>, StoreError> {
        Ok(self.read_slots()?.refresh_token.map(RefreshToken::new))
    }

    fn store_tokens(
        &self,
        access: &AccessToken,
        refresh: Option<&RefreshToken>,
    ) -> Result<(), StoreError> {
        let mut slots = self.read_slots().unwrap_or_else(|e| {
            warn!(error = %e, path = %self.path.display(), "Replacing unreadable token file");
            StoredTokens::default()
        });

        slots.access_token = Some(access.as_str().to_string());
        if let Some(refresh) = refresh {
            slots.refresh_token = Some(refresh.as_str().to_string());
        }

        self.write_slots(&slots)?;
        debug!(path = %self.path.display(), "Stored tokens");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Cleared stored tokens");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl std::fmt::Debug for FileTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileTokenStore")
            .field("path", &self.path)
            .finish()
    }
}
