//! File-backed token persistence.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use outfitted_core::error::Result;
use outfitted_core::session::TokenStore;

use crate::paths::OutfittedPaths;

/// Token store backed by a single file under the platform config directory.
///
/// The file holds the raw bearer token and nothing else; identity is always
/// re-derived from it. The file is created with mode 600 on Unix.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store over an explicit file path (tests use a temp dir).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default location,
    /// `<config dir>/outfitted/token`.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(OutfittedPaths::token_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, token).await?;

        // Keep the credential private to the current user.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&self.path, permissions).await?;
        }

        tracing::debug!("persisted token to {:?}", self.path);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
