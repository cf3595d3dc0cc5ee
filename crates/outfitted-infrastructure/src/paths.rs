//! Unified path management for Outfitted client-local storage.
//!
//! The only durable artifact is the bearer token, kept under the platform
//! config directory so it survives restarts until explicit logout.

use std::path::PathBuf;

use outfitted_core::error::{OutfittedError, Result};

/// Unified path management for the Outfitted client.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/outfitted/         # Config directory (platform-dependent)
/// └── token                    # Persisted bearer token (mode 600 on Unix)
/// ```
pub struct OutfittedPaths;

impl OutfittedPaths {
    /// Returns the Outfitted configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to the config directory (e.g. `~/.config/outfitted/`)
    /// - `Err(Io)`: The platform config directory could not be determined
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("outfitted"))
            .ok_or_else(|| OutfittedError::io("cannot determine the platform config directory"))
    }

    /// Returns the path to the persisted token file.
    ///
    /// # Security Note
    ///
    /// The token store sets this file's permissions to 600 (user read/write
    /// only) on Unix systems.
    pub fn token_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("token"))
    }
}
