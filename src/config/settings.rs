use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SaltboxError};

/// Project-level configuration, loaded from `.saltbox.toml`.
///
/// Every field has a sensible default so saltbox works out-of-the-box
/// without any config file at all.  The crypto parameters themselves
/// (KDF, iteration count, cipher) are fixed by the container format
/// and deliberately not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Keep the intermediate `.zip` archive after encrypting a
    /// directory (default: true).
    #[serde(default = "default_keep_archive")]
    pub keep_archive: bool,

    /// Minimum password length enforced when encrypting (default: 8).
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,

    /// Replace existing output files instead of refusing to clobber
    /// them (default: false).
    #[serde(default = "default_overwrite")]
    pub overwrite: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_keep_archive() -> bool {
    true
}

fn default_min_password_len() -> usize {
    8
}

fn default_overwrite() -> bool {
    false
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            keep_archive: default_keep_archive(),
            min_password_len: default_min_password_len(),
            overwrite: default_overwrite(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".saltbox.toml";

    /// Load settings from `<dir>/.saltbox.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            SaltboxError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
