use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in saltbox.
#[derive(Debug, Error)]
pub enum SaltboxError {
    // --- Crypto errors ---
    #[error("Decryption failed — wrong password or corrupted data")]
    BadPadding,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Container errors ---
    #[error("Not an encrypted container — missing Salted__ magic")]
    NotAContainer,

    // --- Archive errors ---
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    // --- Path errors ---
    #[error("Source path not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Output already exists: {0} (set overwrite = true in .saltbox.toml to replace it)")]
    OutputExists(PathBuf),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for saltbox results.
pub type Result<T> = std::result::Result<T, SaltboxError>;
