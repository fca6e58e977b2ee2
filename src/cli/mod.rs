//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use clap::Parser;

use zeroize::Zeroizing;

use crate::errors::{Result, SaltboxError};

/// saltbox CLI: password-based file and directory encryption.
#[derive(Parser)]
#[command(
    name = "saltbox",
    about = "Password-based file and directory encryption",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt a file or directory into a Salted__ container
    Encrypt {
        /// File or directory to encrypt
        path: String,

        /// Delete the intermediate .zip archive after encrypting a directory
        #[arg(long)]
        discard_archive: bool,
    },

    /// Decrypt a container back into the original file or directory tree
    Decrypt {
        /// Container file (usually *.enc)
        path: String,
    },

    /// Pack a file or directory into a .zip archive without encrypting
    Pack {
        /// File or directory to pack
        path: String,
    },

    /// Unpack a .zip archive into its own directory
    Unpack {
        /// Archive file to unpack
        path: String,
    },

    /// Report whether a file is a container, an archive, or neither
    Inspect {
        /// File to inspect
        path: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the password for decryption, trying in order:
/// 1. `SALTBOX_PASSWORD` env var (CI/CD, scripting)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("SALTBOX_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter password")
        .interact()
        .map_err(|e| SaltboxError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used by `encrypt`).
///
/// Also respects `SALTBOX_PASSWORD` for scripted/CI usage.  Enforces
/// the configured minimum password length.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_new_password(min_len: usize) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("SALTBOX_PASSWORD") {
        if !pw.is_empty() {
            if pw.len() < min_len {
                return Err(SaltboxError::CommandFailed(format!(
                    "password must be at least {min_len} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose password")
            .with_confirmation("Confirm password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| SaltboxError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < min_len {
            output::warning(&format!(
                "Password must be at least {min_len} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}
