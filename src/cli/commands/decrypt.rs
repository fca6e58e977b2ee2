//! `saltbox decrypt` — restore the plaintext file or directory tree.

use std::path::Path;

use crate::cli::{output, prompt_password};
use crate::config::Settings;
use crate::container::ops::{self, DecryptOutcome};
use crate::errors::{Result, SaltboxError};

/// Execute the `decrypt` command.
pub fn execute(path: &str) -> Result<()> {
    let container = Path::new(path);
    let settings = Settings::load(&std::env::current_dir()?)?;
    let password = prompt_password()?;

    match ops::decrypt_file(container, password.as_bytes(), settings.overwrite) {
        Ok(DecryptOutcome::Unpacked(dir)) => {
            output::success(&format!("Unpacked archive into {}", dir.display()));
            Ok(())
        }
        Ok(DecryptOutcome::Cleared(file)) => {
            output::success(&format!("Decrypted to {}", file.display()));
            Ok(())
        }
        Err(e @ SaltboxError::BadPadding) => {
            // Wrong password and corrupt ciphertext are indistinguishable
            // in this format; point the user at the likelier cause.
            output::tip("Check that you entered the right password.");
            Err(e)
        }
        Err(e) => Err(e),
    }
}
