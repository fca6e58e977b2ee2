//! `saltbox encrypt` — encrypt a file, or pack-and-encrypt a directory.

use std::path::Path;

use crate::cli::{output, prompt_new_password};
use crate::config::Settings;
use crate::container::ops;
use crate::errors::{Result, SaltboxError};

/// Execute the `encrypt` command.
pub fn execute(path: &str, discard_archive: bool) -> Result<()> {
    let src = Path::new(path);
    if !src.exists() {
        return Err(SaltboxError::SourceNotFound(src.to_path_buf()));
    }

    let settings = Settings::load(&std::env::current_dir()?)?;
    let password = prompt_new_password(settings.min_password_len)?;

    let container = if src.is_dir() {
        let keep_archive = settings.keep_archive && !discard_archive;
        let container =
            ops::pack_and_encrypt(src, password.as_bytes(), keep_archive, settings.overwrite)?;
        if keep_archive {
            output::info("The intermediate .zip archive was left next to the source.");
            output::tip("Pass --discard-archive (or set keep_archive = false) to remove it.");
        }
        container
    } else {
        ops::encrypt_file(src, password.as_bytes(), settings.overwrite)?
    };

    output::success(&format!("Encrypted to {}", container.display()));
    Ok(())
}
