//! `saltbox unpack` — extract a .zip archive next to itself.

use std::path::Path;

use crate::archive::{path_is_archive, unpack_file};
use crate::cli::output;
use crate::config::Settings;
use crate::errors::{Result, SaltboxError};

/// Execute the `unpack` command.
pub fn execute(path: &str) -> Result<()> {
    let archive = Path::new(path);
    if !path_is_archive(archive) {
        return Err(SaltboxError::InvalidArchive(format!(
            "{} does not start with the zip magic bytes",
            archive.display()
        )));
    }

    let settings = Settings::load(&std::env::current_dir()?)?;
    let dir = unpack_file(archive, settings.overwrite)?;
    output::success(&format!("Unpacked into {}", dir.display()));
    Ok(())
}
