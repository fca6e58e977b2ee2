//! `saltbox pack` — pack a file or directory into a .zip, no encryption.

use std::path::Path;

use crate::archive::pack_to_file;
use crate::cli::output;
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `pack` command.
pub fn execute(path: &str) -> Result<()> {
    let settings = Settings::load(&std::env::current_dir()?)?;
    let archive = pack_to_file(Path::new(path), settings.overwrite)?;
    output::success(&format!("Packed into {}", archive.display()));
    Ok(())
}
