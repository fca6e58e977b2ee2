//! `saltbox inspect` — classify a file from its magic bytes.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::archive::path_is_archive;
use crate::cli::output;
use crate::container::format;
use crate::errors::{Result, SaltboxError};

/// Execute the `inspect` command.
pub fn execute(path: &str) -> Result<()> {
    let path = Path::new(path);
    if !path.is_file() {
        return Err(SaltboxError::SourceNotFound(path.to_path_buf()));
    }

    let mut reader = BufReader::new(File::open(path)?);
    if let Some(salt) = format::read_header(&mut reader)? {
        let salt_hex: String = salt.iter().map(|b| format!("{b:02x}")).collect();
        output::info(&format!("Salted__ container (salt {salt_hex})"));
        output::tip("Run `saltbox decrypt` to restore the plaintext.");
    } else if path_is_archive(path) {
        output::info("Zip archive");
        output::tip("Run `saltbox unpack` to extract it.");
    } else {
        output::info("Neither a container nor an archive");
    }
    Ok(())
}
