//! Classifying bytes as archive-or-not from their prefix.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Zip local-file-header magic (`PK\x03\x04`).
pub const ARCHIVE_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Does this buffer start with the zip local-file-header magic?
///
/// Pure and infallible: fewer than 4 bytes (including empty input) is
/// simply `false`.
pub fn is_archive(bytes: &[u8]) -> bool {
    bytes.len() >= ARCHIVE_MAGIC.len() && bytes[..ARCHIVE_MAGIC.len()] == ARCHIVE_MAGIC
}

/// Does the file at `path` start with the archive magic?
///
/// Never errors: a missing or unreadable file, or one shorter than 4
/// bytes, yields `false`.
pub fn path_is_archive(path: &Path) -> bool {
    let Ok(mut file) = File::open(path) else {
        return false;
    };

    let mut prefix = [0u8; ARCHIVE_MAGIC.len()];
    let mut filled = 0;
    while filled < prefix.len() {
        match file.read(&mut prefix[filled..]) {
            Ok(0) | Err(_) => return false,
            Ok(n) => filled += n,
        }
    }
    is_archive(&prefix)
}
