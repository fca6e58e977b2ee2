//! On-disk container layout.
//!
//! A container file has this layout:
//!
//! ```text
//! [Salted__: 8 bytes][salt: 8 bytes][AES-256-CBC ciphertext]
//! ```
//!
//! - **Magic** (`Salted__`): the OpenSSL `enc` header tag.  A file
//!   without it is "not our format" — a signal, not a failure.
//! - **Salt**: random per encryption, stored in plaintext.  Key
//!   confidentiality does not depend on salt secrecy.
//! - **Ciphertext**: everything after byte 16, PKCS#7-padded.
//!
//! No IV is stored: both key and IV are re-derived from the password
//! and the salt (see `crypto::kdf`), which keeps the two sides of the
//! format symmetric and the header fixed-size.

use std::io::{Read, Write};

use crate::crypto::kdf::SALT_LEN;
use crate::errors::Result;

/// Magic bytes at the start of every container.
pub const MAGIC: &[u8; 8] = b"Salted__";

/// File name suffix for encrypted containers (`notes.txt.enc`).
pub const CONTAINER_SUFFIX: &str = "enc";

/// File name suffix for decrypted plaintext output (`notes.txt.clr`).
pub const CLEARED_SUFFIX: &str = "clr";

/// File name suffix for the intermediate archive (`project.zip`).
pub const ARCHIVE_SUFFIX: &str = "zip";

/// Write the container header: magic tag, then salt.
///
/// The caller streams the ciphertext immediately after.
pub fn write_header<W: Write>(writer: &mut W, salt: &[u8; SALT_LEN]) -> Result<()> {
    writer.write_all(MAGIC)?;
    writer.write_all(salt)?;
    Ok(())
}

/// Read and verify the container header.
///
/// Returns `Ok(Some(salt))` with the reader positioned at the first
/// ciphertext byte, or `Ok(None)` when the magic tag is absent (the
/// input is some other format — callers decide what that means).  A
/// file that carries the tag but is too short to hold a salt is a hard
/// I/O error.
pub fn read_header<R: Read>(reader: &mut R) -> Result<Option<[u8; SALT_LEN]>> {
    let mut magic = [0u8; 8];
    if read_up_to(reader, &mut magic)? < magic.len() || &magic != MAGIC {
        return Ok(None);
    }

    let mut salt = [0u8; SALT_LEN];
    reader.read_exact(&mut salt)?;
    Ok(Some(salt))
}

/// Read until `buf` is full or EOF; returns the count actually read.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
