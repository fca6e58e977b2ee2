//! High-level encrypt/decrypt operations used by CLI commands.
//!
//! These compose the archive, KDF, cipher, and format layers into the
//! two end-user pipelines:
//!
//! - pack-then-encrypt: directory or file -> `.zip` -> `.zip.enc`
//! - decrypt-then-maybe-unpack: `.enc` -> plaintext -> directory tree
//!   (when the plaintext is an archive) or a `.clr` sibling file.
//!
//! Every operation is a linear pipeline: any stage failing aborts the
//! whole call, and nothing is retried.  Existing outputs are refused
//! unless the caller passes `overwrite`.  Output files are opened in
//! truncate-and-write mode with no atomic rename, so a crash mid-write
//! leaves a partial file — callers that need atomicity must stage to a
//! temp path themselves.

use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::{Path, PathBuf};

use crate::archive::{is_archive, pack_to_file, unpack_into};
use crate::container::format::{self, CLEARED_SUFFIX, CONTAINER_SUFFIX};
use crate::crypto::{decrypt_stream, derive_key_iv, encrypt_stream, generate_salt};
use crate::errors::{Result, SaltboxError};

/// What `decrypt_file` produced.
#[derive(Debug)]
pub enum DecryptOutcome {
    /// The plaintext was an archive; it was unpacked into this directory.
    Unpacked(PathBuf),
    /// The plaintext was an ordinary file, written to this path.
    Cleared(PathBuf),
}

// ---------------------------------------------------------------------------
// File-level operations
// ---------------------------------------------------------------------------

/// Encrypt `input` into a sibling container at `<input>.enc`.
///
/// Generates a fresh salt, derives key + IV from it and the password,
/// and streams the file through the cipher so memory use stays bounded
/// regardless of file size.  An existing container at the output path
/// is refused unless `overwrite` is set.  Returns the container path.
pub fn encrypt_file(input: &Path, password: &[u8], overwrite: bool) -> Result<PathBuf> {
    if !input.is_file() {
        return Err(SaltboxError::SourceNotFound(input.to_path_buf()));
    }

    let out_path = append_suffix(input, CONTAINER_SUFFIX);
    if !overwrite && out_path.exists() {
        return Err(SaltboxError::OutputExists(out_path));
    }

    let salt = generate_salt();
    let key_iv = derive_key_iv(password, &salt)?;

    let reader = File::open(input)?;
    let mut writer = File::create(&out_path)?;
    format::write_header(&mut writer, &salt)?;
    encrypt_stream(reader, writer, &key_iv)?;

    Ok(out_path)
}

/// Pack `path` (file or directory) into `<path>.zip`, then encrypt the
/// archive into `<path>.zip.enc`.
///
/// The intermediate `.zip` is a visible side effect; it is removed
/// only when `keep_archive` is false.  Returns the container path.
pub fn pack_and_encrypt(
    path: &Path,
    password: &[u8],
    keep_archive: bool,
    overwrite: bool,
) -> Result<PathBuf> {
    let archive = pack_to_file(path, overwrite)?;
    let container = encrypt_file(&archive, password, overwrite)?;
    if !keep_archive {
        std::fs::remove_file(&archive)?;
    }
    Ok(container)
}

/// Decrypt a container file, recreating the original content.
///
/// Reads the header (a missing magic tag is `NotAContainer`), derives
/// key + IV from the embedded salt, and decrypts.  If the plaintext
/// sniffs as an archive it is unpacked into the container's parent
/// directory, recreating the packed tree; otherwise it is written to a
/// sibling file with the `.enc` suffix swapped for `.clr`.  Existing
/// output files are refused unless `overwrite` is set.
pub fn decrypt_file(container: &Path, password: &[u8], overwrite: bool) -> Result<DecryptOutcome> {
    if !container.is_file() {
        return Err(SaltboxError::SourceNotFound(container.to_path_buf()));
    }

    let mut reader = BufReader::new(File::open(container)?);
    let salt = format::read_header(&mut reader)?.ok_or(SaltboxError::NotAContainer)?;
    let key_iv = derive_key_iv(password, &salt)?;

    let mut plaintext = Vec::new();
    decrypt_stream(reader, &mut plaintext, &key_iv)?;

    let parent = container.parent().unwrap_or(Path::new("."));
    if is_archive(&plaintext) {
        unpack_into(Cursor::new(plaintext), parent, overwrite)?;
        return Ok(DecryptOutcome::Unpacked(parent.to_path_buf()));
    }

    let out_path = cleared_path(container);
    if !overwrite && out_path.exists() {
        return Err(SaltboxError::OutputExists(out_path));
    }
    std::fs::write(&out_path, &plaintext)?;
    Ok(DecryptOutcome::Cleared(out_path))
}

// ---------------------------------------------------------------------------
// Byte-level operations
// ---------------------------------------------------------------------------

/// Encrypt a byte buffer into a self-contained container buffer.
pub fn encrypt_to_container(plaintext: &[u8], password: &[u8]) -> Result<Vec<u8>> {
    let salt = generate_salt();
    let key_iv = derive_key_iv(password, &salt)?;

    let mut out = Vec::new();
    format::write_header(&mut out, &salt)?;
    encrypt_stream(Cursor::new(plaintext), &mut out, &key_iv)?;
    Ok(out)
}

/// Decrypt a container buffer back to its plaintext bytes.
///
/// Fails with `NotAContainer` when the magic tag is missing and with
/// `BadPadding` when the password does not match.
pub fn decrypt_container(container: &[u8], password: &[u8]) -> Result<Vec<u8>> {
    let mut reader = container;
    let salt = format::read_header(&mut reader)?.ok_or(SaltboxError::NotAContainer)?;
    let key_iv = derive_key_iv(password, &salt)?;

    let mut plaintext = Vec::new();
    decrypt_stream(reader, &mut plaintext, &key_iv)?;
    Ok(plaintext)
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Append `.suffix` to a path: `project.zip` -> `project.zip.enc`.
fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Build the plaintext output path for a non-archive container:
/// strip a trailing `.enc` (when present) and append `.clr`.
///
/// `notes.txt.enc` -> `notes.txt.clr`; `data.bin` -> `data.bin.clr`.
fn cleared_path(container: &Path) -> PathBuf {
    let name = container
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let enc_suffix = format!(".{CONTAINER_SUFFIX}");
    let stem = name.strip_suffix(&enc_suffix).unwrap_or(&name);
    container.with_file_name(format!("{stem}.{CLEARED_SUFFIX}"))
}
