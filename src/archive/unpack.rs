//! Unpacking an archive through caller-supplied sink resolution.
//!
//! The unpacker is decoupled from the filesystem: for every entry it
//! asks a `SinkResolver` where the bytes should go.  The bundled
//! `FsSinkResolver` materializes entries under a root directory;
//! tests use in-memory resolvers.
//!
//! The unpacker never infers directory creation from file paths —
//! when an archive omits directory entries (as our packer does), the
//! resolver is responsible for creating parent directories before
//! handing back a sink.

use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek, Write};
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use crate::errors::{Result, SaltboxError};

/// Strategy object deciding where each archive entry's bytes go.
///
/// Return `Ok(None)` for directory markers (after creating the
/// directory, if desired) and to skip file entries; return
/// `Ok(Some(sink))` to receive a file entry's bytes.  The sink is
/// dropped (and therefore flushed/closed) after the copy.
pub trait SinkResolver {
    fn resolve(&mut self, name: &str, is_dir: bool) -> Result<Option<Box<dyn Write>>>;
}

/// Unpack every entry of the archive in stream order.
///
/// A malformed or truncated entry aborts the remaining extraction;
/// entries already written are not rolled back.
pub fn unpack<R: Read + Seek, S: SinkResolver>(reader: R, resolver: &mut S) -> Result<()> {
    let mut archive = ZipArchive::new(reader).map_err(zip_error)?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(zip_error)?;
        let name = entry.name().to_string();
        let is_dir = entry.is_dir();

        if let Some(mut sink) = resolver.resolve(&name, is_dir)? {
            io::copy(&mut entry, &mut sink)?;
        }
    }
    Ok(())
}

/// Unpack an archive into `target_dir` using the filesystem resolver.
pub fn unpack_into<R: Read + Seek>(reader: R, target_dir: &Path, overwrite: bool) -> Result<()> {
    let mut resolver = FsSinkResolver::new(target_dir, overwrite);
    unpack(reader, &mut resolver)
}

/// Unpack an archive file into its own parent directory.
///
/// Returns the directory the entries were extracted into.
pub fn unpack_file(archive: &Path, overwrite: bool) -> Result<PathBuf> {
    if !archive.is_file() {
        return Err(SaltboxError::SourceNotFound(archive.to_path_buf()));
    }
    let parent = archive.parent().unwrap_or(Path::new(".")).to_path_buf();
    let reader = BufReader::new(File::open(archive)?);
    unpack_into(reader, &parent, overwrite)?;
    Ok(parent)
}

/// `SinkResolver` that materializes entries under a root directory.
///
/// Creates directories for directory markers, creates parent
/// directories for file entries, and rejects entry names that would
/// escape the root.  Unless `overwrite` is set, an entry landing on an
/// existing file aborts the unpack with `OutputExists`.
pub struct FsSinkResolver {
    root: PathBuf,
    overwrite: bool,
}

impl FsSinkResolver {
    pub fn new(root: impl Into<PathBuf>, overwrite: bool) -> Self {
        Self {
            root: root.into(),
            overwrite,
        }
    }
}

impl SinkResolver for FsSinkResolver {
    fn resolve(&mut self, name: &str, is_dir: bool) -> Result<Option<Box<dyn Write>>> {
        let target = sanitized_join(&self.root, name)?;

        if is_dir {
            fs::create_dir_all(&target)?;
            return Ok(None);
        }

        if !self.overwrite && target.exists() {
            return Err(SaltboxError::OutputExists(target));
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Some(Box::new(File::create(target)?)))
    }
}

/// Join an entry name onto `root`, rejecting traversal components.
///
/// Entry names use `/` separators; `.` components are dropped, and
/// `..` or backslash-bearing components fail the whole unpack.
fn sanitized_join(root: &Path, name: &str) -> Result<PathBuf> {
    let mut out = root.to_path_buf();
    for part in name.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." || part.contains('\\') {
            return Err(SaltboxError::InvalidArchive(format!(
                "entry name '{name}' escapes the target directory"
            )));
        }
        out.push(part);
    }
    Ok(out)
}

fn zip_error(e: zip::result::ZipError) -> SaltboxError {
    SaltboxError::InvalidArchive(e.to_string())
}
