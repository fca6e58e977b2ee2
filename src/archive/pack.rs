//! Packing a file or directory tree into a zip archive.
//!
//! A single file becomes one entry named by its base name.  A
//! directory is walked depth-first (entries sorted by name at each
//! level, so the output order is deterministic) and every regular file
//! becomes an entry named by its path relative to the directory's
//! *parent* — repacking therefore preserves the top-level directory
//! name.  Directories themselves are not emitted; their existence is
//! implied by the file entries' path prefixes.
//!
//! An unreadable file aborts the whole pack: a partial archive is not
//! a defined success state.

use std::fs::{self, File};
use std::io::{self, BufWriter, Cursor, Seek, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::container::format::ARCHIVE_SUFFIX;
use crate::errors::{Result, SaltboxError};

/// Pack `src` (file or directory) into `writer` as a zip archive.
pub fn pack_path<W: Write + Seek>(src: &Path, writer: W) -> Result<()> {
    if !src.exists() {
        return Err(SaltboxError::SourceNotFound(src.to_path_buf()));
    }

    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default();

    if src.is_dir() {
        // Names are computed against the parent so the archive keeps
        // the directory's own name as its top-level prefix.
        let root = src.parent().unwrap_or(Path::new(""));
        add_dir_entries(&mut zip, src, root, options)?;
    } else {
        let name = src
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| SaltboxError::SourceNotFound(src.to_path_buf()))?;
        add_file_entry(&mut zip, src, name, options)?;
    }

    zip.finish().map_err(zip_error)?;
    Ok(())
}

/// Pack `src` into a sibling archive file at `<src>.zip`.
///
/// A pre-existing `.zip` suffix on `src` is stripped first, so packing
/// `data.zip` targets `data.zip` again, not `data.zip.zip`.  An
/// existing archive at the output path is refused unless `overwrite`
/// is set.  Returns the archive path.
pub fn pack_to_file(src: &Path, overwrite: bool) -> Result<PathBuf> {
    let base = src.as_os_str().to_string_lossy().into_owned();
    let suffix = format!(".{ARCHIVE_SUFFIX}");
    let base = base.strip_suffix(&suffix).unwrap_or(&base);
    let out = PathBuf::from(format!("{base}.{ARCHIVE_SUFFIX}"));

    if !overwrite && out.exists() {
        return Err(SaltboxError::OutputExists(out));
    }

    let file = File::create(&out)?;
    pack_path(src, BufWriter::new(file))?;
    Ok(out)
}

/// Pack `src` into an in-memory archive buffer.
pub fn pack_to_vec(src: &Path) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    pack_path(src, &mut cursor)?;
    Ok(cursor.into_inner())
}

/// Recursively add every regular file under `dir`, depth-first.
fn add_dir_entries<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    dir: &Path,
    root: &Path,
    options: SimpleFileOptions,
) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            add_dir_entries(zip, &path, root, options)?;
        } else if file_type.is_file() {
            let name = entry_name(&path, root)?;
            add_file_entry(zip, &path, name, options)?;
        }
        // Symlinks and other non-regular files are skipped.
    }
    Ok(())
}

fn add_file_entry<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &Path,
    name: String,
    options: SimpleFileOptions,
) -> Result<()> {
    zip.start_file(name, options).map_err(zip_error)?;
    let mut file = File::open(path)?;
    io::copy(&mut file, zip)?;
    Ok(())
}

/// Entry name: path relative to `root`, joined with `/` regardless of
/// the platform separator.
fn entry_name(path: &Path, root: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        SaltboxError::InvalidArchive(format!(
            "path {} is outside the archive root {}",
            path.display(),
            root.display()
        ))
    })?;

    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    Ok(parts.join("/"))
}

fn zip_error(e: zip::result::ZipError) -> SaltboxError {
    SaltboxError::InvalidArchive(e.to_string())
}
