//! Integration tests for archive packing, unpacking, and sniffing.

use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use saltbox::archive::{
    is_archive, pack_to_file, pack_to_vec, path_is_archive, unpack, unpack_into, SinkResolver,
};
use saltbox::errors::{Result, SaltboxError};
use tempfile::TempDir;
use zip::ZipArchive;

/// Build a small tree:
///   project/a.txt       = "hello"
///   project/sub/b.txt   = "world"
fn sample_tree(root: &Path) -> std::path::PathBuf {
    let project = root.join("project");
    fs::create_dir_all(project.join("sub")).unwrap();
    fs::write(project.join("a.txt"), b"hello").unwrap();
    fs::write(project.join("sub").join("b.txt"), b"world").unwrap();
    project
}

fn entry_names(archive_bytes: &[u8]) -> Vec<String> {
    let mut archive = ZipArchive::new(Cursor::new(archive_bytes)).unwrap();
    (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Packing
// ---------------------------------------------------------------------------

#[test]
fn packing_a_directory_names_entries_relative_to_its_parent() {
    let tmp = TempDir::new().unwrap();
    let project = sample_tree(tmp.path());

    let bytes = pack_to_vec(&project).expect("pack");
    let names = entry_names(&bytes);

    // Depth-first, sorted at each level; the top-level name survives.
    assert_eq!(names, vec!["project/a.txt", "project/sub/b.txt"]);
}

#[test]
fn packing_a_single_file_uses_its_base_name() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("report.pdf");
    fs::write(&file, b"%PDF-fake").unwrap();

    let bytes = pack_to_vec(&file).expect("pack");
    assert_eq!(entry_names(&bytes), vec!["report.pdf"]);
}

#[test]
fn packing_a_missing_path_fails() {
    let tmp = TempDir::new().unwrap();
    assert!(pack_to_vec(&tmp.path().join("ghost")).is_err());
}

#[test]
fn pack_to_file_writes_a_sibling_zip() {
    let tmp = TempDir::new().unwrap();
    let project = sample_tree(tmp.path());

    let archive = pack_to_file(&project, false).expect("pack");
    assert_eq!(archive, tmp.path().join("project.zip"));
    assert!(path_is_archive(&archive));
}

#[test]
fn pack_to_file_does_not_stack_zip_suffixes() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("bundle.zip");
    fs::write(&file, b"not actually a zip yet").unwrap();

    // The source itself occupies the output path, so this needs the
    // overwrite opt-in.
    let archive = pack_to_file(&file, true).expect("pack");
    assert_eq!(archive, tmp.path().join("bundle.zip"));
}

#[test]
fn pack_to_file_refuses_an_existing_archive_without_overwrite() {
    let tmp = TempDir::new().unwrap();
    let project = sample_tree(tmp.path());
    fs::write(tmp.path().join("project.zip"), b"old archive").unwrap();

    let result = pack_to_file(&project, false);
    assert!(matches!(result, Err(SaltboxError::OutputExists(_))));
    assert_eq!(
        fs::read(tmp.path().join("project.zip")).unwrap(),
        b"old archive"
    );

    let archive = pack_to_file(&project, true).expect("pack with overwrite");
    assert!(path_is_archive(&archive));
}

#[cfg(unix)]
#[test]
fn unreadable_file_aborts_the_pack() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("locked");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("open.txt"), b"fine").unwrap();
    let sealed = dir.join("sealed.txt");
    fs::write(&sealed, b"no peeking").unwrap();
    fs::set_permissions(&sealed, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits do not bind root; nothing to check in that case.
    if fs::File::open(&sealed).is_ok() {
        return;
    }

    let result = pack_to_vec(&dir);
    assert!(matches!(result, Err(SaltboxError::Io(_))));
}

// ---------------------------------------------------------------------------
// Unpacking
// ---------------------------------------------------------------------------

#[test]
fn unpack_recreates_the_tree() {
    let tmp = TempDir::new().unwrap();
    let project = sample_tree(tmp.path());
    let bytes = pack_to_vec(&project).expect("pack");

    let out = TempDir::new().unwrap();
    unpack_into(Cursor::new(bytes), out.path(), false).expect("unpack");

    assert_eq!(fs::read(out.path().join("project/a.txt")).unwrap(), b"hello");
    assert_eq!(
        fs::read(out.path().join("project/sub/b.txt")).unwrap(),
        b"world"
    );
}

/// Resolver that collects every file entry into an in-memory map.
struct MemoryResolver {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

struct MemorySink {
    name: String,
    buf: Vec<u8>,
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl Write for MemorySink {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Drop for MemorySink {
    fn drop(&mut self) {
        self.files
            .lock()
            .unwrap()
            .insert(self.name.clone(), std::mem::take(&mut self.buf));
    }
}

impl SinkResolver for MemoryResolver {
    fn resolve(&mut self, name: &str, is_dir: bool) -> Result<Option<Box<dyn Write>>> {
        if is_dir {
            return Ok(None);
        }
        Ok(Some(Box::new(MemorySink {
            name: name.to_string(),
            buf: Vec::new(),
            files: Arc::clone(&self.files),
        })))
    }
}

#[test]
fn unpack_works_with_in_memory_sinks() {
    let tmp = TempDir::new().unwrap();
    let project = sample_tree(tmp.path());
    let bytes = pack_to_vec(&project).expect("pack");

    let files = Arc::new(Mutex::new(HashMap::new()));
    let mut resolver = MemoryResolver {
        files: Arc::clone(&files),
    };
    unpack(Cursor::new(bytes), &mut resolver).expect("unpack");

    let files = files.lock().unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files["project/a.txt"], b"hello");
    assert_eq!(files["project/sub/b.txt"], b"world");
}

/// Resolver that skips everything by returning `None`.
struct SkipAll;

impl SinkResolver for SkipAll {
    fn resolve(&mut self, _name: &str, _is_dir: bool) -> Result<Option<Box<dyn Write>>> {
        Ok(None)
    }
}

#[test]
fn resolver_returning_none_skips_file_entries() {
    let tmp = TempDir::new().unwrap();
    let project = sample_tree(tmp.path());
    let bytes = pack_to_vec(&project).expect("pack");

    // Skipping everything is not an error and writes nothing.
    unpack(Cursor::new(bytes), &mut SkipAll).expect("unpack");
}

#[test]
fn unpack_rejects_garbage_input() {
    let out = TempDir::new().unwrap();
    let result = unpack_into(Cursor::new(b"not a zip at all".to_vec()), out.path(), false);
    assert!(result.is_err());
}

#[test]
fn unpack_refuses_existing_files_without_overwrite() {
    let tmp = TempDir::new().unwrap();
    let project = sample_tree(tmp.path());
    let bytes = pack_to_vec(&project).expect("pack");

    let out = TempDir::new().unwrap();
    unpack_into(Cursor::new(bytes.clone()), out.path(), false).expect("first unpack");

    let result = unpack_into(Cursor::new(bytes.clone()), out.path(), false);
    assert!(matches!(result, Err(SaltboxError::OutputExists(_))));

    unpack_into(Cursor::new(bytes), out.path(), true).expect("unpack with overwrite");
}

/// Byte offset of the `nth` (1-based) local file header in a zip buffer.
fn local_header_offset(bytes: &[u8], nth: usize) -> usize {
    let sig = [0x50, 0x4B, 0x03, 0x04];
    let mut seen = 0;
    for i in 0..bytes.len() - 3 {
        if bytes[i..i + 4] == sig {
            seen += 1;
            if seen == nth {
                return i;
            }
        }
    }
    panic!("archive has fewer than {nth} entries");
}

#[test]
fn corrupted_entry_aborts_but_keeps_earlier_files() {
    let tmp = TempDir::new().unwrap();
    let project = sample_tree(tmp.path());
    let mut bytes = pack_to_vec(&project).expect("pack");

    // Flip the first data byte of the second entry so its stream no
    // longer decodes.  Local header layout: name length at 26..28,
    // extra length at 28..30, data after the 30-byte header plus both.
    let header = local_header_offset(&bytes, 2);
    let name_len = u16::from_le_bytes([bytes[header + 26], bytes[header + 27]]) as usize;
    let extra_len = u16::from_le_bytes([bytes[header + 28], bytes[header + 29]]) as usize;
    bytes[header + 30 + name_len + extra_len] ^= 0xFF;

    let out = TempDir::new().unwrap();
    let result = unpack_into(Cursor::new(bytes), out.path(), false);
    assert!(result.is_err(), "a corrupted entry must abort the unpack");

    // The entry extracted before the corruption stays on disk.
    assert_eq!(fs::read(out.path().join("project/a.txt")).unwrap(), b"hello");
    // The corrupted entry never lands intact.
    let partial = fs::read(out.path().join("project/sub/b.txt")).unwrap_or_default();
    assert_ne!(partial, b"world");
}

// ---------------------------------------------------------------------------
// Sniffing
// ---------------------------------------------------------------------------

#[test]
fn sniffer_truth_table() {
    assert!(is_archive(&[0x50, 0x4B, 0x03, 0x04]));
    assert!(is_archive(&[0x50, 0x4B, 0x03, 0x04, 0x14, 0x00]));

    assert!(!is_archive(&[]));
    assert!(!is_archive(&[0x50, 0x4B]));
    assert!(!is_archive(&[0x50, 0x4B, 0x03, 0x05]));
    assert!(!is_archive(b"Salted__ not a zip"));
}

#[test]
fn packed_output_sniffs_as_archive() {
    let tmp = TempDir::new().unwrap();
    let project = sample_tree(tmp.path());

    let bytes = pack_to_vec(&project).expect("pack");
    assert!(is_archive(&bytes));
}

#[test]
fn path_sniffer_handles_short_and_missing_files() {
    let tmp = TempDir::new().unwrap();

    let short = tmp.path().join("short.bin");
    fs::write(&short, [0x50, 0x4B]).unwrap();
    assert!(!path_is_archive(&short));

    assert!(!path_is_archive(&tmp.path().join("missing.bin")));
}
