//! The encrypted container: on-disk format and the operations that
//! produce and consume it.

pub mod format;
pub mod ops;

pub use format::{ARCHIVE_SUFFIX, CLEARED_SUFFIX, CONTAINER_SUFFIX, MAGIC};
pub use ops::{
    decrypt_container, decrypt_file, encrypt_file, encrypt_to_container, pack_and_encrypt,
    DecryptOutcome,
};
