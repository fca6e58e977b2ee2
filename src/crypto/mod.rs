//! Cryptographic primitives for saltbox.
//!
//! This module provides:
//! - AES-256-CBC streaming encryption and decryption (`cipher`)
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)

pub mod cipher;
pub mod kdf;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive_key_iv, encrypt_stream, ...};
pub use cipher::{decrypt_stream, encrypt_stream, BLOCK_LEN};
pub use kdf::{derive_key_iv, derive_key_material, generate_salt, KeyIv, SALT_LEN};
