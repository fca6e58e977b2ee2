//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The container format fixes the KDF at PBKDF2 with HMAC-SHA-256 and
//! 10,000 iterations, matching `openssl enc -pbkdf2 -md sha256 -iter
//! 10000`.  Key and IV are carved out of a single derivation call so
//! both sides of the pipeline reconstruct them from nothing but the
//! password and the salt stored in the container header.

use hmac::Hmac;
use rand::RngCore;
use sha2::Sha256;
use zeroize::Zeroize;

use crate::errors::{Result, SaltboxError};

/// Length of the container salt in bytes (matches the OpenSSL format).
pub const SALT_LEN: usize = 8;

/// Length of the AES-256 key in bytes.
pub const KEY_LEN: usize = 32;

/// Length of the CBC initialization vector in bytes.
pub const IV_LEN: usize = 16;

/// PBKDF2 iteration count.  Fixed by the container format — changing it
/// would make existing containers undecryptable.
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// An AES-256 key and CBC IV derived together from one password + salt.
///
/// Both fields are wiped from memory on drop.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct KeyIv {
    pub key: [u8; KEY_LEN],
    pub iv: [u8; IV_LEN],
}

/// Derive `key_bits + iv_bits` of key material in a single PBKDF2 call.
///
/// Deterministic: the same password + salt always produce the same
/// bytes.  Bit counts that are not a multiple of 8 are rejected rather
/// than silently truncated.
pub fn derive_key_material(
    password: &[u8],
    salt: &[u8],
    key_bits: u32,
    iv_bits: u32,
) -> Result<Vec<u8>> {
    if key_bits % 8 != 0 || iv_bits % 8 != 0 {
        return Err(SaltboxError::KeyDerivationFailed(format!(
            "requested bit lengths must be multiples of 8 (got key={key_bits}, iv={iv_bits})"
        )));
    }

    let out_len = ((key_bits + iv_bits) / 8) as usize;
    let mut out = vec![0u8; out_len];

    pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, PBKDF2_ITERATIONS, &mut out)
        .map_err(|e| SaltboxError::KeyDerivationFailed(format!("PBKDF2 failed: {e}")))?;

    Ok(out)
}

/// Derive the AES-256 key and CBC IV for a container.
///
/// Requests 384 bits in one call and splits them key-first, IV-second.
/// The IV is never stored — decryption re-derives it from the same
/// password + salt.
pub fn derive_key_iv(password: &[u8], salt: &[u8; SALT_LEN]) -> Result<KeyIv> {
    let mut material = derive_key_material(
        password,
        salt,
        (KEY_LEN * 8) as u32,
        (IV_LEN * 8) as u32,
    )?;

    let mut key = [0u8; KEY_LEN];
    let mut iv = [0u8; IV_LEN];
    key.copy_from_slice(&material[..KEY_LEN]);
    iv.copy_from_slice(&material[KEY_LEN..]);
    material.zeroize();

    Ok(KeyIv { key, iv })
}

/// Generate a cryptographically random 8-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}
