//! AES-256-CBC streaming encryption and decryption.
//!
//! Both directions work block-at-a-time over `Read`/`Write`, so
//! arbitrarily large inputs are processed with a fixed-size working
//! buffer.  Padding is PKCS#5/7: encryption always appends 1..=16
//! padding bytes, so ciphertext length is the plaintext length rounded
//! up to the next multiple of 16.
//!
//! There is no integrity tag in this format.  A wrong key or IV shows
//! up as an invalid final padding block, surfaced as
//! `SaltboxError::BadPadding`.

use std::io::{BufReader, BufWriter, Read, Write};

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes256Dec, Aes256Enc, Block};

use crate::crypto::kdf::KeyIv;
use crate::errors::{Result, SaltboxError};

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// Encrypt `reader` into `writer` with AES-256-CBC and PKCS#7 padding.
///
/// Returns the number of ciphertext bytes written.  The final block is
/// always a (possibly full) padding block, so output length is
/// `(input_len / 16 + 1) * 16`.
pub fn encrypt_stream<R: Read, W: Write>(reader: R, writer: W, key_iv: &KeyIv) -> Result<u64> {
    let mut reader = BufReader::new(reader);
    let mut writer = BufWriter::new(writer);

    let cipher = Aes256Enc::new(&key_iv.key.into());
    let mut prev = Block::from(key_iv.iv);
    let mut written = 0u64;

    loop {
        let mut buf = [0u8; BLOCK_LEN];
        let n = fill_block(&mut reader, &mut buf)?;

        let is_final = n < BLOCK_LEN;
        if is_final {
            // PKCS#7: pad with the pad length itself.  A block-aligned
            // input gets a full 16-byte padding block.
            let pad = (BLOCK_LEN - n) as u8;
            buf[n..].fill(pad);
        }

        // CBC chaining: XOR with the previous ciphertext block.
        for (b, p) in buf.iter_mut().zip(prev.iter()) {
            *b ^= p;
        }

        let mut block = Block::from(buf);
        cipher.encrypt_block(&mut block);
        writer.write_all(&block)?;
        written += BLOCK_LEN as u64;
        prev = block;

        if is_final {
            break;
        }
    }

    writer.flush()?;
    Ok(written)
}

/// Decrypt `reader` into `writer`, validating and stripping the PKCS#7
/// padding from the final block.
///
/// Returns the number of plaintext bytes written.  Fails with
/// `BadPadding` when the ciphertext is empty, not block-aligned, or the
/// final block does not unpad — the canonical wrong-password signal.
pub fn decrypt_stream<R: Read, W: Write>(reader: R, writer: W, key_iv: &KeyIv) -> Result<u64> {
    let mut reader = BufReader::new(reader);
    let mut writer = BufWriter::new(writer);

    let cipher = Aes256Dec::new(&key_iv.key.into());
    let mut prev = Block::from(key_iv.iv);

    // The last decrypted block is held back until EOF so its padding
    // can be stripped instead of written.
    let mut held: Option<[u8; BLOCK_LEN]> = None;
    let mut written = 0u64;

    loop {
        let mut buf = [0u8; BLOCK_LEN];
        let n = fill_block(&mut reader, &mut buf)?;
        if n == 0 {
            break;
        }
        if n < BLOCK_LEN {
            // Ciphertext length must be a multiple of the block size.
            return Err(SaltboxError::BadPadding);
        }

        if let Some(plain) = held.take() {
            writer.write_all(&plain)?;
            written += BLOCK_LEN as u64;
        }

        let ciphertext = Block::from(buf);
        let mut block = ciphertext;
        cipher.decrypt_block(&mut block);
        for (b, p) in block.iter_mut().zip(prev.iter()) {
            *b ^= p;
        }
        prev = ciphertext;
        held = Some(block.into());
    }

    // Empty ciphertext can never carry a valid padding block.
    let last = held.ok_or(SaltboxError::BadPadding)?;
    let pad = last[BLOCK_LEN - 1] as usize;
    if pad == 0 || pad > BLOCK_LEN {
        return Err(SaltboxError::BadPadding);
    }
    if last[BLOCK_LEN - pad..].iter().any(|&b| b as usize != pad) {
        return Err(SaltboxError::BadPadding);
    }

    writer.write_all(&last[..BLOCK_LEN - pad])?;
    written += (BLOCK_LEN - pad) as u64;

    writer.flush()?;
    Ok(written)
}

/// Read from `reader` until `buf` is full or EOF is reached.
///
/// Returns the number of bytes read, which is only less than
/// `buf.len()` at end of input.
fn fill_block<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
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
