//! AES-CBC with a fresh random IV per encryption
//!
//! The block cipher itself comes from the `aes` crate; this module only does
//! CBC chaining, PKCS#7 padding, IV generation and text encoding.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit};
use aes::{Aes128, Aes192, Aes256, Block};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;

use crate::encoding::{self, from_base64, from_hex, to_base64, to_hex};

/// AES block length in bytes
pub const BLOCK_LEN: usize = 16;

/// CBC initialization vector length in bytes
pub const IV_LEN: usize = BLOCK_LEN;

#[derive(Debug, PartialEq)]
pub enum Error {
    KeyLength(usize),
    IvLength(usize),
    CiphertextLength(usize),
    Padding,
    Encoding(encoding::Error),
    Utf8,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyLength(len) => {
                write!(f, "AES key must be 16, 24, or 32 bytes, got {}", len)
            }
            Error::IvLength(len) => write!(f, "IV must be {} bytes, got {}", IV_LEN, len),
            Error::CiphertextLength(len) => write!(
                f,
                "ciphertext must be a non-zero multiple of {} bytes, got {}",
                BLOCK_LEN, len
            ),
            Error::Padding => write!(f, "invalid PKCS#7 padding"),
            Error::Encoding(e) => write!(f, "encoding error: {}", e),
            Error::Utf8 => write!(f, "decrypted text is not valid UTF-8"),
        }
    }
}

/// Base64 ciphertext and the hex IV needed to decrypt it
#[derive(Clone, Debug, PartialEq)]
pub struct CipherResult {
    pub ciphertext: String,
    pub iv: String,
}

/// AES variant selected by key length
enum AesKey {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl AesKey {
    fn new(key: &[u8]) -> Result<Self, Error> {
        let bad_len = |_| Error::KeyLength(key.len());

        match key.len() {
            16 => Ok(AesKey::Aes128(Aes128::new_from_slice(key).map_err(bad_len)?)),
            24 => Ok(AesKey::Aes192(Aes192::new_from_slice(key).map_err(bad_len)?)),
            32 => Ok(AesKey::Aes256(Aes256::new_from_slice(key).map_err(bad_len)?)),
            len => Err(Error::KeyLength(len)),
        }
    }

    fn encrypt_block(&self, block: &mut Block) {
        match self {
            AesKey::Aes128(cipher) => cipher.encrypt_block(block),
            AesKey::Aes192(cipher) => cipher.encrypt_block(block),
            AesKey::Aes256(cipher) => cipher.encrypt_block(block),
        }
    }

    fn decrypt_block(&self, block: &mut Block) {
        match self {
            AesKey::Aes128(cipher) => cipher.decrypt_block(block),
            AesKey::Aes192(cipher) => cipher.decrypt_block(block),
            AesKey::Aes256(cipher) => cipher.decrypt_block(block),
        }
    }
}

/// Generate a random CBC IV from the operating system RNG
pub fn generate_iv() -> [u8; IV_LEN] {
    let mut iv = [0_u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);
    iv
}

/// PKCS#7 pad a message to a multiple of the block length
///
/// Block-aligned messages get a full block of padding.
pub fn pkcs7_pad(msg: &[u8]) -> Vec<u8> {
    let pad_len = BLOCK_LEN - msg.len() % BLOCK_LEN;
    let mut padded = Vec::with_capacity(msg.len() + pad_len);

    padded.extend_from_slice(msg);
    padded.resize(msg.len() + pad_len, pad_len as u8);
    padded
}

/// Strip and check PKCS#7 padding
pub fn pkcs7_unpad(padded: &[u8]) -> Result<&[u8], Error> {
    let pad_len = *padded.last().ok_or(Error::Padding)? as usize;
    if pad_len == 0 || pad_len > BLOCK_LEN || pad_len > padded.len() {
        return Err(Error::Padding);
    }

    let (msg, padding) = padded.split_at(padded.len() - pad_len);
    if padding.iter().any(|&b| b as usize != pad_len) {
        return Err(Error::Padding);
    }

    Ok(msg)
}

/// AES-CBC encrypt raw bytes with the given key and IV (PKCS#7 padded)
pub fn encrypt_with_iv(plaintext: &[u8], key: &[u8], iv: &[u8; IV_LEN]) -> Result<Vec<u8>, Error> {
    let cipher = AesKey::new(key)?;
    let padded = pkcs7_pad(plaintext);

    let mut res = Vec::with_capacity(padded.len());
    let mut prev_block = *iv;

    for chunk in padded.chunks(BLOCK_LEN) {
        let mut block = Block::clone_from_slice(chunk);
        for (b, p) in block.iter_mut().zip(prev_block.iter()) {
            *b ^= p;
        }

        cipher.encrypt_block(&mut block);

        prev_block.copy_from_slice(&block);
        res.extend_from_slice(&block);
    }

    Ok(res)
}

/// AES-CBC decrypt raw bytes with the given key and IV, removing PKCS#7 padding
pub fn decrypt_with_iv(ciphertext: &[u8], key: &[u8], iv: &[u8; IV_LEN]) -> Result<Vec<u8>, Error> {
    let cipher = AesKey::new(key)?;
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(Error::CiphertextLength(ciphertext.len()));
    }

    let mut res = Vec::with_capacity(ciphertext.len());
    let mut prev_block: &[u8] = iv;

    for chunk in ciphertext.chunks(BLOCK_LEN) {
        let mut block = Block::clone_from_slice(chunk);
        cipher.decrypt_block(&mut block);

        for (b, p) in block.iter_mut().zip(prev_block.iter()) {
            *b ^= p;
        }

        res.extend_from_slice(&block);
        prev_block = chunk;
    }

    let msg_len = pkcs7_unpad(&res)?.len();
    res.truncate(msg_len);

    Ok(res)
}

/// Encrypt text under a 16, 24, or 32 byte key with a fresh random IV
///
/// The IV is not secret, but must travel with the ciphertext and never
/// repeat under the same key. Uniqueness across calls is left to the RNG.
pub fn encrypt(text: &str, key: &str) -> Result<CipherResult, Error> {
    let iv = generate_iv();
    let ciphertext = encrypt_with_iv(text.as_bytes(), key.as_bytes(), &iv)?;

    debug!(
        key_bits = key.len() * 8,
        ciphertext_len = ciphertext.len(),
        "aes encrypted"
    );

    Ok(CipherResult {
        ciphertext: to_base64(&ciphertext),
        iv: to_hex(&iv),
    })
}

/// Decrypt Base64 ciphertext produced by [`encrypt`] with its hex IV
pub fn decrypt(ciphertext: &str, key: &str, iv: &str) -> Result<String, Error> {
    let iv_bytes = from_hex(iv).map_err(Error::Encoding)?;
    if iv_bytes.len() != IV_LEN {
        return Err(Error::IvLength(iv_bytes.len()));
    }

    let mut iv = [0_u8; IV_LEN];
    iv.copy_from_slice(&iv_bytes);

    let ciphertext = from_base64(ciphertext).map_err(Error::Encoding)?;
    let plaintext = decrypt_with_iv(&ciphertext, key.as_bytes(), &iv)?;

    String::from_utf8(plaintext).map_err(|_| Error::Utf8)
}
