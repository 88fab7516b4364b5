use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[derive(Debug, PartialEq)]
pub enum Error {
    Base64Length,
    HexLength,
    InvalidBase64(u8),
    InvalidHex(u8),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Base64Length => write!(f, "Base64 length must be a non-zero multiple of four"),
            Error::HexLength => write!(f, "hex length must be a non-zero multiple of two"),
            Error::InvalidBase64(b) => write!(f, "invalid Base64 byte 0x{:02x}", b),
            Error::InvalidHex(b) => write!(f, "invalid hex byte 0x{:02x}", b),
        }
    }
}

const HEX_ALPHABET: &[u8; 16] = b"0123456789abcdef";

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

// ASCII byte value for "="
const PAD: u8 = 0x3d;

/// Lowercase hex-encode a byte slice
pub fn to_hex(bytes: &[u8]) -> String {
    let mut res = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        res.push(HEX_ALPHABET[(byte >> 4) as usize] as char);
        res.push(HEX_ALPHABET[(byte & 0x0f) as usize] as char);
    }
    res
}

/// Hex-decode a string (either case)
///
/// errors: returns Error on odd length, empty strings and non-hex characters
pub fn from_hex(hex: &str) -> Result<Vec<u8>, Error> {
    let hex = hex.as_bytes();
    if hex.is_empty() || hex.len() % 2 != 0 {
        return Err(Error::HexLength);
    }

    hex.chunks(2)
        .map(|pair| -> Result<u8, Error> {
            Ok((from_hex_digit(pair[0])? << 4) | from_hex_digit(pair[1])?)
        })
        .collect()
}

fn from_hex_digit(digit: u8) -> Result<u8, Error> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(Error::InvalidHex(digit)),
    }
}

/// Base64 encode a byte slice (standard alphabet, padded)
pub fn to_base64(bytes: &[u8]) -> String {
    let mut b64 = String::with_capacity((bytes.len() + 2) / 3 * 4);

    // three input bytes become four six-bit indexes into the alphabet
    for group in bytes.chunks(3) {
        let byte_1 = group[0];
        let byte_2 = group.get(1).copied().unwrap_or(0);
        let byte_3 = group.get(2).copied().unwrap_or(0);

        b64.push(BASE64_ALPHABET[(byte_1 >> 2) as usize] as char);
        b64.push(BASE64_ALPHABET[(((byte_1 & 0x03) << 4) | (byte_2 >> 4)) as usize] as char);

        if group.len() > 1 {
            b64.push(BASE64_ALPHABET[(((byte_2 & 0x0f) << 2) | (byte_3 >> 6)) as usize] as char);
        } else {
            b64.push(PAD as char);
        }

        if group.len() > 2 {
            b64.push(BASE64_ALPHABET[(byte_3 & 0x3f) as usize] as char);
        } else {
            b64.push(PAD as char);
        }
    }

    b64
}

/// Decode a padded Base64 string
///
/// errors: returns Error for invalid length, misplaced padding, or bytes outside the alphabet
pub fn from_base64(b64: &str) -> Result<Vec<u8>, Error> {
    let bytes = b64.as_bytes();
    let bytes_len = bytes.len();
    if bytes_len == 0 || bytes_len % 4 != 0 {
        return Err(Error::Base64Length);
    }

    let pad_len = bytes.iter().rev().take_while(|&&b| b == PAD).count();
    if pad_len > 2 {
        return Err(Error::InvalidBase64(PAD));
    }

    let mut res = Vec::with_capacity(bytes_len / 4 * 3);
    for group in bytes[..bytes_len - pad_len].chunks(4) {
        let mut acc = 0_u32;
        for &b in group {
            acc = (acc << 6) | from_base64_byte(b)? as u32;
        }
        // left-align a short final group into 24 bits
        acc <<= 6 * (4 - group.len()) as u32;

        let decoded = [(acc >> 16) as u8, (acc >> 8) as u8, acc as u8];
        // n six-bit digits carry floor(6n / 8) whole bytes
        res.extend_from_slice(&decoded[..group.len() * 6 / 8]);
    }

    Ok(res)
}

/// Index of the encoded byte in the Base64 alphabet
fn from_base64_byte(byte: u8) -> Result<u8, Error> {
    match byte {
        b'A'..=b'Z' => Ok(byte - b'A'),
        b'a'..=b'z' => Ok(byte - b'a' + 26),
        b'0'..=b'9' => Ok(byte - b'0' + 52),
        b'+' => Ok(62),
        b'/' => Ok(63),
        _ => Err(Error::InvalidBase64(byte)),
    }
}
