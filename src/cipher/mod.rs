use alloc::string::String;
use core::fmt;

// Shift (Caesar) substitution
mod caesar;

pub use caesar::*;

// Keyword (Vigenère) substitution
mod vigenere;

pub use vigenere::*;

/// Number of letters in the substitution alphabet
pub const ALPHABET_LEN: u8 = 26;

#[derive(Debug, PartialEq)]
pub enum Error {
    EmptyKey,
    InvalidKey(char),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyKey => write!(f, "cipher key must not be empty"),
            Error::InvalidKey(c) => write!(f, "cipher key may only contain letters, found {:?}", c),
        }
    }
}

/// Encrypt/decrypt capability shared by the substitution ciphers
pub trait Crypt {
    fn encrypt(&self, text: &str) -> String;

    fn decrypt(&self, text: &str) -> String;
}

/// Reduce any integer shift into [0, 25]
pub fn normalize_shift(shift: i64) -> u8 {
    shift.rem_euclid(ALPHABET_LEN as i64) as u8
}

/// Shift an ASCII letter forward by `shift` places, preserving case
///
/// Every other character is returned unchanged.
pub(crate) fn shift_letter(c: char, shift: u8) -> char {
    let base = match c {
        'a'..='z' => b'a',
        'A'..='Z' => b'A',
        _ => return c,
    };

    let index = c as u8 - base;
    (base + (index + shift % ALPHABET_LEN) % ALPHABET_LEN) as char
}

/// Shift that undoes `shift`
pub(crate) fn inverse_shift(shift: u8) -> u8 {
    (ALPHABET_LEN - shift % ALPHABET_LEN) % ALPHABET_LEN
}
