use alloc::string::String;
use alloc::vec::Vec;

use super::{inverse_shift, shift_letter, Crypt, Error};

/// Vigenère cipher: the i-th letter moves by the i-th key letter, cycling the key
///
/// Only letters advance the key schedule; spaces, digits and punctuation
/// pass through without consuming a key position.
#[derive(Clone, Debug, PartialEq)]
pub struct Vigenere {
    shifts: Vec<u8>,
}

impl Vigenere {
    /// Create a Vigenère cipher from a case-insensitive letter key
    ///
    /// errors: returns Error on an empty key, or a key containing a non-letter
    pub fn new(key: &str) -> Result<Self, Error> {
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }

        let shifts = key
            .chars()
            .map(|c| match c {
                'a'..='z' => Ok(c as u8 - b'a'),
                'A'..='Z' => Ok(c as u8 - b'A'),
                _ => Err(Error::InvalidKey(c)),
            })
            .collect::<Result<Vec<u8>, Error>>()?;

        Ok(Self { shifts })
    }

    /// Per-position shifts derived from the key (a = 0, ..., z = 25)
    pub fn shifts(&self) -> &[u8] {
        &self.shifts
    }

    fn crypt(&self, text: &str, invert: bool) -> String {
        let mut key_idx = 0;

        text.chars()
            .map(|c| {
                if !c.is_ascii_alphabetic() {
                    return c;
                }

                let shift = self.shifts[key_idx % self.shifts.len()];
                key_idx += 1;

                if invert {
                    shift_letter(c, inverse_shift(shift))
                } else {
                    shift_letter(c, shift)
                }
            })
            .collect()
    }
}

impl Crypt for Vigenere {
    fn encrypt(&self, text: &str) -> String {
        self.crypt(text, false)
    }

    fn decrypt(&self, text: &str) -> String {
        self.crypt(text, true)
    }
}

pub fn vigenere_encrypt(text: &str, key: &str) -> Result<String, Error> {
    Ok(Vigenere::new(key)?.encrypt(text))
}

pub fn vigenere_decrypt(text: &str, key: &str) -> Result<String, Error> {
    Ok(Vigenere::new(key)?.decrypt(text))
}
