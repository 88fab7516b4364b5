use alloc::string::String;

use super::{inverse_shift, normalize_shift, shift_letter, Crypt};

/// Caesar cipher: every letter moves the same number of places
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Caesar {
    shift: u8,
}

impl Caesar {
    /// Create a Caesar cipher, reducing the shift modulo 26 (negative shifts included)
    pub fn new(shift: i64) -> Self {
        Self {
            shift: normalize_shift(shift),
        }
    }

    pub fn shift(&self) -> u8 {
        self.shift
    }
}

impl Crypt for Caesar {
    fn encrypt(&self, text: &str) -> String {
        text.chars().map(|c| shift_letter(c, self.shift)).collect()
    }

    fn decrypt(&self, text: &str) -> String {
        let shift = inverse_shift(self.shift);
        text.chars().map(|c| shift_letter(c, shift)).collect()
    }
}

pub fn caesar_encrypt(text: &str, shift: i64) -> String {
    Caesar::new(shift).encrypt(text)
}

pub fn caesar_decrypt(text: &str, shift: i64) -> String {
    Caesar::new(shift).decrypt(text)
}
