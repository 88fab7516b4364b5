use core::fmt;

use tracing::debug;

/// Longest accepted free-text input, in characters
pub const DEFAULT_MAX_LENGTH: usize = 20;

/// Valid AES key lengths in bytes (AES-128, AES-192, AES-256)
pub const AES_KEY_LENGTHS: [usize; 3] = [16, 24, 32];

#[derive(Debug, PartialEq)]
pub enum Error {
    TooLong { len: usize, max: usize },
    InvalidCharacter(char),
    AesKeyLength(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TooLong { len, max } => {
                write!(f, "input is {} characters, at most {} allowed", len, max)
            }
            Error::InvalidCharacter(c) => write!(
                f,
                "invalid character {:?}: only letters, numbers, and spaces allowed",
                c
            ),
            Error::AesKeyLength(len) => {
                write!(f, "AES key must be 16, 24, or 32 characters, got {}", len)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValidatorConfig {
    pub max_length: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Validate free text with the default configuration
pub fn validate(text: &str) -> Result<&str, Error> {
    validate_with(text, &ValidatorConfig::default())
}

/// Constrain free text to ASCII letters, digits and whitespace, at most `max_length` characters
///
/// The empty string is valid.
pub fn validate_with<'a>(text: &'a str, config: &ValidatorConfig) -> Result<&'a str, Error> {
    let len = text.chars().count();
    if len > config.max_length {
        debug!(len, max = config.max_length, "rejected input: too long");
        return Err(Error::TooLong {
            len,
            max: config.max_length,
        });
    }

    if let Some(bad) = text.chars().find(|&c| !is_allowed(c)) {
        debug!(len, "rejected input: disallowed character");
        return Err(Error::InvalidCharacter(bad));
    }

    Ok(text)
}

/// Check an AES key is exactly 16, 24, or 32 bytes
pub fn validate_aes_key(key: &str) -> Result<&str, Error> {
    if AES_KEY_LENGTHS.contains(&key.len()) {
        Ok(key)
    } else {
        debug!(len = key.len(), "rejected AES key length");
        Err(Error::AesKeyLength(key.len()))
    }
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace()
}
