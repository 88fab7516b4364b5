use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::encoding::to_hex;
use crate::validate::{self, validate};

/// Number of random bytes in a salt (hex-encoded to twice as many characters)
pub const SALT_LEN: usize = 8;

#[derive(Debug, PartialEq)]
pub enum Error {
    Validation(validate::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(e) => write!(f, "invalid password: {}", e),
        }
    }
}

/// Generate a random hex salt from the operating system RNG
pub fn generate_salt() -> String {
    generate_salt_with(&mut OsRng)
}

/// Generate a random hex salt from the given RNG
pub fn generate_salt_with<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut salt = [0_u8; SALT_LEN];
    rng.fill_bytes(&mut salt);
    to_hex(&salt)
}

/// Hex-encoded SHA-256 digest of the salt followed by the password
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut input: Vec<u8> = Vec::with_capacity(salt.len() + password.len());

    input.extend_from_slice(salt.as_bytes());
    input.extend_from_slice(password.as_bytes());

    to_hex(Sha256::digest(&input).as_slice())
}

/// Recompute the salted digest and compare it against the stored one
pub fn verify_password(password: &str, salt: &str, expected: &str) -> bool {
    constant_eq(hash_password(password, salt).as_bytes(), expected.as_bytes())
}

/// Constant-time comparison of two byte slices
///
/// Returns true if slice lengths and bytes are equal
pub fn constant_eq(el: &[u8], ar: &[u8]) -> bool {
    let mut res = 0_u8;

    for (ebl, abl) in (el.len() as u64)
        .to_le_bytes()
        .iter()
        .zip((ar.len() as u64).to_le_bytes().iter())
    {
        res |= ebl ^ abl;
    }

    for (eb, ab) in el.iter().zip(ar.iter()) {
        res |= eb ^ ab;
    }

    res == 0
}

/// Where a two-step password check currently stands
#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    AwaitingFirstEntry,
    AwaitingConfirmation { salt: String, digest: String },
    Done { verified: bool },
}

/// Outcome of one password entry
#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    /// First entry hashed; enter the password again to verify
    Hashed { salt: String, digest: String },
    /// Second entry checked against the first; the salt is discarded
    Verified(bool),
}

/// Caller-owned hash-then-verify flow
///
/// The first entry is salted and hashed, the second is verified against it.
/// Submitting after a verification starts a new round with a fresh salt.
#[derive(Debug)]
pub struct PasswordSession {
    state: SessionState,
}

impl PasswordSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::AwaitingFirstEntry,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Abandon any pending salt and digest
    pub fn reset(&mut self) {
        debug!("password session reset");
        self.state = SessionState::AwaitingFirstEntry;
    }

    /// Submit a password entry, salting with the operating system RNG
    pub fn submit(&mut self, password: &str) -> Result<Step, Error> {
        self.submit_with(password, &mut OsRng)
    }

    /// Submit a password entry
    ///
    /// errors: invalid entries are rejected and leave the session untouched
    pub fn submit_with<R: RngCore + ?Sized>(
        &mut self,
        password: &str,
        rng: &mut R,
    ) -> Result<Step, Error> {
        let password = validate(password).map_err(Error::Validation)?;

        match &self.state {
            SessionState::AwaitingConfirmation { salt, digest } => {
                let verified = verify_password(password, salt, digest);
                debug!(verified, "password session verified");

                self.state = SessionState::Done { verified };
                Ok(Step::Verified(verified))
            }
            SessionState::AwaitingFirstEntry | SessionState::Done { .. } => {
                let salt = generate_salt_with(rng);
                let digest = hash_password(password, &salt);
                debug!("password session awaiting confirmation");

                self.state = SessionState::AwaitingConfirmation {
                    salt: salt.clone(),
                    digest: digest.clone(),
                };
                Ok(Step::Hashed { salt, digest })
            }
        }
    }
}

impl Default for PasswordSession {
    fn default() -> Self {
        Self::new()
    }
}
