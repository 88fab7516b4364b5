#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod anonymize;
pub mod cipher;
pub mod encoding;
pub mod entropy;
pub mod language;
pub mod password;
pub mod privacy;
pub mod symmetric;
pub mod validate;

pub use cipher::{Caesar, Crypt, Vigenere};
pub use entropy::{compare_entropy, entropy};
pub use language::{break_caesar, frequencies, Attempt, FrequencyTable};
pub use password::{hash_password, verify_password, PasswordSession};
pub use privacy::{privatize, DpParams};
pub use validate::validate;
