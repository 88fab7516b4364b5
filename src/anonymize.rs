use alloc::format;
use alloc::string::String;
use core::fmt;

#[derive(Debug, PartialEq)]
pub enum Error {
    InvalidEmail,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidEmail => write!(f, "email must have a local part and an '@'"),
        }
    }
}

/// Personal data with identifying parts masked out
#[derive(Clone, Debug, PartialEq)]
pub struct AnonymizedRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Last `n` characters of a string, or all of it when shorter
fn tail(text: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }

    match text.char_indices().rev().nth(n - 1) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}

/// Mask a name down to its last three characters
pub fn mask_name(name: &str) -> String {
    format!("***{}", tail(name, 3))
}

/// Keep the first character of the local part and the domain of an email
///
/// The domain runs from the first `@` up to the next one, if any.
pub fn mask_email(email: &str) -> Result<String, Error> {
    let at = email.find('@').ok_or(Error::InvalidEmail)?;
    let first = email[..at].chars().next().ok_or(Error::InvalidEmail)?;

    let rest = &email[at + 1..];
    let domain = rest.find('@').map_or(rest, |end| &rest[..end]);

    Ok(format!("{}***@{}", first, domain))
}

/// Mask a phone number down to its last four characters
pub fn mask_phone(phone: &str) -> String {
    format!("XXX-XXX-{}", tail(phone, 4))
}

pub fn anonymize(name: &str, email: &str, phone: &str) -> Result<AnonymizedRecord, Error> {
    Ok(AnonymizedRecord {
        name: mask_name(name),
        email: mask_email(email)?,
        phone: mask_phone(phone),
    })
}
