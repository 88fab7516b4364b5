use proptest::prelude::*;

use cryptolab::anonymize::anonymize;
use cryptolab::password::{generate_salt, SessionState, Step};
use cryptolab::symmetric::{self, decrypt, encrypt, CipherResult};
use cryptolab::validate::validate_aes_key;
use cryptolab::{entropy, hash_password, verify_password, PasswordSession};

proptest! {
    #[test]
    fn hash_is_deterministic(password in "[A-Za-z0-9 ]{0,20}", salt in "[0-9a-f]{16}") {
        prop_assert_eq!(hash_password(&password, &salt), hash_password(&password, &salt));
        prop_assert!(verify_password(&password, &salt, &hash_password(&password, &salt)));
    }

    #[test]
    fn single_character_change_fails(password in "[a-z]{1,20}", idx in 0_usize..20) {
        let salt = generate_salt();
        let digest = hash_password(&password, &salt);

        let idx = idx % password.len();
        let mut changed: Vec<u8> = password.clone().into_bytes();
        changed[idx] = if changed[idx] == b'z' { b'a' } else { changed[idx] + 1 };
        let changed = String::from_utf8(changed).unwrap();

        prop_assert!(!verify_password(&changed, &salt, &digest));
    }

    #[test]
    fn aes_round_trip(text in "\\PC{0,100}") {
        let key = "0123456789abcdef0123456789abcdef";
        let CipherResult { ciphertext, iv } = encrypt(&text, key).unwrap();
        prop_assert_eq!(decrypt(&ciphertext, key, &iv).unwrap(), text);
    }
}

#[test]
fn salts_differ_per_session() {
    let mut first = PasswordSession::new();
    let mut second = PasswordSession::new();

    let salt_of = |step: Step| match step {
        Step::Hashed { salt, .. } => salt,
        step => panic!("unexpected step: {:?}", step),
    };

    let one = salt_of(first.submit("mypassword").unwrap());
    let two = salt_of(second.submit("mypassword").unwrap());
    assert_ne!(one, two);
}

#[test]
fn session_round_trip() {
    let mut session = PasswordSession::default();

    assert!(matches!(session.submit("correct horse").unwrap(), Step::Hashed { .. }));
    assert!(matches!(session.state(), SessionState::AwaitingConfirmation { .. }));
    assert_eq!(session.submit("correct horse").unwrap(), Step::Verified(true));

    assert!(matches!(session.submit("correct horse").unwrap(), Step::Hashed { .. }));
    assert_eq!(session.submit("correct h0rse").unwrap(), Step::Verified(false));
    assert_eq!(*session.state(), SessionState::Done { verified: false });
}

#[test]
fn aes_key_contract() {
    for key in ["0123456789abcdef", "0123456789abcdef01234567", "0123456789abcdef0123456789abcdef"].iter() {
        assert!(validate_aes_key(key).is_ok());
        assert!(encrypt("hello", key).is_ok());
    }

    for key in ["", "short", "0123456789abcdef0"].iter() {
        assert!(validate_aes_key(key).is_err());
        assert_eq!(encrypt("hello", key), Err(symmetric::Error::KeyLength(key.len())));
    }
}

#[test]
fn ciphertext_has_more_entropy_than_plaintext() {
    let plaintext = "aaaa bbbb aaaa bbbb";
    let CipherResult { ciphertext, .. } = encrypt(plaintext, "0123456789abcdef").unwrap();

    assert!(entropy(&ciphertext) > entropy(plaintext));
}

#[test]
fn anonymized_record() {
    let record = anonymize("Jonathan", "jonathan@mail.org", "555-867-5309").unwrap();

    assert_eq!(record.name, "***han");
    assert_eq!(record.email, "j***@mail.org");
    assert_eq!(record.phone, "XXX-XXX-5309");
}
