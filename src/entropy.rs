use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;
use libm::log2;
use rand::{thread_rng, Rng};

use crate::cipher::{self, caesar_encrypt, vigenere_encrypt};

/// English sample shared by the plain and enciphered entries of [`compare_entropy`]
pub const SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog";

/// Shift used for the Caesar sample
pub const SAMPLE_SHIFT: i64 = 3;

/// Key used for the Vigenère sample
pub const SAMPLE_KEY: &str = "KEY";

/// Length of the uniformly random uppercase sample
pub const RANDOM_SAMPLE_LEN: usize = 40;

const REPEATED_SAMPLE_LEN: usize = 38;

/// Count every character of the lowercased text
///
/// Returns the per-symbol counts and the total number of symbols counted.
pub fn symbol_counts(text: &str) -> (HashMap<char, usize>, usize) {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut total = 0_usize;

    for c in text.chars().flat_map(char::to_lowercase) {
        *counts.entry(c).or_insert(0) += 1;
        total += 1;
    }

    (counts, total)
}

/// Shannon entropy, in bits per symbol, over all characters of the text (case-folded)
///
/// Returns 0 for empty text. The result lies in [0, log2(distinct symbols)].
pub fn entropy(text: &str) -> f64 {
    let (counts, total) = symbol_counts(text);
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    let entropy = counts
        .values()
        .map(|&count| count as f64 / total)
        .filter(|&p| p > 0.0)
        .fold(0.0_f64, |acc, p| acc - p * log2(p));

    if entropy.is_nan() {
        0.0
    } else {
        // a single symbol sums to -0.0
        entropy.max(0.0)
    }
}

/// Entropy of English, repeated, random, Caesar and Vigenère samples, in that order
pub fn compare_entropy() -> Result<Vec<(&'static str, f64)>, cipher::Error> {
    compare_entropy_with(&mut thread_rng())
}

/// Entropy comparison drawing the random sample from `rng`
///
/// errors: only if the Vigenère sample key is rejected
pub fn compare_entropy_with<R: Rng + ?Sized>(
    rng: &mut R,
) -> Result<Vec<(&'static str, f64)>, cipher::Error> {
    let random: String = (0..RANDOM_SAMPLE_LEN)
        .map(|_| {
            let b: u8 = rng.gen_range(b'A', b'Z' + 1);
            b as char
        })
        .collect();

    let samples = vec![
        ("English", String::from(SAMPLE_TEXT)),
        ("Repeated", "A".repeat(REPEATED_SAMPLE_LEN)),
        ("Random", random),
        ("Caesar", caesar_encrypt(SAMPLE_TEXT, SAMPLE_SHIFT)),
        ("Vigenère", vigenere_encrypt(SAMPLE_TEXT, SAMPLE_KEY)?),
    ];

    Ok(samples
        .into_iter()
        .map(|(label, text)| (label, entropy(&text)))
        .collect())
}
