use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::cipher::{Caesar, Crypt, ALPHABET_LEN};

/// Expected frequency used for letters missing from the reference table
pub const CHI_SQUARED_FLOOR: f64 = 0.001;

/// Relative frequency of each lowercase letter in a text
pub type FrequencyTable = HashMap<char, f64>;

/// Best guess at the shift used to produce a Caesar ciphertext
#[derive(Clone, Debug, PartialEq)]
pub struct Attempt {
    pub shift: u8,
    /// Chi-squared distance of the decryption from English
    pub delta: f64,
    pub plaintext: String,
}

/// Unigram frequencies of English letters (case-insensitive)
///
/// Anything outside a-z gets the chi-squared floor.
pub fn english_frequency(letter: char) -> f64 {
    match letter.to_ascii_lowercase() {
        'a' => 0.082,
        'b' => 0.015,
        'c' => 0.028,
        'd' => 0.043,
        'e' => 0.127,
        'f' => 0.022,
        'g' => 0.020,
        'h' => 0.061,
        'i' => 0.070,
        'j' => 0.002,
        'k' => 0.008,
        'l' => 0.040,
        'm' => 0.024,
        'n' => 0.067,
        'o' => 0.075,
        'p' => 0.019,
        'q' => 0.001,
        'r' => 0.060,
        's' => 0.063,
        't' => 0.091,
        'u' => 0.028,
        'v' => 0.010,
        'w' => 0.024,
        'x' => 0.002,
        'y' => 0.020,
        'z' => 0.001,
        _ => CHI_SQUARED_FLOOR,
    }
}

/// Get the relative frequency of each letter a-z in the given text
///
/// Frequencies are relative to the number of letters, not the text length.
/// Text without letters gives an empty table.
pub fn frequencies(text: &str) -> FrequencyTable {
    let mut counts: HashMap<char, usize> = HashMap::new();
    let mut letters = 0_usize;

    for c in text.chars().map(|c| c.to_ascii_lowercase()) {
        if c.is_ascii_lowercase() {
            *counts.entry(c).or_insert(0) += 1;
            letters += 1;
        }
    }

    if letters == 0 {
        return FrequencyTable::new();
    }

    let letters = letters as f64;
    counts
        .into_iter()
        .map(|(letter, count)| (letter, count as f64 / letters))
        .collect()
}

/// Chi-squared distance of observed letter frequencies from English
///
/// Only observed letters contribute, so an empty table scores 0.
pub fn chi_squared(observed: &FrequencyTable) -> f64 {
    observed.iter().fold(0.0_f64, |acc, (&letter, &obs_hz)| {
        let expected = english_frequency(letter);
        let delta = obs_hz - expected;
        acc + delta * delta / expected
    })
}

/// Score every candidate shift, most English-like first
///
/// Ties keep ascending shift order.
pub fn rank_shifts(ciphertext: &str) -> Vec<(u8, f64)> {
    let mut ranked: Vec<(u8, f64)> = (0..ALPHABET_LEN)
        .map(|shift| {
            let candidate = Caesar::new(shift.into()).decrypt(ciphertext);
            (shift, chi_squared(&frequencies(&candidate)))
        })
        .collect();

    ranked.sort_by(|left, right| {
        left.1
            .partial_cmp(&right.1)
            .unwrap_or(core::cmp::Ordering::Equal)
    });

    ranked
}

/// Guess the shift used to produce a Caesar ciphertext
///
/// Tries every shift, keeping the decryption with the lowest chi-squared
/// distance from English. The first (smallest) shift wins ties, so text
/// without letters comes back unchanged with shift 0.
pub fn break_caesar(ciphertext: &str) -> Attempt {
    let mut winner = Attempt {
        shift: 0,
        delta: f64::INFINITY,
        plaintext: String::new(),
    };

    for shift in 0..ALPHABET_LEN {
        let plaintext = Caesar::new(shift.into()).decrypt(ciphertext);
        let delta = chi_squared(&frequencies(&plaintext));
        trace!(shift, delta, "scored candidate shift");

        if delta < winner.delta {
            winner = Attempt {
                shift,
                delta,
                plaintext,
            };
        }
    }

    // NaN scores never win, fall back to the identity shift
    if winner.delta.is_infinite() {
        winner = Attempt {
            shift: 0,
            delta: 0.0,
            plaintext: String::from(ciphertext),
        };
    }

    debug!(shift = winner.shift, delta = winner.delta, "broke caesar cipher");

    winner
}
