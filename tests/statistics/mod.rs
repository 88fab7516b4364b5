use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use cryptolab::cipher::caesar_encrypt;
use cryptolab::entropy::{compare_entropy_with, symbol_counts};
use cryptolab::language::chi_squared;
use cryptolab::privacy::privatize_with;
use cryptolab::{entropy, frequencies, privatize, DpParams};

use crate::common::{assert_close, mean_of, SENTENCES};

proptest! {
    #[test]
    fn entropy_is_bounded(text in "\\PC{0,80}") {
        let h = entropy(&text);
        let (counts, _) = symbol_counts(&text);

        prop_assert!(h >= 0.0);
        if !counts.is_empty() {
            prop_assert!(h <= (counts.len() as f64).log2() + 1e-9);
        }
    }

    #[test]
    fn repeated_symbol_has_no_entropy(c in "[a-z0-9 ]", n in 1_usize..50) {
        prop_assert_eq!(entropy(&c.repeat(n)), 0.0);
    }

    #[test]
    fn frequencies_sum_to_one(text in "[A-Za-z0-9 ,.!]{0,80}") {
        let freq = frequencies(&text);

        if text.chars().any(|c| c.is_ascii_alphabetic()) {
            let sum: f64 = freq.values().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
            prop_assert!(freq.keys().all(|c| c.is_ascii_lowercase()));
        } else {
            prop_assert!(freq.is_empty());
        }
    }

    #[test]
    fn chi_squared_is_non_negative(text in "[a-z ]{0,80}") {
        prop_assert!(chi_squared(&frequencies(&text)) >= 0.0);
    }
}

#[test]
fn entropy_is_shift_invariant() {
    // a Caesar shift relabels letters one-to-one
    for sentence in SENTENCES.iter() {
        let lower = sentence.to_lowercase();
        assert_close(entropy(&caesar_encrypt(&lower, 13)), entropy(&lower), 1e-12);
    }
}

#[test]
fn repeated_sample_has_least_entropy() {
    let mut rng = StdRng::seed_from_u64(2024);
    let results = compare_entropy_with(&mut rng).unwrap();
    let lookup = |label: &str| {
        results
            .iter()
            .find(|&&(name, _)| name == label)
            .map(|&(_, h)| h)
            .unwrap()
    };

    assert_eq!(lookup("Repeated"), 0.0);
    assert_close(lookup("Caesar"), lookup("English"), 1e-12);
    for &(label, h) in results.iter().filter(|&&(name, _)| name != "Repeated") {
        assert!(h > 0.0, "{} has no entropy", label);
    }
}

#[test]
fn english_scores_better_than_shifted() {
    for sentence in SENTENCES.iter() {
        let english = chi_squared(&frequencies(sentence));
        let shifted = chi_squared(&frequencies(&caesar_encrypt(sentence, 10)));
        assert!(english < shifted, "{}: {} >= {}", sentence, english, shifted);
    }
}

#[test]
fn privatize_converges_to_true_difference() {
    let params = DpParams::default();
    let mean = mean_of(20_000, || privatize(100.0, 90.0, &params));
    assert_close(mean, 10.0, 0.1);

    // order of the counts does not matter
    let mean = mean_of(20_000, || privatize(90.0, 100.0, &params));
    assert_close(mean, 10.0, 0.1);
}

#[test]
fn smaller_epsilon_adds_more_noise() {
    let mut rng = StdRng::seed_from_u64(2024);
    let strict = DpParams::new(0.1, 1.0).unwrap();
    let loose = DpParams::new(10.0, 1.0).unwrap();

    let spread = |params: &DpParams, rng: &mut StdRng| {
        mean_of(5_000, || privatize_with(&mut *rng, 50.0, 50.0, params).abs())
    };

    // E|noise| equals the scale: 10 vs 0.1
    let strict_spread = spread(&strict, &mut rng);
    let loose_spread = spread(&loose, &mut rng);

    assert_close(strict_spread, 10.0, 1.0);
    assert_close(loose_spread, 0.1, 0.01);
}
