// English sentences long enough for frequency analysis
#[allow(dead_code)]
pub const SENTENCES: [&str; 4] = [
    "the quick brown fox jumps over the lazy dog",
    "Defend the east wall of the castle at dawn",
    "it was the best of times it was the worst of times",
    "cryptography is the practice of secure communication",
];

#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} +/- {}, got {}",
        expected,
        tolerance,
        actual
    );
}

// mean of `trials` calls to `sample`
#[allow(dead_code)]
pub fn mean_of<F: FnMut() -> f64>(trials: usize, mut sample: F) -> f64 {
    (0..trials).map(|_| sample()).sum::<f64>() / trials as f64
}
