//! Laplace mechanism for differentially private release of a scalar statistic
//!
//! A query with sensitivity Δ answered with Laplace(0, Δ/ε) noise satisfies
//! ε-differential privacy. Smaller ε means more noise and more privacy.

use core::fmt;

use libm::{fabs, log};
use rand::{thread_rng, Rng};
use tracing::debug;

#[derive(Debug, PartialEq)]
pub enum Error {
    /// Epsilon must be positive and finite
    InvalidEpsilon(f64),
    /// Sensitivity must be non-negative and finite
    InvalidSensitivity(f64),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidEpsilon(e) => write!(f, "invalid epsilon {}: must be > 0", e),
            Error::InvalidSensitivity(s) => write!(f, "invalid sensitivity {}: must be >= 0", s),
        }
    }
}

/// Privacy budget (epsilon) and query sensitivity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DpParams {
    epsilon: f64,
    sensitivity: f64,
}

impl DpParams {
    pub fn new(epsilon: f64, sensitivity: f64) -> Result<Self, Error> {
        if !(epsilon > 0.0) || epsilon.is_infinite() {
            return Err(Error::InvalidEpsilon(epsilon));
        }
        if !(sensitivity >= 0.0) || sensitivity.is_infinite() {
            return Err(Error::InvalidSensitivity(sensitivity));
        }

        Ok(Self {
            epsilon,
            sensitivity,
        })
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    /// Laplace scale parameter b = sensitivity / epsilon
    pub fn scale(&self) -> f64 {
        self.sensitivity / self.epsilon
    }
}

impl Default for DpParams {
    fn default() -> Self {
        Self {
            epsilon: 1.0,
            sensitivity: 1.0,
        }
    }
}

/// Draw one sample from Laplace(0, scale) by inverse-CDF sampling
pub fn laplace_noise<R: Rng + ?Sized>(rng: &mut R, scale: f64) -> f64 {
    // gen_range is half-open, redraw the excluded lower endpoint
    let mut u: f64 = rng.gen_range(-0.5_f64, 0.5_f64);
    while u == -0.5 {
        u = rng.gen_range(-0.5_f64, 0.5_f64);
    }

    -signum(u) * scale * log(1.0 - 2.0 * fabs(u))
}

fn signum(u: f64) -> f64 {
    if u > 0.0 {
        1.0
    } else if u < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Release |count1 - count2| with Laplace noise, using the thread-local RNG
pub fn privatize(count1: f64, count2: f64, params: &DpParams) -> f64 {
    privatize_with(&mut thread_rng(), count1, count2, params)
}

/// Release |count1 - count2| with Laplace noise drawn from `rng`
///
/// Every call draws fresh noise.
pub fn privatize_with<R: Rng + ?Sized>(
    rng: &mut R,
    count1: f64,
    count2: f64,
    params: &DpParams,
) -> f64 {
    let true_value = fabs(count1 - count2);
    let noise = laplace_noise(rng, params.scale());

    debug!(
        epsilon = params.epsilon,
        scale = params.scale(),
        "privatized difference"
    );

    true_value + noise
}
