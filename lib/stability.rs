//! Time-step derivation from CFL-type bounds for the two explicit schemes.
//!
//! Both schemes are only conditionally stable. The step is derived from the
//! mesh spacing and a `buffer` safety factor, and the resulting Courant number
//! is checked against the theoretical limit of the scheme according to a
//! [`StabilityPolicy`]. See [`docs`][crate::docs#stability] for the
//! derivation of the limits.

use serde::{ Deserialize, Serialize };
use crate::error::ConfigError;

/// Largest stable Courant number `c dt / dx` for the leapfrog wave scheme.
pub const WAVE_CFL_LIMIT: f64 = 1.0;

/// Largest stable value of `(h / 2m) dt / dx²` for the staggered
/// real/imaginary Schrödinger scheme.
pub const SCHRODINGER_CFL_LIMIT: f64 = 0.5;

const LIMIT_RTOL: f64 = 1e-12;

/// What to do when a configuration exceeds the stability limit of its scheme.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StabilityPolicy {
    /// Fail with [`ConfigError::Unstable`].
    #[default]
    Reject,
    /// Log a warning and integrate anyway.
    Warn,
    /// Integrate anyway.
    Ignore,
}

impl StabilityPolicy {
    /// Apply the policy to a Courant number and its limit.
    ///
    /// A Courant number within rounding of the limit is accepted.
    pub fn check(self, courant: f64, limit: f64) -> Result<(), ConfigError> {
        if courant <= limit * (1.0 + LIMIT_RTOL) { return Ok(()); }
        match self {
            Self::Reject => Err(ConfigError::Unstable { courant, limit }),
            Self::Warn => {
                tracing::warn!(
                    courant,
                    limit,
                    "courant number exceeds stability limit; expect divergence"
                );
                Ok(())
            },
            Self::Ignore => Ok(()),
        }
    }
}

/// Time step for the wave equation, `dx / c * buffer`.
pub fn wave_dt(dx: f64, c: f64, buffer: f64) -> f64 {
    dx / c * buffer
}

/// Courant number `c dt / dx` of the wave scheme.
pub fn wave_courant(dx: f64, dt: f64, c: f64) -> f64 {
    c * dt / dx
}

/// Time step for the Schrödinger equation, `dx² 2m / h * buffer`.
pub fn schrodinger_dt(dx: f64, h: f64, m: f64, buffer: f64) -> f64 {
    dx.powi(2) * 2.0 * m / h * buffer
}

/// Diffusion-like Courant number `(h / 2m) dt / dx²` of the Schrödinger
/// scheme.
pub fn schrodinger_courant(dx: f64, dt: f64, h: f64, m: f64) -> f64 {
    h / (2.0 * m) * dt / dx.powi(2)
}
