//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use ndarray as nd;
use thiserror::Error;

/// Returned when a finite-difference kernel encounters field arrays with
/// unequal length, or arrays too short to hold an interior point.
#[derive(Debug, Error)]
#[error("encountered arrays with incompatible lengths; got {0} and {1}")]
pub struct LengthError(pub usize, pub usize);

impl LengthError {
    pub(crate) fn check<S, A, T, B>(
        a: &nd::ArrayBase<S, nd::Ix1>,
        b: &nd::ArrayBase<T, nd::Ix1>,
    ) -> Result<(), Self>
    where
        S: nd::Data<Elem = A>,
        T: nd::Data<Elem = B>,
    {
        let na = a.len();
        let nb = b.len();
        (na == nb && na >= crate::MIN_POINTS).then_some(()).ok_or(Self(na, nb))
    }
}

/// Returned when a simulation is set up with malformed or unstable parameters.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the domain length is non-positive or not finite.
    #[error("domain length must be finite and greater than 0; got {0}")]
    BadLength(f64),

    /// Returned when the mesh has too few points for an interior stencil.
    #[error("mesh must have at least 3 points; got {0}")]
    BadPoints(usize),

    /// Returned when a non-positive or non-finite wave speed is encountered.
    #[error("wave speed must be finite and greater than 0; got {0}")]
    BadSpeed(f64),

    /// Returned when a non-positive or non-finite Planck constant is
    /// encountered.
    #[error("planck constant must be finite and greater than 0; got {0}")]
    BadHbar(f64),

    /// Returned when a non-positive or non-finite particle mass is encountered.
    #[error("particle mass must be finite and greater than 0; got {0}")]
    BadMass(f64),

    /// Returned when the CFL safety factor is non-positive or not finite.
    #[error("cfl buffer must be finite and greater than 0; got {0}")]
    BadBuffer(f64),

    /// Returned when a wave packet has a non-positive or non-finite width.
    #[error("wave packet width must be finite and greater than 0; got {0}")]
    BadSigma(f64),

    /// Returned when the derived time step exceeds the stability bound of the
    /// scheme and the stability policy is
    /// [`Reject`][crate::stability::StabilityPolicy::Reject].
    #[error("courant number {courant} exceeds the stability limit {limit}")]
    Unstable { courant: f64, limit: f64 },

    /// [`LengthError`]
    #[error("array length error: {0}")]
    Length(#[from] LengthError),
}

impl ConfigError {
    pub(crate) fn check_length(lx: f64) -> Result<(), Self> {
        (lx.is_finite() && lx > 0.0).then_some(()).ok_or(Self::BadLength(lx))
    }

    pub(crate) fn check_points(nx: usize) -> Result<(), Self> {
        (nx >= crate::MIN_POINTS).then_some(()).ok_or(Self::BadPoints(nx))
    }

    pub(crate) fn check_speed(c: f64) -> Result<(), Self> {
        (c.is_finite() && c > 0.0).then_some(()).ok_or(Self::BadSpeed(c))
    }

    pub(crate) fn check_hbar(h: f64) -> Result<(), Self> {
        (h.is_finite() && h > 0.0).then_some(()).ok_or(Self::BadHbar(h))
    }

    pub(crate) fn check_mass(m: f64) -> Result<(), Self> {
        (m.is_finite() && m > 0.0).then_some(()).ok_or(Self::BadMass(m))
    }

    pub(crate) fn check_buffer(buffer: f64) -> Result<(), Self> {
        (buffer.is_finite() && buffer > 0.0)
            .then_some(()).ok_or(Self::BadBuffer(buffer))
    }

    pub(crate) fn check_sigma(sigma: f64) -> Result<(), Self> {
        (sigma.is_finite() && sigma > 0.0)
            .then_some(()).ok_or(Self::BadSigma(sigma))
    }
}

/// Returned when loading a configuration file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Returned when the file cannot be read.
    #[error("unable to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when the file is not valid TOML for the requested
    /// configuration.
    #[error("unable to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    /// [`ConfigError`]
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

/// Returned when writing recorded frames.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("unable to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to serialize frames: {0}")]
    Json(#[from] serde_json::Error),
}
