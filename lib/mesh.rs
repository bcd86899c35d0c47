//! Uniform one-dimensional spatial mesh.

use ndarray as nd;
use crate::error::ConfigError;

/// A fixed, uniformly spaced set of `nx` coordinates `x[i] = i * dx` spanning
/// `[0, lx)` with `dx = lx / nx`.
///
/// The coordinate array is never handed out mutably, so a mesh is invariant
/// for the lifetime of any simulation that owns it.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    lx: f64,
    dx: f64,
    x: nd::Array1<f64>,
}

impl Mesh {
    /// Construct a new mesh.
    ///
    /// Fails if `lx` is non-positive (or not finite) or if `nx < 3`.
    pub fn new(lx: f64, nx: usize) -> Result<Self, ConfigError> {
        ConfigError::check_length(lx)?;
        ConfigError::check_points(nx)?;
        let dx = lx / nx as f64;
        let x: nd::Array1<f64> = (0..nx).map(|i| i as f64 * dx).collect();
        Ok(Self { lx, dx, x })
    }

    /// Domain length.
    pub fn lx(&self) -> f64 { self.lx }

    /// Number of points.
    pub fn nx(&self) -> usize { self.x.len() }

    /// Point spacing.
    pub fn dx(&self) -> f64 { self.dx }

    /// Coordinate array.
    pub fn x(&self) -> nd::ArrayView1<'_, f64> { self.x.view() }

    /// Midpoint of the domain, `lx / 2`.
    pub fn center(&self) -> f64 { self.lx / 2.0 }

    /// Evaluate a profile at every mesh point.
    pub fn sample<F>(&self, f: F) -> nd::Array1<f64>
    where F: FnMut(f64) -> f64
    {
        self.x.mapv(f)
    }
}
