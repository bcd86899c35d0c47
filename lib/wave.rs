//! Explicit leapfrog integration of the one-dimensional scalar wave equation
//! ```text
//! ∂²φ     ∂²φ
//! --- = c² ---
//! ∂t²     ∂x²
//! ```
//! with fixed (Dirichlet, zero) ends.

use ndarray as nd;
use crate::{
    Arr1,
    config::WaveConfig,
    error::{ ConfigError, LengthError },
    fd,
    mesh::Mesh,
    stability::{ self, StabilityPolicy, WAVE_CFL_LIMIT },
};

// leapfrog update of all interior points into `out`, then clamp both ends
fn step_into<S, T, U>(
    phi: &Arr1<S>,
    phi_old: &Arr1<T>,
    r2: f64,
    out: &mut Arr1<U>,
)
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    U: nd::DataMut<Elem = f64>,
{
    let n = out.len();
    nd::Zip::from(out.slice_mut(nd::s![1..n - 1]))
        .and(phi.windows(3))
        .and(phi_old.slice(nd::s![1..n - 1]))
        .for_each(|newk, w, &oldk| {
            *newk = 2.0 * w[1] - oldk + r2 * (w[2] + w[0] - 2.0 * w[1]);
        });
    out[0] = 0.0;
    out[n - 1] = 0.0;
}

/// Advance a wave field by one time step.
///
/// Given the current (`phi`) and previous (`phi_old`) field levels, computes
/// ```text
/// φ'[i] = 2 φ[i] - φ_old[i] + (c dt / dx)² (φ[i + 1] + φ[i - 1] - 2 φ[i])
/// ```
/// for every interior point and fixes both endpoints of the result at zero.
///
/// Fails if the two arrays differ in length or have fewer than 3 points.
pub fn advance_wave<S, T>(
    phi: &Arr1<S>,
    phi_old: &Arr1<T>,
    dx: f64,
    dt: f64,
    c: f64,
) -> Result<nd::Array1<f64>, LengthError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(phi, phi_old)?;
    let mut phi_new: nd::Array1<f64> = nd::Array1::zeros(phi.len());
    step_into(phi, phi_old, (c * dt / dx).powi(2), &mut phi_new);
    Ok(phi_new)
}

/// Bootstrap the second field level from an initial profile.
///
/// The initial velocity is taken to be `-c/2 ∂φ₀/∂x`, and the second level is
/// obtained by a single forward-Euler step, `φ₁ = φ₀ + dt v`. Returns the
/// current and previous levels, in that order.
///
/// Fails if the profile has fewer than 3 points.
pub fn initial_levels<S>(phi0: &Arr1<S>, dx: f64, dt: f64, c: f64)
    -> Result<(nd::Array1<f64>, nd::Array1<f64>), LengthError>
where S: nd::Data<Elem = f64>
{
    LengthError::check(phi0, phi0)?;
    let velocity = fd::gradient(phi0, dx).mapv(|dk| -c * dk / 2.0);
    let phi: nd::Array1<f64>
        = nd::Zip::from(phi0).and(&velocity)
        .map_collect(|p0k, vk| p0k + dt * vk);
    Ok((phi, phi0.to_owned()))
}

/// State of a running wave simulation.
///
/// Holds the two most recent field levels and a scratch buffer; each call to
/// [`Self::advance`] writes the new level into the scratch buffer and then
/// rotates the three buffers, so no allocation happens after construction.
#[derive(Clone, Debug)]
pub struct WaveSimulation {
    mesh: Mesh,
    c: f64,
    dt: f64,
    phi: nd::Array1<f64>,
    phi_old: nd::Array1<f64>,
    scratch: nd::Array1<f64>,
    steps: usize,
}

impl WaveSimulation {
    /// Set up the reference problem: `φ_old = sin(frequency x)` with the
    /// second level bootstrapped by [`initial_levels`].
    pub fn new(config: &WaveConfig) -> Result<Self, ConfigError> {
        let mesh = Mesh::new(config.lx, config.nx)?;
        let dt = Self::derive_dt(&mesh, config.c, config.buffer, config.stability)?;
        let phi0 = mesh.sample(|xk| (config.frequency * xk).sin());
        let (phi, phi_old) = initial_levels(&phi0, mesh.dx(), dt, config.c)?;
        Self::assemble(mesh, config.c, dt, phi, phi_old)
    }

    /// Set up a simulation from explicit initial field levels.
    pub fn from_fields(
        mesh: Mesh,
        c: f64,
        buffer: f64,
        stability: StabilityPolicy,
        phi: nd::Array1<f64>,
        phi_old: nd::Array1<f64>,
    ) -> Result<Self, ConfigError>
    {
        let dt = Self::derive_dt(&mesh, c, buffer, stability)?;
        Self::assemble(mesh, c, dt, phi, phi_old)
    }

    fn derive_dt(
        mesh: &Mesh,
        c: f64,
        buffer: f64,
        stability: StabilityPolicy,
    ) -> Result<f64, ConfigError>
    {
        ConfigError::check_speed(c)?;
        ConfigError::check_buffer(buffer)?;
        let dt = stability::wave_dt(mesh.dx(), c, buffer);
        let courant = stability::wave_courant(mesh.dx(), dt, c);
        stability.check(courant, WAVE_CFL_LIMIT)?;
        tracing::debug!(dx = mesh.dx(), dt, courant, "wave time step");
        Ok(dt)
    }

    fn assemble(
        mesh: Mesh,
        c: f64,
        dt: f64,
        phi: nd::Array1<f64>,
        phi_old: nd::Array1<f64>,
    ) -> Result<Self, ConfigError>
    {
        LengthError::check(&phi, &phi_old)?;
        LengthError::check(&phi, &mesh.x())?;
        let scratch = nd::Array1::zeros(mesh.nx());
        Ok(Self { mesh, c, dt, phi, phi_old, scratch, steps: 0 })
    }

    /// Advance by one time step, returning the new field.
    pub fn advance(&mut self) -> nd::ArrayView1<'_, f64> {
        let r2 = self.courant().powi(2);
        step_into(&self.phi, &self.phi_old, r2, &mut self.scratch);
        // old <- current, current <- new; the stale old level becomes scratch
        std::mem::swap(&mut self.phi_old, &mut self.phi);
        std::mem::swap(&mut self.phi, &mut self.scratch);
        self.steps += 1;
        self.phi.view()
    }

    /// Advance by `n` time steps.
    pub fn run(&mut self, n: usize) -> nd::ArrayView1<'_, f64> {
        (0..n).for_each(|_| { self.advance(); });
        self.phi.view()
    }

    pub fn mesh(&self) -> &Mesh { &self.mesh }

    pub fn dt(&self) -> f64 { self.dt }

    pub fn c(&self) -> f64 { self.c }

    /// Courant number `c dt / dx`.
    pub fn courant(&self) -> f64 {
        stability::wave_courant(self.mesh.dx(), self.dt, self.c)
    }

    /// Current field level.
    pub fn phi(&self) -> nd::ArrayView1<'_, f64> { self.phi.view() }

    /// Previous field level.
    pub fn phi_old(&self) -> nd::ArrayView1<'_, f64> { self.phi_old.view() }

    /// Number of steps taken so far.
    pub fn steps(&self) -> usize { self.steps }

    /// Elapsed simulation time.
    pub fn time(&self) -> f64 { self.steps as f64 * self.dt }

    /// Largest absolute value of the current field; `NaN` once the field has
    /// blown up.
    pub fn max_amplitude(&self) -> f64 {
        self.phi.iter()
            .fold(0.0_f64, |acc, pk| {
                if acc.is_nan() || pk.is_nan() { f64::NAN } else { acc.max(pk.abs()) }
            })
    }
}
