//! Explicit integration of the one-dimensional, free-particle time-dependent
//! Schrödinger equation (TDSE)
//! ```text
//!    ∂ψ      ħ² ∂²ψ
//! iħ -- = - --- ---
//!    ∂t     2 m ∂x²
//! ```
//! by splitting `ψ = φ_R + i φ_I` into two coupled real fields,
//! ```text
//! ∂φ_R     ħ  ∂²φ_I        ∂φ_I    ħ  ∂²φ_R
//! ---- = - -- -----  ,     ---- = -- -----
//!  ∂t      2m  ∂x²          ∂t    2m  ∂x²
//! ```
//! each of which is advanced with a forward step driven by the Laplacian of the
//! other.
//!
//! # Sequencing
//! A single step is two phases, always in this order:
//! 1. the real part is updated from the Laplacian of the *current* imaginary
//!    part;
//! 2. the imaginary part is updated from the Laplacian of the *just-updated*
//!    real part.
//!
//! Swapping the phases changes the trajectory.
//!
//! # Boundaries
//! The real part is held at zero on both ends. The imaginary part is held at
//! zero on the right end, while its left end takes the value of its interior
//! neighbor from before the step.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    Arr1,
    config::SchrodingerConfig,
    error::{ ConfigError, LengthError },
    mesh::Mesh,
    stability::{ self, StabilityPolicy, SCHRODINGER_CFL_LIMIT },
    utils::{ fft, fft_freq, fft_shift, trapz },
};

// phase 1: φ_R' = φ_R - dt (ħ/2m) ∇²φ_I, with φ_R' = 0 on both ends
fn update_real_into<S, T, U>(
    phi_r: &Arr1<S>,
    phi_i: &Arr1<T>,
    dt_coef: f64,
    dx2: f64,
    out: &mut Arr1<U>,
)
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    U: nd::DataMut<Elem = f64>,
{
    let n = out.len();
    nd::Zip::from(out.slice_mut(nd::s![1..n - 1]))
        .and(phi_i.windows(3))
        .and(phi_r.slice(nd::s![1..n - 1]))
        .for_each(|rk, w, &r0k| {
            let lap = (w[2] + w[0] - 2.0 * w[1]) / dx2;
            *rk = r0k - dt_coef * lap;
        });
    out[0] = 0.0;
    out[n - 1] = 0.0;
}

// phase 2: φ_I' = φ_I + dt (ħ/2m) ∇²φ_R', with φ_I'[0] = φ_I[1] and
// φ_I'[n - 1] = 0
fn update_imag_into<S, T, U>(
    phi_r_new: &Arr1<S>,
    phi_i: &Arr1<T>,
    dt_coef: f64,
    dx2: f64,
    out: &mut Arr1<U>,
)
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    U: nd::DataMut<Elem = f64>,
{
    let n = out.len();
    nd::Zip::from(out.slice_mut(nd::s![1..n - 1]))
        .and(phi_r_new.windows(3))
        .and(phi_i.slice(nd::s![1..n - 1]))
        .for_each(|ik, w, &i0k| {
            let lap = (w[2] + w[0] - 2.0 * w[1]) / dx2;
            *ik = i0k + dt_coef * lap;
        });
    out[0] = phi_i[1];
    out[n - 1] = 0.0;
}

fn density_into<S, T, U>(phi_r: &Arr1<S>, phi_i: &Arr1<T>, out: &mut Arr1<U>)
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
    U: nd::DataMut<Elem = f64>,
{
    nd::Zip::from(out).and(phi_r).and(phi_i)
        .for_each(|pk, rk, ik| { *pk = rk.powi(2) + ik.powi(2); });
}

/// Compute the probability density `φ_R² + φ_I²`.
///
/// *Panics if the two arrays have different lengths*.
pub fn probability_density<S, T>(phi_r: &Arr1<S>, phi_i: &Arr1<T>)
    -> nd::Array1<f64>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    let mut density = nd::Array1::zeros(phi_r.len());
    density_into(phi_r, phi_i, &mut density);
    density
}

/// Advance a split wavefunction by one time step.
///
/// Returns the new real part, the new imaginary part, and the probability
/// density computed from them. See the [module-level docs][self] for the
/// ordering of the two phases and the boundary policy.
///
/// Fails if the two arrays differ in length or have fewer than 3 points.
pub fn advance_schrodinger<S, T>(
    phi_r: &Arr1<S>,
    phi_i: &Arr1<T>,
    dx: f64,
    dt: f64,
    h: f64,
    m: f64,
) -> Result<(nd::Array1<f64>, nd::Array1<f64>, nd::Array1<f64>), LengthError>
where
    S: nd::Data<Elem = f64>,
    T: nd::Data<Elem = f64>,
{
    LengthError::check(phi_r, phi_i)?;
    let n = phi_r.len();
    let dt_coef = dt * h / (2.0 * m);
    let dx2 = dx.powi(2);
    let mut phi_r_new: nd::Array1<f64> = nd::Array1::zeros(n);
    let mut phi_i_new: nd::Array1<f64> = nd::Array1::zeros(n);
    update_real_into(phi_r, phi_i, dt_coef, dx2, &mut phi_r_new);
    update_imag_into(&phi_r_new, phi_i, dt_coef, dx2, &mut phi_i_new);
    let density = probability_density(&phi_r_new, &phi_i_new);
    Ok((phi_r_new, phi_i_new, density))
}

/// A Gaussian wave packet with definite mean momentum,
/// ```text
/// ψ(x) = exp(-(x - center)² / 2σ²) exp(i k x)
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WavePacket {
    /// Center of the envelope.
    pub center: f64,
    /// Width of the envelope.
    pub sigma: f64,
    /// Wavenumber.
    pub k: f64,
}

impl WavePacket {
    pub fn new(center: f64, sigma: f64, k: f64) -> Self {
        Self { center, sigma, k }
    }

    fn envelope(&self, x: f64) -> f64 {
        (-(x - self.center).powi(2) / (2.0 * self.sigma.powi(2))).exp()
    }

    /// Real part at `x`.
    pub fn re(&self, x: f64) -> f64 { self.envelope(x) * (self.k * x).cos() }

    /// Imaginary part at `x`.
    pub fn im(&self, x: f64) -> f64 { self.envelope(x) * (self.k * x).sin() }
}

/// Sample the superposition of `packets` over `mesh`, returning the real and
/// imaginary parts.
pub fn superpose(mesh: &Mesh, packets: &[WavePacket])
    -> (nd::Array1<f64>, nd::Array1<f64>)
{
    let phi_r = mesh.sample(|xk| packets.iter().map(|p| p.re(xk)).sum());
    let phi_i = mesh.sample(|xk| packets.iter().map(|p| p.im(xk)).sum());
    (phi_r, phi_i)
}

/// Borrowed view of the state of a [`SchrodingerSimulation`] after a step.
#[derive(Clone, Debug)]
pub struct SchrodingerState<'a> {
    pub phi_r: nd::ArrayView1<'a, f64>,
    pub phi_i: nd::ArrayView1<'a, f64>,
    pub density: nd::ArrayView1<'a, f64>,
}

/// State of a running Schrödinger simulation.
///
/// Each field has its own scratch buffer; a phase writes into the scratch
/// buffer and then swaps it with the live field.
#[derive(Clone, Debug)]
pub struct SchrodingerSimulation {
    mesh: Mesh,
    h: f64,
    m: f64,
    dt: f64,
    phi_r: nd::Array1<f64>,
    phi_i: nd::Array1<f64>,
    scratch_r: nd::Array1<f64>,
    scratch_i: nd::Array1<f64>,
    density: nd::Array1<f64>,
    steps: usize,
}

impl SchrodingerSimulation {
    /// Set up the reference problem: two Gaussian packets placed a third of
    /// the domain to either side of its center, moving toward each other with
    /// opposite momenta.
    pub fn new(config: &SchrodingerConfig) -> Result<Self, ConfigError> {
        let mesh = Mesh::new(config.lx, config.nx)?;
        let packets = config.packets();
        Self::from_packets(
            mesh, config.h, config.m, config.buffer, config.stability, &packets)
    }

    /// Set up a simulation whose initial state is a superposition of wave
    /// packets.
    pub fn from_packets(
        mesh: Mesh,
        h: f64,
        m: f64,
        buffer: f64,
        stability: StabilityPolicy,
        packets: &[WavePacket],
    ) -> Result<Self, ConfigError>
    {
        packets.iter().try_for_each(|p| ConfigError::check_sigma(p.sigma))?;
        let (phi_r, phi_i) = superpose(&mesh, packets);
        Self::from_fields(mesh, h, m, buffer, stability, phi_r, phi_i)
    }

    /// Set up a simulation from explicit initial real and imaginary parts.
    pub fn from_fields(
        mesh: Mesh,
        h: f64,
        m: f64,
        buffer: f64,
        stability: StabilityPolicy,
        phi_r: nd::Array1<f64>,
        phi_i: nd::Array1<f64>,
    ) -> Result<Self, ConfigError>
    {
        ConfigError::check_hbar(h)?;
        ConfigError::check_mass(m)?;
        ConfigError::check_buffer(buffer)?;
        LengthError::check(&phi_r, &phi_i)?;
        LengthError::check(&phi_r, &mesh.x())?;
        let dt = stability::schrodinger_dt(mesh.dx(), h, m, buffer);
        let courant = stability::schrodinger_courant(mesh.dx(), dt, h, m);
        stability.check(courant, SCHRODINGER_CFL_LIMIT)?;
        tracing::debug!(dx = mesh.dx(), dt, courant, "schrodinger time step");
        let n = mesh.nx();
        let density = probability_density(&phi_r, &phi_i);
        Ok(Self {
            mesh,
            h,
            m,
            dt,
            phi_r,
            phi_i,
            scratch_r: nd::Array1::zeros(n),
            scratch_i: nd::Array1::zeros(n),
            density,
            steps: 0,
        })
    }

    fn dt_coef(&self) -> f64 { self.dt * self.h / (2.0 * self.m) }

    /// First phase of a step: update the real part from the Laplacian of the
    /// current imaginary part.
    fn update_real(&mut self) {
        let dx2 = self.mesh.dx().powi(2);
        let dt_coef = self.dt_coef();
        update_real_into(&self.phi_r, &self.phi_i, dt_coef, dx2, &mut self.scratch_r);
        std::mem::swap(&mut self.phi_r, &mut self.scratch_r);
    }

    /// Second phase of a step: update the imaginary part from the Laplacian of
    /// the real part. Must follow [`Self::update_real`].
    fn update_imag(&mut self) {
        let dx2 = self.mesh.dx().powi(2);
        let dt_coef = self.dt_coef();
        update_imag_into(&self.phi_r, &self.phi_i, dt_coef, dx2, &mut self.scratch_i);
        std::mem::swap(&mut self.phi_i, &mut self.scratch_i);
    }

    fn update_density(&mut self) {
        density_into(&self.phi_r, &self.phi_i, &mut self.density);
    }

    /// Advance by one time step, returning the new state.
    pub fn advance(&mut self) -> SchrodingerState<'_> {
        self.update_real();
        self.update_imag();
        self.update_density();
        self.steps += 1;
        self.state()
    }

    /// Advance by `n` time steps.
    pub fn run(&mut self, n: usize) -> SchrodingerState<'_> {
        (0..n).for_each(|_| { self.advance(); });
        self.state()
    }

    /// Current state.
    pub fn state(&self) -> SchrodingerState<'_> {
        SchrodingerState {
            phi_r: self.phi_r.view(),
            phi_i: self.phi_i.view(),
            density: self.density.view(),
        }
    }

    pub fn mesh(&self) -> &Mesh { &self.mesh }

    pub fn dt(&self) -> f64 { self.dt }

    pub fn h(&self) -> f64 { self.h }

    pub fn m(&self) -> f64 { self.m }

    /// Courant number `(ħ/2m) dt / dx²`.
    pub fn courant(&self) -> f64 {
        stability::schrodinger_courant(self.mesh.dx(), self.dt, self.h, self.m)
    }

    pub fn phi_r(&self) -> nd::ArrayView1<'_, f64> { self.phi_r.view() }

    pub fn phi_i(&self) -> nd::ArrayView1<'_, f64> { self.phi_i.view() }

    pub fn density(&self) -> nd::ArrayView1<'_, f64> { self.density.view() }

    /// Number of steps taken so far.
    pub fn steps(&self) -> usize { self.steps }

    /// Elapsed simulation time.
    pub fn time(&self) -> f64 { self.steps as f64 * self.dt }

    /// Plain sum of the probability density over all mesh points.
    pub fn total_probability(&self) -> f64 { self.density.sum() }

    /// Trapezoidal integral of the probability density.
    pub fn norm(&self) -> f64 { trapz(&self.density, self.mesh.dx()) }

    /// Largest value of the probability density; `NaN` once the state has
    /// blown up.
    pub fn max_density(&self) -> f64 {
        self.density.iter()
            .fold(0.0_f64, |acc, pk| {
                if acc.is_nan() || pk.is_nan() { f64::NAN } else { acc.max(*pk) }
            })
    }

    /// The wavefunction as a complex array.
    pub fn wavefunction(&self) -> nd::Array1<C64> {
        nd::Zip::from(&self.phi_r).and(&self.phi_i)
            .map_collect(|&rk, &ik| C64::new(rk, ik))
    }

    /// Momentum-space probability density `|ψ̃(k)|²` along with the
    /// accompanying angular wavenumbers, both in ascending order of `k`.
    ///
    /// The density is normalized to sum to the same value as
    /// [`Self::total_probability`].
    pub fn momentum_density(&self) -> (nd::Array1<f64>, nd::Array1<f64>) {
        let n = self.mesh.nx();
        let psi_k = fft(&self.wavefunction());
        let density = psi_k.mapv(|qk| qk.norm_sqr() / n as f64);
        let k = fft_freq(n, self.mesh.dx()).mapv(|fk| std::f64::consts::TAU * fk);
        (fft_shift(&k), fft_shift(&density))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;
    use crate::fd;

    fn small_sim() -> SchrodingerSimulation {
        let mesh = Mesh::new(PI, 6).unwrap();
        let phi_r = nd::array![0.3, 0.5, -0.2, 0.7, 0.1, 0.4];
        let phi_i = nd::array![0.2, -0.4, 0.6, 0.0, 0.3, 0.5];
        SchrodingerSimulation::from_fields(
            mesh, 1.0, 1.0, 0.1, StabilityPolicy::Reject, phi_r, phi_i,
        ).unwrap()
    }

    #[test]
    fn kernel_matches_simulation_step() {
        let mut sim = small_sim();
        let r0 = sim.phi_r().to_owned();
        let i0 = sim.phi_i().to_owned();
        let (r, i, p) = advance_schrodinger(
            &r0, &i0, sim.mesh().dx(), sim.dt(), 1.0, 1.0).unwrap();
        let state = sim.advance();
        assert_eq!(state.phi_r, r.view());
        assert_eq!(state.phi_i, i.view());
        assert_eq!(state.density, p.view());
    }

    #[test]
    fn imaginary_phase_uses_updated_real_part() {
        let mut sim = small_sim();
        let dx = sim.mesh().dx();
        let dt = sim.dt();
        let r0 = sim.phi_r().to_owned();
        let i0 = sim.phi_i().to_owned();
        sim.advance();
        let lap_i = fd::laplacian(&i0, dx);
        let r1: nd::Array1<f64> = (0..6)
            .map(|k| {
                if k == 0 || k == 5 { 0.0 } else { r0[k] - dt * 0.5 * lap_i[k] }
            })
            .collect();
        let lap_r = fd::laplacian(&r1, dx);
        for k in 1..5 {
            assert_abs_diff_eq!(sim.phi_r()[k], r1[k], epsilon = 1e-12);
            assert_abs_diff_eq!(
                sim.phi_i()[k], i0[k] + dt * 0.5 * lap_r[k], epsilon = 1e-12);
        }
    }

    #[test]
    fn boundary_policy() {
        let mut sim = small_sim();
        for _ in 0..5 {
            let i_neighbor = sim.phi_i()[1];
            let state = sim.advance();
            assert_eq!(state.phi_r[0], 0.0);
            assert_eq!(state.phi_r[5], 0.0);
            assert_eq!(state.phi_i[0], i_neighbor);
            assert_eq!(state.phi_i[5], 0.0);
        }
    }

    #[test]
    fn density_is_recomputed() {
        let mut sim = small_sim();
        sim.run(3);
        let expected = probability_density(&sim.phi_r(), &sim.phi_i());
        assert_eq!(sim.density(), expected.view());
        assert_abs_diff_eq!(sim.total_probability(), expected.sum());
    }

    #[test]
    fn max_density_propagates_nan() {
        let mesh = Mesh::new(1.0, 3).unwrap();
        let sim = SchrodingerSimulation::from_fields(
            mesh, 1.0, 1.0, 0.1, StabilityPolicy::Reject,
            nd::array![0.0, f64::NAN, 0.0], nd::Array1::zeros(3),
        ).unwrap();
        assert!(sim.max_density().is_nan());
        assert_abs_diff_eq!(small_sim().max_density(), 0.49, epsilon = 1e-15);
    }

    #[test]
    fn packet_parts() {
        let p = WavePacket::new(1.0, 0.5, 2.0);
        assert_abs_diff_eq!(p.re(1.0), 2.0_f64.cos());
        assert_abs_diff_eq!(p.im(1.0), 2.0_f64.sin());
        assert_abs_diff_eq!(p.re(1.5).hypot(p.im(1.5)), (-0.5_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn rejects_bad_packets() {
        let mesh = Mesh::new(PI, 10).unwrap();
        let packets = [WavePacket::new(1.0, 0.0, 1.0)];
        assert!(matches!(
            SchrodingerSimulation::from_packets(
                mesh, 1.0, 1.0, 0.01, StabilityPolicy::Reject, &packets),
            Err(ConfigError::BadSigma(_))
        ));
    }
}
