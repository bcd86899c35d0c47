//! Explicit finite-difference time integration of two one-dimensional PDEs on a
//! fixed, uniform grid:
//! - the scalar wave equation, via a three-level leapfrog scheme with fixed
//!   ends ([`wave`]);
//! - the free-particle time-dependent Schrödinger equation, via a staggered
//!   update of the real and imaginary parts of the wavefunction
//!   ([`schrodinger`]).
//!
//! Both schemes are only conditionally stable; time steps are derived from the
//! mesh spacing with a CFL-type bound and checked against the limit of the
//! scheme ([`stability`]). Simulations are driven one step at a time and hand
//! read-only snapshots to a renderer ([`render`]).
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod mesh;
pub mod stability;
pub mod fd;
pub mod wave;
pub mod schrodinger;
pub mod config;
pub mod render;
pub mod utils;

pub mod docs;

/// Smallest number of mesh points that leaves an interior point for the
/// three-point stencils.
pub const MIN_POINTS: usize = 3;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;

pub use config::{ SchrodingerConfig, WaveConfig };
pub use mesh::Mesh;
pub use render::{ drive, Frame, Recorder, Renderer, Simulation };
pub use schrodinger::{ advance_schrodinger, SchrodingerSimulation, WavePacket };
pub use stability::StabilityPolicy;
pub use wave::{ advance_wave, WaveSimulation };
