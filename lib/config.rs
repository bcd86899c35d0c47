//! Run parameters for the two simulations.
//!
//! Both configurations deserialize from TOML; every field is optional and
//! falls back to the reference problem, e.g.
//! ```toml
//! nx = 200
//! buffer = 0.25
//! stability = "warn"
//! ```

use std::{ f64::consts::PI, fs, path::Path };
use serde::{ Deserialize, Serialize };
use crate::{
    error::LoadError,
    schrodinger::WavePacket,
    stability::StabilityPolicy,
};

fn read_toml<T, P>(path: P) -> Result<T, LoadError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let contents = fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Parameters for a [`WaveSimulation`][crate::wave::WaveSimulation].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Domain length.
    pub lx: f64,
    /// Number of mesh points.
    pub nx: usize,
    /// Wave speed.
    pub c: f64,
    /// CFL safety factor; the Courant number of the run.
    pub buffer: f64,
    /// Number of steps to take.
    pub nt: usize,
    /// Spatial frequency of the initial `sin` profile.
    pub frequency: f64,
    /// What to do with a buffer above the stability limit.
    pub stability: StabilityPolicy,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            lx: PI,
            nx: 100,
            c: 2.0,
            buffer: 0.5,
            nt: 1000,
            frequency: 5.0,
            stability: StabilityPolicy::Reject,
        }
    }
}

impl WaveConfig {
    /// Parse from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        read_toml(path)
    }
}

/// Parameters for a
/// [`SchrodingerSimulation`][crate::schrodinger::SchrodingerSimulation].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchrodingerConfig {
    /// Domain length.
    pub lx: f64,
    /// Number of mesh points.
    pub nx: usize,
    /// Reduced Planck constant.
    pub h: f64,
    /// Particle mass.
    pub m: f64,
    /// CFL safety factor; the diffusion number `(h/2m) dt / dx²` of the run.
    pub buffer: f64,
    /// Number of steps to take.
    pub nt: usize,
    /// Center of the first packet; defaults to `lx/2 + lx/3`.
    pub x0: Option<f64>,
    /// Center of the second packet; defaults to `lx/2 - lx/3`.
    pub x1: Option<f64>,
    /// Width of both packets.
    pub sigma: f64,
    /// Wavenumber of the first packet; the second has `-k0`.
    pub k0: f64,
    /// What to do with a buffer above the stability limit.
    pub stability: StabilityPolicy,
}

impl Default for SchrodingerConfig {
    fn default() -> Self {
        Self {
            lx: PI,
            nx: 100,
            h: 1.0,
            m: 1.0,
            buffer: 0.01,
            nt: 1000,
            x0: None,
            x1: None,
            sigma: 0.2,
            k0: -10.0,
            stability: StabilityPolicy::Reject,
        }
    }
}

impl SchrodingerConfig {
    /// Parse from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        read_toml(path)
    }

    /// The two counter-propagating packets of the initial state.
    pub fn packets(&self) -> [WavePacket; 2] {
        let x0 = self.x0.unwrap_or(self.lx / 2.0 + self.lx / 3.0);
        let x1 = self.x1.unwrap_or(self.lx / 2.0 - self.lx / 3.0);
        [
            WavePacket::new(x0, self.sigma, self.k0),
            WavePacket::new(x1, self.sigma, -self.k0),
        ]
    }
}
