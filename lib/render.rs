//! The contract between a simulation and whatever displays it.
//!
//! A [`Simulation`] owns its field arrays and advances them one step at a time;
//! after each step, [`drive`] hands a [`Frame`] of borrowed, read-only views to
//! a [`Renderer`]. A renderer that wants to keep data across steps has to copy
//! it, as [`Recorder`] does.

use std::{ collections::BTreeMap, fs::File, io::BufWriter, path::Path };
use ndarray as nd;
use serde::Serialize;
use crate::{
    error::OutputError,
    mesh::Mesh,
    schrodinger::SchrodingerSimulation,
    wave::WaveSimulation,
};

/// Read-only snapshot of a simulation after some number of steps.
#[derive(Clone, Debug)]
pub struct Frame<'a> {
    /// Number of steps taken.
    pub step: usize,
    /// Elapsed simulation time.
    pub time: f64,
    /// Mesh coordinates.
    pub x: nd::ArrayView1<'a, f64>,
    /// Named field arrays.
    pub fields: Vec<(&'static str, nd::ArrayView1<'a, f64>)>,
}

impl<'a> Frame<'a> {
    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<nd::ArrayView1<'a, f64>> {
        self.fields.iter()
            .find(|(fname, _)| *fname == name)
            .map(|(_, f)| f.clone())
    }
}

/// A fixed-step simulation that can be driven and rendered.
pub trait Simulation {
    fn mesh(&self) -> &Mesh;

    fn dt(&self) -> f64;

    /// Number of steps taken so far.
    fn steps(&self) -> usize;

    /// Advance by exactly one time step.
    fn step(&mut self);

    /// Snapshot of the current state.
    fn frame(&self) -> Frame<'_>;
}

impl Simulation for WaveSimulation {
    fn mesh(&self) -> &Mesh { WaveSimulation::mesh(self) }

    fn dt(&self) -> f64 { WaveSimulation::dt(self) }

    fn steps(&self) -> usize { WaveSimulation::steps(self) }

    fn step(&mut self) { self.advance(); }

    fn frame(&self) -> Frame<'_> {
        Frame {
            step: self.steps(),
            time: self.time(),
            x: self.mesh().x(),
            fields: vec![("phi", self.phi())],
        }
    }
}

impl Simulation for SchrodingerSimulation {
    fn mesh(&self) -> &Mesh { SchrodingerSimulation::mesh(self) }

    fn dt(&self) -> f64 { SchrodingerSimulation::dt(self) }

    fn steps(&self) -> usize { SchrodingerSimulation::steps(self) }

    fn step(&mut self) { self.advance(); }

    fn frame(&self) -> Frame<'_> {
        let state = self.state();
        Frame {
            step: self.steps(),
            time: self.time(),
            x: self.mesh().x(),
            fields: vec![
                ("phi_r", state.phi_r),
                ("phi_i", state.phi_i),
                ("density", state.density),
            ],
        }
    }
}

/// Receives a frame after every step.
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>);
}

/// Render the initial state, then take `nt` steps, rendering after each.
pub fn drive<S, R>(sim: &mut S, renderer: &mut R, nt: usize)
where
    S: Simulation + ?Sized,
    R: Renderer + ?Sized,
{
    renderer.render(&sim.frame());
    for _ in 0..nt {
        sim.step();
        let frame = sim.frame();
        tracing::trace!(step = frame.step, time = frame.time, "step");
        renderer.render(&frame);
    }
    tracing::debug!(steps = sim.steps(), "finished driving");
}

/// Keeps a copy of every `every`-th frame.
///
/// Recorded fields are stored with time along the first axis.
#[derive(Clone, Debug)]
pub struct Recorder {
    every: usize,
    x: Vec<f64>,
    steps: Vec<usize>,
    times: Vec<f64>,
    fields: BTreeMap<&'static str, Vec<nd::Array1<f64>>>,
}

#[derive(Serialize)]
struct Dump<'a> {
    x: &'a [f64],
    step: &'a [usize],
    t: &'a [f64],
    fields: BTreeMap<&'static str, Vec<Vec<f64>>>,
}

impl Recorder {
    /// Record every `every`-th step (`every = 0` is treated as 1).
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
            x: Vec::new(),
            steps: Vec::new(),
            times: Vec::new(),
            fields: BTreeMap::new(),
        }
    }

    /// Number of recorded frames.
    pub fn len(&self) -> usize { self.steps.len() }

    pub fn is_empty(&self) -> bool { self.steps.is_empty() }

    /// Step indices of the recorded frames.
    pub fn steps(&self) -> &[usize] { &self.steps }

    /// Times of the recorded frames.
    pub fn times(&self) -> &[f64] { &self.times }

    /// Recorded history of a field, with time along the first axis.
    pub fn history(&self, name: &str) -> Option<nd::Array2<f64>> {
        let rows = self.fields.get(name)?;
        let views: Vec<nd::ArrayView1<f64>> = rows.iter().map(|r| r.view()).collect();
        nd::stack(nd::Axis(0), &views).ok()
    }

    /// Write all recorded frames as JSON.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), OutputError> {
        let fields
            = self.fields.iter()
            .map(|(name, rows)| (*name, rows.iter().map(|r| r.to_vec()).collect()))
            .collect();
        let dump = Dump {
            x: &self.x,
            step: &self.steps,
            t: &self.times,
            fields,
        };
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(writer, &dump)?;
        Ok(())
    }
}

impl Renderer for Recorder {
    fn render(&mut self, frame: &Frame<'_>) {
        if frame.step % self.every != 0 { return; }
        if self.x.is_empty() { self.x = frame.x.to_vec(); }
        self.steps.push(frame.step);
        self.times.push(frame.time);
        frame.fields.iter()
            .for_each(|(name, f)| {
                self.fields.entry(*name).or_default().push(f.to_owned());
            });
    }
}
