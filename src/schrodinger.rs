use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use fdsim::{ drive, Frame, Recorder, Renderer, SchrodingerConfig, SchrodingerSimulation };
use tracing::Level;

// two Gaussian wave packets colliding head-on

#[derive(Parser)]
#[command(name = "schrodinger", about = "1D free-particle TDSE by staggered explicit steps")]
struct Cli {
    /// TOML file with run parameters; missing fields use the reference problem
    #[arg(long, short)]
    toml: Option<PathBuf>,

    /// Number of steps (overrides `nt`)
    #[arg(long, short = 'n')]
    steps: Option<usize>,

    /// Record (and report total probability for) every k-th frame
    #[arg(long, short, default_value_t = 10)]
    every: usize,

    /// Where to write recorded frames
    #[arg(long, short, default_value = "output/schrodinger.json")]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: Level,
}

// records frames and reports drift of the summed probability density
struct Monitor {
    recorder: Recorder,
    every: usize,
    initial: Option<f64>,
}

impl Renderer for Monitor {
    fn render(&mut self, frame: &Frame<'_>) {
        self.recorder.render(frame);
        if frame.step % self.every != 0 { return; }
        let Some(density) = frame.field("density") else { return; };
        let total = density.sum();
        let initial = *self.initial.get_or_insert(total);
        tracing::info!(
            step = frame.step,
            total_probability = total,
            drift = (total - initial) / initial,
            "total probability"
        );
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .init();

    let config = match &cli.toml {
        Some(path) => SchrodingerConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SchrodingerConfig::default(),
    };
    let nt = cli.steps.unwrap_or(config.nt);

    let mut sim = SchrodingerSimulation::new(&config)?;
    tracing::info!(dt = sim.dt(), courant = sim.courant(), nt, "time step");

    let every = cli.every.max(1);
    let mut monitor = Monitor { recorder: Recorder::new(every), every, initial: None };
    drive(&mut sim, &mut monitor, nt);
    tracing::info!(time = sim.time(), norm = sim.norm(), "finished");

    if let Some(outdir) = cli.output.parent() {
        std::fs::create_dir_all(outdir)?;
    }
    monitor.recorder.write_json(&cli.output)?;
    tracing::info!(
        frames = monitor.recorder.len(),
        path = %cli.output.display(),
        "wrote frames"
    );
    Ok(())
}
