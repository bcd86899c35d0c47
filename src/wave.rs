use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use fdsim::{ drive, Recorder, WaveConfig, WaveSimulation };
use tracing::Level;

// vibrating string with fixed ends, started from sin(5x)

#[derive(Parser)]
#[command(name = "wave", about = "1D wave equation by explicit leapfrog")]
struct Cli {
    /// TOML file with run parameters; missing fields use the reference problem
    #[arg(long, short)]
    toml: Option<PathBuf>,

    /// Number of steps (overrides `nt`)
    #[arg(long, short = 'n')]
    steps: Option<usize>,

    /// Record every k-th frame
    #[arg(long, short, default_value_t = 10)]
    every: usize,

    /// Where to write recorded frames
    #[arg(long, short, default_value = "output/wave.json")]
    output: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: Level,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .init();

    let config = match &cli.toml {
        Some(path) => WaveConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => WaveConfig::default(),
    };
    let nt = cli.steps.unwrap_or(config.nt);

    let mut sim = WaveSimulation::new(&config)?;
    tracing::info!(dt = sim.dt(), courant = sim.courant(), nt, "time step");

    let mut rec = Recorder::new(cli.every);
    drive(&mut sim, &mut rec, nt);
    tracing::info!(
        time = sim.time(),
        max_amplitude = sim.max_amplitude(),
        "finished"
    );

    if let Some(outdir) = cli.output.parent() {
        std::fs::create_dir_all(outdir)?;
    }
    rec.write_json(&cli.output)?;
    tracing::info!(frames = rec.len(), path = %cli.output.display(), "wrote frames");
    Ok(())
}
