use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use trivolve::engine::StepOutcome;
use trivolve::{loader, Engine, EvolverSettings};

#[derive(Parser, Debug)]
#[command(name = "trivolve", version)]
#[command(about = "Approximate an image with 150 evolving translucent triangles")]
struct Cli {
    /// Input image (resampled to the working resolution internally).
    image: PathBuf,

    /// Output PNG path.
    #[arg(long, short, default_value = "trivolve.png")]
    out: PathBuf,

    /// Number of generations to run.
    #[arg(long, short, default_value_t = 50_000)]
    generations: u64,

    /// RNG seed; the run is fully reproducible from seed + image.
    #[arg(long)]
    seed: Option<u64>,

    /// Output resolution (the genome is scaled up from 75x75).
    #[arg(long, default_value_t = 600)]
    display_size: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut settings = EvolverSettings::default();
    if let Some(seed) = cli.seed {
        settings.seed = seed;
    }

    let target = loader::load_target(&cli.image, settings.work_size)
        .with_context(|| format!("loading {}", cli.image.display()))?;

    let mut engine = Engine::new(&settings);
    engine.load_target(target.rgba).context("initializing engine")?;
    let initial = engine.fitness();

    let mut accepted = 0u64;
    let report_every = (cli.generations / 20).max(1);
    for _ in 0..cli.generations {
        if engine.step() == StepOutcome::Accepted {
            accepted += 1;
        }
        if engine.generation() % report_every == 0 {
            tracing::info!(
                generation = engine.generation(),
                fitness = engine.fitness(),
                accepted,
                "progress"
            );
        }
    }

    let snapshot = engine.snapshot().context("reading final state")?;
    tracing::info!(
        generations = snapshot.generation,
        accepted,
        initial_fitness = initial,
        final_fitness = snapshot.fitness,
        "run finished"
    );

    loader::save_png(&cli.out, &snapshot.genome, settings.work_size, cli.display_size)
        .with_context(|| format!("saving {}", cli.out.display()))?;
    Ok(())
}
