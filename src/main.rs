//! Galaxy Forge - command line entry point
//!
//! Generates a galaxy from a config file and/or flags, writes it as JSON and
//! prints a summary. Image requests are drained by a background worker while
//! generation runs.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use galaxy_forge::core::error::{GalaxyError, Result};
use galaxy_forge::core::GalaxyGenerationConfig;
use galaxy_forge::galaxy::{EventSender, GalaxyGenerator};
use galaxy_forge::media::{run_image_worker, ImageService};

#[derive(Parser, Debug)]
#[command(name = "galaxy-forge")]
#[command(about = "Generate a galaxy of species, star systems, governments and cities")]
struct Args {
    /// TOML config file; missing fields take their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Master seed, overrides the config
    #[arg(long)]
    seed: Option<u64>,

    /// Number of star systems, overrides the config
    #[arg(long)]
    systems: Option<i64>,

    /// Where to write the generated galaxy
    #[arg(long, default_value = "galaxy.json")]
    output: PathBuf,

    /// Image service endpoint (falls back to IMAGE_SERVICE_URL)
    #[arg(long)]
    image_endpoint: Option<String>,

    /// Worker threads for generation (defaults to one per core)
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("galaxy_forge=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GalaxyGenerationConfig::load(path)?,
        None => GalaxyGenerationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(systems) = args.systems {
        config.total_systems = systems;
    }

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| GalaxyError::InvalidConfiguration(e.to_string()))?;
    }

    let service = match args.image_endpoint {
        Some(endpoint) => Some(ImageService::new(endpoint)?),
        None => ImageService::from_env().transpose()?,
    };
    if service.is_none() {
        tracing::warn!("No image service configured - image requests will be skipped");
    }

    let rt = Runtime::new()?;
    let (events, rx) = EventSender::channel();
    let worker = rt.spawn(run_image_worker(rx, service));

    tracing::info!(
        seed = config.seed,
        systems = config.total_systems,
        "Galaxy Forge starting..."
    );
    let start = Instant::now();
    let world = GalaxyGenerator::new(config)?.with_events(events).generate()?;
    let elapsed = start.elapsed();

    std::fs::write(&args.output, world.to_json()?)?;

    println!("{}", world.galaxy_stats().summary());
    println!("Generated in {:.2}ms", elapsed.as_secs_f64() * 1000.0);
    println!("Full output written to {}", args.output.display());

    match rt.block_on(worker) {
        Ok(report) => tracing::info!(
            received = report.received,
            delivered = report.delivered,
            failed = report.failed,
            "Image worker finished"
        ),
        Err(e) => tracing::warn!(error = %e, "Image worker stopped unexpectedly"),
    }

    Ok(())
}
