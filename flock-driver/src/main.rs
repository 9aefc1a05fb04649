use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use flock_core::FlockSimulation;
use flock_driver::{capture, load_settings, to_config, Driver, ResizeEvent};
use flock_shared::{FlockSettings, StepMode};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// In-place updates in population order
    Sequential,
    /// Every agent steers against the previous frame
    Snapshot,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless predator/prey flocking simulation", long_about = None)]
struct Args {
    /// JSON settings file; command line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of boids
    #[arg(short, long)]
    boids: Option<usize>,

    /// Number of predators
    #[arg(short, long)]
    predators: Option<usize>,

    /// Plane width
    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    /// Plane height
    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Frames to simulate
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// Seed for the initial placement; random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Record the last positions of every agent
    #[arg(short, long)]
    trails: bool,

    /// Frame update mode
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Resize the plane before a frame, as FRAME:WIDTHxHEIGHT (repeatable)
    #[arg(long = "resize-at")]
    resize_at: Vec<ResizeEvent>,

    /// Write the final state of both populations as JSON
    #[arg(short = 'o', long)]
    snapshot_out: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Args {
    fn settings(&self) -> Result<FlockSettings> {
        let mut settings = match &self.config {
            Some(path) => load_settings(path)?,
            None => FlockSettings::default(),
        };

        if let Some(boids) = self.boids {
            settings.boid_count = boids;
        }
        if let Some(predators) = self.predators {
            settings.predator_count = predators;
        }
        if self.trails {
            settings.record_trails = true;
        }
        if let Some(mode) = self.mode {
            settings.step_mode = match mode {
                Mode::Sequential => StepMode::Sequential,
                Mode::Snapshot => StepMode::Snapshot,
            };
        }

        Ok(settings)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let settings = args.settings()?;
    let config = to_config(&settings)?;

    log::info!("Flock driver starting...");
    log::info!(
        "Plane: {}x{}, boids: {}, predators: {}, mode: {:?}",
        args.width,
        args.height,
        config.boid_count,
        config.predator_count,
        config.update_mode
    );

    let mut sim = FlockSimulation::new(config);
    let initialized = match args.seed {
        Some(seed) => {
            log::info!("Seed: {}", seed);
            sim.init_seeded(args.width, args.height, seed)
        }
        None => sim.init(args.width, args.height),
    };
    initialized.context("Failed to initialize simulation")?;

    let mut driver = Driver::new(sim, args.resize_at.clone());
    let summary = driver.run(args.frames);

    log::info!(
        "Simulated {} frames in {:.2?} ({:.2} fps, slowest frame {:.2?}, mean speed {:.2})",
        summary.frames,
        summary.elapsed,
        summary.report.fps,
        summary.slowest_frame,
        summary.report.mean_speed
    );

    if let Some(path) = &args.snapshot_out {
        let json = capture(driver.simulation())
            .to_json()
            .context("Failed to serialize snapshot")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write snapshot to {}", path.display()))?;
        log::info!("Snapshot written to {}", path.display());
    }

    Ok(())
}
