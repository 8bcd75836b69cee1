//! # Tumble CLI
//!
//! Command-line interface for the Tumble physics sandbox.
//!
//! ## Commands
//! - `run` - Play a scripted headless session
//! - `drop` - Drop one sphere and measure the bounce
//! - `config` - Print the effective configuration

pub mod scenario;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::Rng;
use tumble_core::time::Stopwatch;
use tumble_game::GameConfig;

use crate::scenario::{drop_sphere, run_session, DropOptions, RunOptions};

/// Tumble physics sandbox
#[derive(Parser)]
#[command(name = "tumble")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Play a headless session with scripted input
    Run {
        /// Simulated duration in seconds
        #[arg(short, long, default_value = "10")]
        seconds: f32,

        /// Frames per simulated second
        #[arg(short, long, default_value = "60")]
        fps: u32,

        /// Spheres to shoot
        #[arg(long, default_value = "20")]
        spheres: usize,

        /// Crates to spawn
        #[arg(long, default_value = "10")]
        crates: usize,

        /// Seed for crate randomness (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Drop a sphere onto the ground and report the bounce
    Drop {
        /// Center height above the ground
        #[arg(long, default_value = "10")]
        height: f32,

        /// Restitution override
        #[arg(short, long)]
        restitution: Option<f32>,

        /// Sphere radius
        #[arg(long, default_value = "0.5")]
        radius: f32,
    },

    /// Print the effective configuration as JSON
    Config,
}

/// Execute the CLI command
pub fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    match cli.command {
        Commands::Run { seconds, fps, spheres, crates, seed } => {
            let seed = seed.unwrap_or_else(|| rand::rng().random());
            log::info!("Running {}s at {} fps ({} spheres, {} crates)", seconds, fps, spheres, crates);

            let options = RunOptions {
                seconds,
                fps,
                spheres,
                crates,
                seed,
                report_interval: 1.0,
            };
            let mut stopwatch = Stopwatch::new();
            let report = run_session(&config, &options)?;
            stopwatch.stop();

            log::info!("Session complete in {:.1} ms", stopwatch.elapsed_secs() * 1000.0);
            for line in report.hud.lines().iter().take(3) {
                log::info!("  {}", line);
            }
            log::info!("  Seed: {}", report.seed);
            log::info!("  Fired: {} spheres, {} crates", report.spheres_fired, report.crates_spawned);
            log::info!("  Contacts: {}", report.contacts);
            log::info!(
                "  Removed: {} expired, {} out of bounds, {} corrupted, {} evicted",
                report.expired,
                report.out_of_bounds,
                report.corrupted,
                report.evicted
            );
        }

        Commands::Drop { height, restitution, radius } => {
            let options = DropOptions {
                height,
                restitution,
                radius,
                ..Default::default()
            };
            let report = drop_sphere(&config.physics, &options)?;

            log::info!("Drop from {} m (restitution {})", height, report.restitution);
            log::info!("  First contact: {:.3} s", report.first_contact_time);
            log::info!("  Impact speed: {:.3} m/s", report.impact_speed);
            log::info!("  Rebound speed: {:.3} m/s", report.rebound_speed);
            log::info!("  Ratio: {:.3}", report.ratio);
            match report.settle_time {
                Some(time) => log::info!("  Settled after {:.2} s", time),
                None => log::info!("  Still bouncing after {} s", options.max_seconds),
            }
        }

        Commands::Config => {
            println!("{}", config.to_json_pretty()?);
        }
    }

    Ok(())
}
