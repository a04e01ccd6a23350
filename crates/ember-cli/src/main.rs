//! Ember CLI - inspect, repair and exercise particle effect profiles

mod commands;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use commands::{profiles, simulate};
use ember_particles::ParticleSettings;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ember")]
#[command(about = "Particle-effects toolkit for 2D games", long_about = None)]
#[command(version)]
struct Cli {
    /// Settings file (TOML); defaults apply when omitted
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emission profile file operations
    #[command(subcommand)]
    Profiles(profiles::ProfileCommands),

    /// Run an effect headlessly and report particle counts
    Simulate {
        /// Effect type name (e.g. Explosion, Rain)
        #[arg(long)]
        effect: String,

        /// Number of frames to run
        #[arg(long, default_value = "60")]
        frames: u32,

        /// Seconds per frame
        #[arg(long, default_value = "0.016666668")]
        dt: f32,

        /// RNG seed (overrides the settings file)
        #[arg(long)]
        seed: Option<u32>,

        /// Keep emitting with the effect's continuous interval
        #[arg(long)]
        continuous: bool,

        /// Ground height for rain and snow
        #[arg(long)]
        ground: Option<f32>,

        /// Profile file to load instead of the built-in tuning
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_settings(path: Option<&PathBuf>) -> Result<ParticleSettings> {
    match path {
        Some(path) => ParticleSettings::load(path)
            .with_context(|| format!("Failed to load settings {}", path.display())),
        None => Ok(ParticleSettings::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = load_settings(cli.settings.as_ref())?;

    match cli.command {
        Commands::Profiles(cmd) => profiles::run(cmd, &settings),
        Commands::Simulate {
            effect,
            frames,
            dt,
            seed,
            continuous,
            ground,
            path,
        } => simulate::run(
            simulate::SimulateArgs {
                effect,
                frames,
                dt,
                seed,
                continuous,
                ground,
                path,
            },
            settings,
        ),
    }
}
