// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tweenline Preview - headless playback of tween timelines
//!
//! Plays an animation document against a RON scene at a fixed frame rate and
//! logs every property write and playback event.
//!
//! ## Architecture
//!
//! The preview loads a [`tweenline_sequencer::Animation`] and a
//! [`tweenline_sequencer::MemoryHost`] scene, applies the settings overrides,
//! and drives the animation with a fixed time step until it stops.

mod demo;
mod error;
mod runner;
mod settings;

use clap::{Parser, Subcommand};
use error::{PreviewError, PreviewResult};
use runner::PreviewRunner;
use settings::{PreviewSettings, DEFAULT_LOG_FILTER, SETTINGS_FILE_NAME};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tweenline_sequencer::{Animation, MemoryHost};

#[derive(Parser)]
#[command(name = "tweenline")]
#[command(about = "Headless preview for tween timelines", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an animation against a scene
    Run {
        /// Path to the animation document
        #[arg(long)]
        animation: PathBuf,

        /// Path to the scene file
        #[arg(long)]
        scene: PathBuf,

        /// Path to the settings file (defaults to preview.ron next to the animation)
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Override the simulated frame rate
        #[arg(long)]
        fps: Option<f32>,
    },

    /// Write a sample animation and scene
    Demo {
        /// Output directory
        #[arg(long, default_value = "demo")]
        out: PathBuf,
    },
}

impl Commands {
    fn settings_path(&self) -> Option<PathBuf> {
        match self {
            Commands::Run { settings: Some(path), .. } => Some(path.clone()),
            Commands::Run { animation, .. } => {
                Some(animation.parent().unwrap_or(Path::new(".")).join(SETTINGS_FILE_NAME))
            }
            Commands::Demo { .. } => None,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let settings = match cli.command.settings_path() {
        Some(path) => PreviewSettings::load_or_default(&path),
        None => Ok(PreviewSettings::default()),
    };

    // RUST_LOG wins over the settings file
    let filter = settings.as_ref().map_or(DEFAULT_LOG_FILTER, |s| s.log_filter.as_str());
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Tweenline Preview v{}", env!("CARGO_PKG_VERSION"));

    let result = settings.and_then(|settings| execute(cli.command, settings));
    if let Err(e) = result {
        tracing::error!("Preview failed: {e}");
        std::process::exit(1);
    }
}

fn execute(command: Commands, settings: PreviewSettings) -> PreviewResult<()> {
    match command {
        Commands::Run { animation, scene, fps, .. } => {
            let settings = match fps {
                Some(fps) => settings.with_frame_rate(fps)?,
                None => settings,
            };
            let animation = Animation::load(&animation)?;
            let host = load_scene(&scene)?;

            let mut runner = PreviewRunner::new(animation, host, settings);
            let report = runner.run();
            println!(
                "{}: {} frames, {} writes, {} finished, final time {:.3}s",
                runner.animation().name,
                report.frames,
                report.writes,
                report.finished,
                report.final_time
            );
            for event in &report.clip_events {
                println!("  event: {event}");
            }
            for (_, target) in runner.host().targets() {
                println!(
                    "  {}: active={} position={:?} scale={:?}",
                    target.name, target.active, target.position, target.scale
                );
            }
            Ok(())
        }
        Commands::Demo { out } => {
            let (animation, scene) = demo::write_demo(&out)?;
            PreviewSettings::default().save(&out.join(SETTINGS_FILE_NAME))?;
            println!("Animation: {}", animation.display());
            println!("Scene:     {}", scene.display());
            Ok(())
        }
    }
}

fn load_scene(path: &Path) -> PreviewResult<MemoryHost> {
    let content = std::fs::read_to_string(path)?;
    MemoryHost::from_ron(&content).map_err(PreviewError::from)
}
