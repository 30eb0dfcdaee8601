//! Tessera Runtime
//!
//! Boots the headless engine, spawns the configured scene and drives the
//! script host for a fixed number of frames.

mod runtime;
mod scripts;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tessera_services::Settings;
use tracing_subscriber::EnvFilter;

use crate::runtime::{demo_scene, Runtime};

#[derive(Parser)]
#[command(name = "tessera", about = "Run Tessera scripts against the headless engine")]
struct Args {
    /// Settings file (JSON). Defaults apply when omitted.
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 300)]
    frames: u64,

    /// Seconds per frame
    #[arg(short, long, default_value_t = 1.0 / 60.0)]
    delta: f32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.filter)),
        )
        .init();

    tracing::info!("Tessera v{}", tessera_core::VERSION);

    let mut runtime = Runtime::new(&settings);
    let specs = if settings.scene.entities.is_empty() {
        tracing::info!("no scene configured, using the demo scene");
        demo_scene()
    } else {
        settings.scene.entities.clone()
    };
    let spawned = runtime.populate(&specs)?;
    tracing::info!(
        entities = spawned.len(),
        scripts = runtime.host().len(),
        "scene ready"
    );

    let summary = runtime.run(args.frames, args.delta);
    tracing::info!(
        frames = summary.frames,
        engine_frames = runtime.engine().frame_count(),
        fixed_steps = summary.fixed_steps,
        destroyed = summary.destroyed,
        "run complete"
    );

    Ok(())
}
