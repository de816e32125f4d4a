//! Spritereel headless player.
//!
//! Loads an animation document, spawns its part tree, and drives the engine
//! schedule at a fixed tick rate without a window: useful for validating
//! documents, scrubbing animations from scripts, and inspecting the derived
//! surface state the engine would hand to a renderer.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- walk.json --ticks 120 --log-surfaces
//! ```

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;

use spritereel::components::part::Part;
use spritereel::components::surface::Surface;
use spritereel::document::{AnimationDoc, spawn_document};
use spritereel::player::{build_schedule, tick};
use spritereel::resources::playerconfig::PlayerConfig;
use spritereel::resources::timeline::Timeline;

/// Spritereel headless animation player
#[derive(Parser)]
#[command(version, about = "Plays a spritereel animation document without a window")]
struct Cli {
    /// Animation document (JSON)
    document: PathBuf,

    /// Number of ticks to simulate (default from player.ini)
    #[arg(long)]
    ticks: Option<u64>,

    /// Play backwards
    #[arg(long)]
    reverse: bool,

    /// Override the document's playback fps
    #[arg(long)]
    fps: Option<f32>,

    /// Log every surface's derived state each tick
    #[arg(long)]
    log_surfaces: bool,

    /// Player configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => PlayerConfig::with_path(path.clone()),
        None => PlayerConfig::new(),
    };
    config.load_from_file().ok(); // ignore errors, use defaults
    if cli.log_surfaces {
        config.log_surfaces = true;
    }
    let max_ticks = cli.ticks.unwrap_or(config.max_ticks);
    let dt = 1.0 / config.tick_rate;

    let doc = match AnimationDoc::load_from_file(&cli.document) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Failed to load {}: {e}", cli.document.display());
            std::process::exit(1);
        }
    };

    let mut world = World::new();
    if let Err(e) = spawn_document(&mut world, &doc) {
        eprintln!("Failed to spawn '{}': {e}", doc.name);
        std::process::exit(1);
    }

    {
        let mut timeline = world.resource_mut::<Timeline>();
        let last_frame = timeline.total_frames - 1;
        if cli.reverse {
            timeline.reverse = true;
            timeline.current_frame = last_frame;
        }
        if let Some(fps) = cli.fps {
            timeline.fps = fps;
        }
    }
    world.insert_resource(config.clone());

    log::info!(
        "playing '{}': {} frames at {} fps, {} ticks at {} ticks/s",
        doc.name,
        doc.total_frames,
        world.resource::<Timeline>().fps,
        max_ticks,
        config.tick_rate
    );

    let mut schedule = build_schedule();
    for tick_index in 0..max_ticks {
        tick(&mut world, &mut schedule, dt);

        if config.log_surfaces {
            log_surface_states(&mut world, tick_index);
        }
        if !world.resource::<Timeline>().playing {
            log::info!("animation finished after {} ticks", tick_index + 1);
            break;
        }
    }

    print_summary(&mut world);
}

fn log_surface_states(world: &mut World, tick_index: u64) {
    let frame = world.resource::<Timeline>().current_frame;
    let mut query = world.query::<(&Part, &Surface)>();
    for (part, surface) in query.iter(world) {
        log::info!(
            "tick {tick_index} frame {frame}: '{}' active={} alpha={:.3} pos=({:.1}, {:.1})",
            part.name,
            surface.active,
            surface.alpha,
            surface.transform.position.x,
            surface.transform.position.y,
        );
    }
}

fn print_summary(world: &mut World) {
    let timeline = world.resource::<Timeline>().clone();
    println!(
        "stopped at frame {}/{} ({})",
        timeline.current_frame,
        timeline.total_frames,
        if timeline.playing { "playing" } else { "finished" }
    );
    let mut query = world.query::<&Part>();
    for part in query.iter(world) {
        println!(
            "  {:<16} last_applied={:?} alpha={:.3} visible={} halted={}",
            part.name, part.last_applied, part.local_alpha, part.local_visible, part.halted
        );
    }
}
