// Mondrian grid generator: CLI entry point.
//
// Builds one scene, optionally advances its agents (and the chase overlay)
// for a number of frames, prints a summary and writes the frame as JSON.
//
// Usage:
//   cargo run -p mondrian_grid -- [--seed N] [--config PATH] [--frames N]
//     [--speed PERCENT] [--chase] [--output PATH] [--pretty]
//
// Set RUST_LOG=info to see per-regeneration counts from the library.

use clap::Parser;
use mondrian_grid::chase::ChaseGame;
use mondrian_grid::config::GridConfig;
use mondrian_grid::error::Result;
use mondrian_grid::prng::GridRng;
use mondrian_grid::scene::Scene;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Nominal frame duration for time-driven overlays.
const FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Debug, Parser)]
#[command(
    name = "generate",
    about = "Generate a Mondrian-style grid composition and export it as JSON",
    version
)]
struct Args {
    /// Generator seed. Defaults to one derived from the clock.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON config file. Missing sections take their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frames of agent motion to simulate before exporting.
    #[arg(long, default_value_t = 0)]
    frames: u32,

    /// Agent speed as a percentage (0–300).
    #[arg(long, default_value_t = 100.0)]
    speed: f64,

    /// Also run the chase overlay over the simulated frames.
    #[arg(long)]
    chase: bool,

    /// Write the final frame as JSON to this path.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Pretty-print the exported JSON.
    #[arg(long)]
    pretty: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let seed = args.seed.unwrap_or_else(clock_seed);
    let config = match &args.config {
        Some(path) => GridConfig::load(path)?,
        None => GridConfig::default(),
    };

    println!("=== Mondrian Grid Generator ===");
    println!("Seed: {seed}");
    println!(
        "Canvas: {}x{}, {} columns x {} rows",
        config.width(),
        config.height(),
        config.columns.count,
        config.rows.count
    );
    println!();

    println!("[1/3] Generating composition...");
    let mut scene = Scene::new(config, seed);
    scene.motion.set_speed_percent(args.speed);
    print_summary(&scene);

    println!(
        "[2/3] Simulating {} frames at {:.0}% speed...",
        args.frames,
        scene.motion.speed_factor * 100.0
    );
    // The overlay gets its own stream so it does not shift the scene's draws.
    let mut chase_rng = GridRng::new(seed ^ 0x9e37_79b9_7f4a_7c15);
    let mut chase = if args.chase {
        let game = ChaseGame::new(scene.layout(), &mut chase_rng);
        if game.is_none() {
            println!("  Chase needs at least two rows; skipping.");
        }
        game
    } else {
        None
    };
    for _ in 0..args.frames {
        scene.tick(None);
        if let Some(game) = chase.as_mut() {
            game.update(
                scene.layout(),
                FRAME_MS,
                scene.motion.effective_factor(),
                &mut chase_rng,
            );
        }
    }
    if let Some(game) = &chase {
        let (rx, ry) = game.runner.center();
        println!(
            "  Runner at ({rx:.1}, {ry:.1}) on a {:?} lane, {} chasers in {:?} mode.",
            game.runner.lane,
            game.chasers.len(),
            game.mode
        );
    }

    println!("[3/3] Exporting...");
    match &args.output {
        Some(path) => {
            let json = scene.to_json(args.pretty)?;
            std::fs::write(path, json)?;
            println!("  Wrote {}", path.display());
        }
        None => println!("  No --output given; nothing written."),
    }

    Ok(())
}

fn print_summary(scene: &Scene) {
    let composition = scene.composition();
    let layout = &composition.layout;
    let col_sum: f64 = layout.col_widths.iter().sum::<f64>() + layout.col_gaps.iter().sum::<f64>();
    let row_sum: f64 = layout.row_heights.iter().sum::<f64>() + layout.row_gaps.iter().sum::<f64>();
    println!("  Columns + gaps: {col_sum:.3}");
    println!("  Rows + gaps:    {row_sum:.3}");
    println!(
        "  {} blocks, {} overlays, {} connectors, {} agents",
        composition.blocks.primary.len(),
        composition.blocks.overlay.len(),
        composition.connectors.len(),
        scene.agents().len()
    );
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos() as u64)
}
