//! skeld — runnable station-contention scenario for the crewsim simulator.
//!
//! Loads a TOML scenario (simulation tunables, obstacle rectangles and
//! stations), builds the grid, scatters agents over the spawn area and runs
//! until one side wins or the tick limit is reached.  Per-tick counts and
//! eliminations are written as CSV.
//!
//! ```text
//! cargo run -p skeld -- --config demos/skeld/skeld.toml --output output/skeld
//! RUST_LOG=cs_sim=debug cargo run -p skeld
//! ```

mod config;
mod spawn;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};

use cs_behavior::StationBehavior;
use cs_core::SimRng;
use cs_grid::{AStarPathfinder, Grid};
use cs_output::{CsvWriter, SimOutputObserver};
use cs_sim::SimBuilder;

use config::ScenarioConfig;
use spawn::place_spawns;

/// Crewmates race for task stations while adversaries hunt them.
#[derive(Parser, Debug)]
#[command(name = "skeld")]
#[command(about = "Run a station-contention scenario and write CSV statistics")]
struct Args {
    /// Scenario file (TOML)
    #[arg(long, default_value = "demos/skeld/skeld.toml")]
    config: PathBuf,

    /// Directory for tick_summaries.csv and eliminations.csv
    #[arg(long, default_value = "output/skeld")]
    output: PathBuf,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Write a tick summary every N ticks (0 = final row only)
    #[arg(long, default_value_t = 50)]
    interval: u64,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    // 1. Scenario.
    let mut scenario = ScenarioConfig::from_file(&args.config)?;
    if let Some(seed) = args.seed {
        scenario.sim.seed = seed;
    }
    let ScenarioConfig { sim: config, map } = scenario;
    info!(
        path        = %args.config.display(),
        seed        = config.seed,
        crewmates   = config.crewmates,
        adversaries = config.adversaries,
        stations    = map.stations.len(),
        "scenario loaded"
    );

    // 2. Grid.
    let grid = Grid::build(&map.grid, |p| map.is_blocked(p))?;
    info!(
        cells    = grid.cell_count(),
        walkable = grid.walkable_count(),
        "grid built"
    );

    // 3. Spawns.
    let mut rng = SimRng::new(config.seed).child(1);
    let spawns = place_spawns(&grid, map.spawn_min, map.spawn_max, config.agent_count(), &mut rng)?;

    // 4. Sim.
    let behavior = StationBehavior::from_config(&config)?;
    let mut sim = SimBuilder::new(config, grid, behavior, AStarPathfinder)
        .stations(map.stations)
        .spawns(spawns)
        .build()?;

    // 5. Output.
    std::fs::create_dir_all(&args.output)?;
    let writer = CsvWriter::new(&args.output)?;
    let mut obs = SimOutputObserver::new(writer, args.interval);

    // 6. Run.
    let t0 = Instant::now();
    let stats = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        warn!("output error: {e}");
    }

    // 7. Summary.
    println!();
    println!("Simulation complete in {:.3} s wall time", elapsed.as_secs_f64());
    println!(
        "  {} ticks, {:.1} s simulated, winner: {}",
        stats.tick.0,
        stats.elapsed_secs,
        stats.winner.map_or("none", |s| s.as_str()),
    );
    println!(
        "  crewmates alive {}/{}, stations completed {}/{} ({:.0}% task progress)",
        stats.alive_crewmates,
        stats.total_crewmates,
        stats.stations_completed,
        stats.stations_total,
        stats.task_progress * 100.0,
    );
    println!("  output in {}", args.output.display());
    println!();

    println!("{:<8} {:<10} {:<7} {:<16} {:<6}", "Agent", "Role", "Alive", "State", "Tasks");
    println!("{}", "-".repeat(50));
    for i in 0..sim.agents.count {
        println!(
            "{:<8} {:<10} {:<7} {:<16} {:<6}",
            i,
            sim.agents.role[i].as_str(),
            if sim.agents.alive[i] { "yes" } else { "no" },
            sim.agents.mind[i].state.name(),
            sim.agents.tasks_completed[i],
        );
    }

    Ok(())
}
