//! Random spawn placement.

use anyhow::{Result, bail};
use cs_core::{SimRng, Vec2};
use cs_grid::Grid;

/// Draws per agent before the spawn area is declared unusable.
pub const SPAWN_ATTEMPTS: usize = 50;

/// One walkable point per agent, drawn uniformly from `[min, max)`.
pub fn place_spawns(grid: &Grid, min: Vec2, max: Vec2, count: usize, rng: &mut SimRng) -> Result<Vec<Vec2>> {
    let mut spawns = Vec::with_capacity(count);
    for agent in 0..count {
        let Some(p) = (0..SPAWN_ATTEMPTS)
            .map(|_| rng.point_in(min, max))
            .find(|&p| grid.contains(p) && grid.walkable_at(p))
        else {
            bail!("no walkable spawn point for agent {agent} after {SPAWN_ATTEMPTS} attempts in {min}..{max}");
        };
        spawns.push(p);
    }
    Ok(spawns)
}
