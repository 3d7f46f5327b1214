//! TOML scenario file: simulation tunables plus the map.
//!
//! ```toml
//! [sim]
//! seed = 7
//! crewmates = 8
//!
//! [map.grid]
//! center = { x = 0.0, y = 0.0 }
//! world_size = { x = 44.0, y = 44.0 }
//! cell_radius = 0.5
//!
//! [[map.obstacles]]
//! min = { x = -12.0, y = -2.0 }
//! max = { x = -4.0, y = 2.0 }
//!
//! [[map.stations]]
//! position = { x = 0.5, y = 0.5 }
//! task_duration = 4.0
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use cs_core::{SimConfig, Vec2};
use cs_grid::GridSpec;
use cs_station::StationSpec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub sim: SimConfig,
    pub map: MapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default)]
    pub grid: GridSpec,
    /// Axis-aligned blocked areas.  A cell is unwalkable when its centre
    /// falls inside any of them.
    #[serde(default)]
    pub obstacles: Vec<Rect>,
    #[serde(default = "default_spawn_min")]
    pub spawn_min: Vec2,
    #[serde(default = "default_spawn_max")]
    pub spawn_max: Vec2,
    pub stations: Vec<StationSpec>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            grid:      GridSpec::default(),
            obstacles: Vec::new(),
            spawn_min: default_spawn_min(),
            spawn_max: default_spawn_max(),
            stations:  Vec::new(),
        }
    }
}

fn default_spawn_min() -> Vec2 {
    Vec2::new(-20.0, -20.0)
}

fn default_spawn_max() -> Vec2 {
    Vec2::new(20.0, 20.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn contains(&self, p: Vec2) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }
}

impl MapConfig {
    /// Obstacle predicate handed to `Grid::build`.
    pub fn is_blocked(&self, p: Vec2) -> bool {
        self.obstacles.iter().any(|r| r.contains(p))
    }
}

impl ScenarioConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: ScenarioConfig = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}
