//! Fluent builder for constructing a [`Sim`].

use cs_agent::{AgentRngs, AgentStore, AgentStoreBuilder};
use cs_behavior::BehaviorModel;
use cs_core::{Role, SimClock, SimConfig, Vec2};
use cs_grid::{Grid, Pathfinder};
use cs_station::{StationPool, StationSpec};

use crate::{Sim, SimError, SimResult};

/// Everything needed to recreate the dynamic entities on reset.
pub(crate) struct Setup {
    pub(crate) roles:    Vec<Role>,
    pub(crate) spawns:   Vec<Vec2>,
    pub(crate) stations: Vec<StationSpec>,
}

impl Setup {
    /// Fresh agents (alive, at their spawn points, with their initial minds)
    /// and freshly seeded RNGs.
    pub(crate) fn spawn_agents<B: BehaviorModel>(
        &self,
        config:   &SimConfig,
        behavior: &B,
    ) -> (AgentStore, AgentRngs) {
        let (mut store, rngs) = AgentStoreBuilder::new(config.seed)
            .agents(&self.roles, &self.spawns)
            .build();
        for (mind, &role) in store.mind.iter_mut().zip(&self.roles) {
            *mind = behavior.initial_mind(role);
        }
        (store, rngs)
    }

    pub(crate) fn spawn_stations(&self, config: &SimConfig) -> StationPool {
        StationPool::new(&self.stations, config.task_duration)
    }
}

/// Fluent builder for [`Sim<B, P>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — role counts, seed, tick length, tunables
/// - [`Grid`] — the static walkability grid
/// - `B: BehaviorModel` — the behavior implementation
/// - `P: Pathfinder` — the routing algorithm (e.g. [`cs_grid::AStarPathfinder`])
/// - `.stations(v)` — at least one station
/// - `.spawns(v)` — one spawn point per agent
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                                          |
/// |---------------|--------------------------------------------------|
/// | `.roles(v)`   | `config.crewmates` crewmates, then adversaries   |
///
/// # Example
///
/// ```rust,ignore
/// let behavior = StationBehavior::from_config(&config)?;
/// let mut sim = SimBuilder::new(config, grid, behavior, AStarPathfinder)
///     .stations(stations)
///     .spawns(spawns)
///     .build()?;
/// let stats = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<B: BehaviorModel, P: Pathfinder> {
    config:     SimConfig,
    grid:       Grid,
    behavior:   B,
    pathfinder: P,
    stations:   Vec<StationSpec>,
    spawns:     Option<Vec<Vec2>>,
    roles:      Option<Vec<Role>>,
}

impl<B: BehaviorModel, P: Pathfinder> SimBuilder<B, P> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, grid: Grid, behavior: B, pathfinder: P) -> Self {
        Self {
            config,
            grid,
            behavior,
            pathfinder,
            stations: Vec::new(),
            spawns:   None,
            roles:    None,
        }
    }

    /// Stations, numbered in the order given.
    pub fn stations(mut self, stations: Vec<StationSpec>) -> Self {
        self.stations = stations;
        self
    }

    /// Spawn point per agent (must be length `config.agent_count()`).
    pub fn spawns(mut self, spawns: Vec<Vec2>) -> Self {
        self.spawns = Some(spawns);
        self
    }

    /// Explicit role per agent, in processing order.  The number of each role
    /// must still match `config.crewmates` and `config.adversaries`.
    pub fn roles(mut self, roles: Vec<Role>) -> Self {
        self.roles = Some(roles);
        self
    }

    /// Validate inputs, spawn agents and stations, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<B, P>> {
        self.config.validate()?;
        let agent_count = self.config.agent_count();

        // ── Roles ─────────────────────────────────────────────────────────
        let roles = match self.roles {
            Some(r) => {
                if r.len() != agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: agent_count,
                        got:      r.len(),
                        what:     "roles",
                    });
                }
                let adversaries = r.iter().filter(|role| role.is_adversary()).count();
                if adversaries != self.config.adversaries {
                    return Err(SimError::Config(format!(
                        "roles list {adversaries} adversaries, config expects {}",
                        self.config.adversaries
                    )));
                }
                r
            }
            None => std::iter::repeat_n(Role::Crewmate, self.config.crewmates)
                .chain(std::iter::repeat_n(Role::Adversary, self.config.adversaries))
                .collect(),
        };

        // ── Spawns ────────────────────────────────────────────────────────
        let Some(spawns) = self.spawns else {
            return Err(SimError::Config("no spawn points supplied".into()));
        };
        if spawns.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      spawns.len(),
                what:     "spawn points",
            });
        }
        for (i, &p) in spawns.iter().enumerate() {
            if !self.grid.contains(p) || !self.grid.walkable_at(p) {
                return Err(SimError::Config(format!(
                    "spawn point {p} of agent {i} is not on a walkable cell"
                )));
            }
        }

        // ── Stations ──────────────────────────────────────────────────────
        if self.stations.is_empty() {
            return Err(SimError::Config("at least one station is required".into()));
        }
        for (i, spec) in self.stations.iter().enumerate() {
            if let Some(d) = spec.task_duration {
                if !(d.is_finite() && d > 0.0) {
                    return Err(SimError::Config(format!(
                        "station {i} task duration must be positive, got {d}"
                    )));
                }
            }
            let p = spec.position;
            if !self.grid.contains(p) || !self.grid.walkable_at(p) {
                return Err(SimError::Config(format!(
                    "station {i} at {p} is not on a walkable cell"
                )));
            }
        }

        let setup = Setup { roles, spawns, stations: self.stations };
        let (agents, rngs) = setup.spawn_agents(&self.config, &self.behavior);
        let stations = setup.spawn_stations(&self.config);

        tracing::info!(
            agents   = agents.count,
            stations = stations.len(),
            seed     = self.config.seed,
            "simulation built"
        );

        Ok(Sim {
            clock:      SimClock::new(self.config.tick_seconds),
            config:     self.config,
            grid:       self.grid,
            agents,
            rngs,
            stations,
            behavior:   self.behavior,
            pathfinder: self.pathfinder,
            setup,
            winner:     None,
        })
    }
}
