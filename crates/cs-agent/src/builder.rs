//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use cs_agent::AgentStoreBuilder;
//! use cs_core::{Role, Vec2};
//!
//! let (store, rngs) = AgentStoreBuilder::new(/*seed=*/ 42)
//!     .agent(Role::Crewmate, Vec2::new(1.0, 1.0))
//!     .agent(Role::Adversary, Vec2::new(4.0, 2.0))
//!     .build();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(rngs.len(), 2);
//! ```

use cs_core::{Role, Vec2};

use crate::{AgentRngs, AgentStore};

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
///
/// Agents receive IDs in the order they are added.
pub struct AgentStoreBuilder {
    seed:      u64,
    roles:     Vec<Role>,
    positions: Vec<Vec2>,
}

impl AgentStoreBuilder {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            roles:     Vec::new(),
            positions: Vec::new(),
        }
    }

    /// Add one agent.
    pub fn agent(mut self, role: Role, position: Vec2) -> Self {
        self.roles.push(role);
        self.positions.push(position);
        self
    }

    /// Add agents pairwise from `roles` and `positions`.  Extra entries in
    /// the longer slice are ignored.
    pub fn agents(mut self, roles: &[Role], positions: &[Vec2]) -> Self {
        for (&role, &pos) in roles.iter().zip(positions) {
            self.roles.push(role);
            self.positions.push(pos);
        }
        self
    }

    /// Construct `AgentStore` and `AgentRngs`.  Every agent starts alive,
    /// `Idle`, with a default mind; callers overwrite minds as needed.
    pub fn build(self) -> (AgentStore, AgentRngs) {
        let count = self.roles.len();
        let store = AgentStore::new(self.roles, self.positions);
        let rngs = AgentRngs::new(count, self.seed);
        (store, rngs)
    }
}
