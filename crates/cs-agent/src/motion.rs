//! Waypoint following.

use cs_core::Vec2;

use crate::AgentMind;

/// Outcome of one movement update.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Movement {
    /// Waypoints remain.
    EnRoute,
    /// The final waypoint has been reached (or there was no path).
    Arrived,
}

impl AgentMind {
    /// Move `position` along the current path by up to `budget` world units.
    ///
    /// A waypoint counts as reached once the agent is within `reach` of it;
    /// leftover budget carries over to the next waypoint, so a fast agent
    /// can pass several short legs in one tick.
    pub fn follow_path(&mut self, position: &mut Vec2, budget: f64, reach: f64) -> Movement {
        let mut budget = budget.max(0.0);
        loop {
            let Some(target) = self.path.waypoint(self.waypoint_index) else {
                return Movement::Arrived;
            };
            if position.distance(target) <= reach {
                self.waypoint_index += 1;
                continue;
            }
            if budget <= 0.0 {
                return Movement::EnRoute;
            }
            let next = position.step_towards(target, budget);
            budget -= position.distance(next);
            *position = next;
            if position.distance(target) > reach {
                return Movement::EnRoute;
            }
        }
    }
}
