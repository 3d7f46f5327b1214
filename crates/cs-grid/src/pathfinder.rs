//! Pathfinding trait and default A* implementation.
//!
//! # Pluggability
//!
//! The behavior layer calls routing through the [`Pathfinder`] trait, so a
//! host can swap in a different search without touching agents.
//!
//! # Cost units
//!
//! Step costs are integers: 10 for a straight move, 14 for a diagonal.
//! The heuristic is the octile distance on the same scale, which is
//! admissible and consistent for this move set.
//!
//! # Determinism
//!
//! The open set pops the lowest `f_cost`; ties go to the lower `h_cost`,
//! and remaining ties to the cell that entered the open set first.  This is
//! exactly the order a linear scan over an insertion-ordered open list
//! produces, so results do not depend on heap internals.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use cs_core::{CellId, Vec2};

use crate::grid::{Grid, GridCell};

const STRAIGHT_COST: u32 = 10;
const DIAGONAL_COST: u32 = 14;

// ── Path ──────────────────────────────────────────────────────────────────────

/// Simplified waypoint route from a start position to a goal cell.
///
/// Only turn points and the goal are kept.  An empty path means the goal is
/// unreachable; a reachable goal always yields at least one waypoint (the
/// goal cell's centre), even when start and goal share a cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    waypoints: Vec<Vec2>,
    cost:      u32,
}

impl Path {
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    #[inline]
    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    #[inline]
    pub fn waypoint(&self, index: usize) -> Option<Vec2> {
        self.waypoints.get(index).copied()
    }

    /// Final waypoint (the goal cell centre), if any.
    #[inline]
    pub fn last(&self) -> Option<Vec2> {
        self.waypoints.last().copied()
    }

    /// Total search cost in 10/14 step units.
    #[inline]
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

/// Unsimplified search result: every cell from start to goal inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRoute {
    pub cells: Vec<CellId>,
    pub cost:  u32,
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable route search over a [`Grid`].
///
/// Implementations must be `Send + Sync` and must not keep per-call state in
/// `self`, so one instance can serve concurrent or nested searches.
pub trait Pathfinder: Send + Sync {
    /// Route from `start` to `goal`, both snapped to their containing cells.
    ///
    /// Returns an empty [`Path`] when the goal cell is not walkable or cannot
    /// be reached.  Unreachability is an ordinary outcome, not an error.
    fn find_path(&self, grid: &Grid, start: Vec2, goal: Vec2) -> Path;
}

// ── AStarPathfinder ───────────────────────────────────────────────────────────

/// A* over the 8-connected grid with integer octile costs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPathfinder;

impl Pathfinder for AStarPathfinder {
    fn find_path(&self, grid: &Grid, start: Vec2, goal: Vec2) -> Path {
        let start_cell = grid.cell_at(start);
        let goal_cell  = grid.cell_at(goal);
        match self.search(grid, start_cell, goal_cell) {
            Some(route) => Path {
                waypoints: simplify(grid, &route.cells),
                cost:      route.cost,
            },
            None => {
                tracing::trace!(%start, %goal, "no path");
                Path::empty()
            }
        }
    }
}

impl AStarPathfinder {
    /// Raw cell-level search.  `None` if `goal` is unwalkable or unreachable.
    pub fn search(&self, grid: &Grid, start: CellId, goal: CellId) -> Option<CellRoute> {
        if !grid.is_walkable(goal) {
            return None;
        }

        let goal_ref = grid.cell(goal);
        let mut scratch = Scratch::new(grid.cell_count());
        let mut open: BinaryHeap<Reverse<OpenEntry>> = BinaryHeap::new();

        scratch.g[start.index()] = 0;
        scratch.h[start.index()] = octile_distance(grid.cell(start), goal_ref);
        scratch.open(start, &mut open);

        while let Some(Reverse(entry)) = open.pop() {
            let current = entry.cell;
            if scratch.closed[current.index()] || entry.f != scratch.f(current) {
                continue; // stale entry
            }
            scratch.closed[current.index()] = true;

            if current == goal {
                return Some(CellRoute {
                    cells: scratch.retrace(start, goal),
                    cost:  scratch.g[goal.index()],
                });
            }

            let current_ref = grid.cell(current);
            let current_g = scratch.g[current.index()];
            for neighbor in grid.neighbors(current) {
                if !grid.is_walkable(neighbor) || scratch.closed[neighbor.index()] {
                    continue;
                }
                let neighbor_ref = grid.cell(neighbor);
                let new_g = current_g + octile_distance(current_ref, neighbor_ref);
                if new_g < scratch.g[neighbor.index()] {
                    scratch.g[neighbor.index()] = new_g;
                    scratch.h[neighbor.index()] = octile_distance(neighbor_ref, goal_ref);
                    scratch.parent[neighbor.index()] = current;
                    scratch.open(neighbor, &mut open);
                }
            }
        }

        None
    }
}

/// Octile distance between two cells in 10/14 units:
/// `14 * min(dx, dy) + 10 * (max(dx, dy) - min(dx, dy))`.
#[inline]
pub fn octile_distance(a: &GridCell, b: &GridCell) -> u32 {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    let (lo, hi) = if dx < dy { (dx, dy) } else { (dy, dx) };
    DIAGONAL_COST * lo + STRAIGHT_COST * (hi - lo)
}

// ── Search internals ──────────────────────────────────────────────────────────

/// Heap key.  Field order gives the pop order: `f`, then `h`, then first
/// insertion sequence.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct OpenEntry {
    f:    u32,
    h:    u32,
    seq:  u32,
    cell: CellId,
}

/// Per-call search state, indexed by `CellId`.  Allocated fresh for every
/// search and dropped when it returns.
struct Scratch {
    g:      Vec<u32>,
    h:      Vec<u32>,
    parent: Vec<CellId>,
    seq:    Vec<u32>,
    closed: Vec<bool>,
    next_seq: u32,
}

impl Scratch {
    fn new(cells: usize) -> Self {
        Self {
            g:        vec![u32::MAX; cells],
            h:        vec![0; cells],
            parent:   vec![CellId::INVALID; cells],
            seq:      vec![u32::MAX; cells],
            closed:   vec![false; cells],
            next_seq: 0,
        }
    }

    #[inline]
    fn f(&self, cell: CellId) -> u32 {
        self.g[cell.index()] + self.h[cell.index()]
    }

    /// Push `cell` with its current costs.  A cell keeps the sequence number
    /// of its first insertion; later pushes only supersede the stale entry.
    fn open(&mut self, cell: CellId, heap: &mut BinaryHeap<Reverse<OpenEntry>>) {
        let i = cell.index();
        if self.seq[i] == u32::MAX {
            self.seq[i] = self.next_seq;
            self.next_seq += 1;
        }
        heap.push(Reverse(OpenEntry {
            f:    self.f(cell),
            h:    self.h[i],
            seq:  self.seq[i],
            cell,
        }));
    }

    fn retrace(&self, start: CellId, goal: CellId) -> Vec<CellId> {
        let mut cells = vec![goal];
        let mut cur = goal;
        while cur != start {
            cur = self.parent[cur.index()];
            cells.push(cur);
        }
        cells.reverse();
        cells
    }
}

/// Keep only the cells where the movement direction changes, plus the goal.
///
/// `cells` runs from start to goal inclusive.  The start cell itself is never
/// emitted: the agent is already there.
fn simplify(grid: &Grid, cells: &[CellId]) -> Vec<Vec2> {
    let mut waypoints = Vec::new();
    let direction = |from: CellId, to: CellId| {
        let (a, b) = (grid.cell(from), grid.cell(to));
        (b.x as i64 - a.x as i64, b.y as i64 - a.y as i64)
    };

    for i in 1..cells.len().saturating_sub(1) {
        if direction(cells[i - 1], cells[i]) != direction(cells[i], cells[i + 1]) {
            waypoints.push(grid.cell(cells[i]).world_position);
        }
    }
    if let Some(&goal) = cells.last() {
        waypoints.push(grid.cell(goal).world_position);
    }
    waypoints
}
