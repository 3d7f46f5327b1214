//! The owning station collection.
//!
//! # Spatial index
//!
//! Station positions never change after setup, so an R-tree (via `rstar`) is
//! bulk-loaded once and answers radius queries for the "nearest free station"
//! search every idle agent performs.  State lives in the `stations` vector,
//! indexed by `StationId`; the tree only stores positions and IDs.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use cs_core::{StationId, Vec2};

use crate::{Station, StationSpec};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct StationEntry {
    point: [f64; 2],
    id:    StationId,
}

impl RTreeObject for StationEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for StationEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── StationPool ───────────────────────────────────────────────────────────────

/// Every station in the simulation plus a spatial index over their positions.
pub struct StationPool {
    stations:    Vec<Station>,
    spatial_idx: RTree<StationEntry>,
}

impl StationPool {
    /// Create one `Free` station per spec, numbered in input order.
    ///
    /// Specs without their own duration use `default_duration`.
    pub fn new(specs: &[StationSpec], default_duration: f64) -> Self {
        let stations: Vec<Station> = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                Station::new(
                    StationId(i as u32),
                    spec.position,
                    spec.task_duration.unwrap_or(default_duration),
                )
            })
            .collect();
        let entries = stations
            .iter()
            .map(|s| StationEntry { point: [s.position().x, s.position().y], id: s.id() })
            .collect();
        Self {
            stations,
            spatial_idx: RTree::bulk_load(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    #[inline]
    pub fn get(&self, id: StationId) -> Option<&Station> {
        self.stations.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: StationId) -> Option<&mut Station> {
        self.stations.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> + '_ {
        self.stations.iter()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// The closest `Free` station within `radius` of `from`.
    ///
    /// Equal distances resolve to the lower `StationId`, so the choice does
    /// not depend on R-tree layout.
    pub fn nearest_free(&self, from: Vec2, radius: f64) -> Option<StationId> {
        if radius.is_nan() || radius < 0.0 {
            return None;
        }
        self.spatial_idx
            .locate_within_distance([from.x, from.y], radius * radius)
            .filter(|e| self.stations[e.id.index()].is_free())
            .map(|e| (e.distance_2(&[from.x, from.y]), e.id))
            .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
            .map(|(_, id)| id)
    }

    /// Number of `Occupied` stations.
    pub fn busy_count(&self) -> usize {
        self.stations.iter().filter(|s| s.is_occupied()).count()
    }

    /// Number of `Completed` stations.
    pub fn completed_count(&self) -> usize {
        self.stations.iter().filter(|s| s.is_completed()).count()
    }

    /// Mean progress fraction over all stations, in `[0, 1]`.  Completed
    /// stations count as 1, freed ones as 0.
    pub fn task_progress(&self) -> f64 {
        if self.stations.is_empty() {
            return 0.0;
        }
        self.stations.iter().map(Station::progress_fraction).sum::<f64>() / self.stations.len() as f64
    }

    /// `true` when there is at least one station and all are `Completed`.
    pub fn all_completed(&self) -> bool {
        !self.stations.is_empty() && self.stations.iter().all(Station::is_completed)
    }

    /// Return every station to `Free` with zero progress.
    pub fn reset_all(&mut self) {
        for station in &mut self.stations {
            station.reset();
        }
    }
}
