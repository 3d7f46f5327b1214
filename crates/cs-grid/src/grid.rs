//! Static walkability grid.
//!
//! # Layout
//!
//! The world rectangle `world_size` centred on `center` is divided into
//! square cells of side `2 * cell_radius`.  Cells are stored row-major:
//!
//! ```text
//! CellId = y * size_x + x        (x grows right, y grows up)
//! ```
//!
//! Cell `(x, y)` sits at world position
//! `bottom_left + ((x + 0.5) * diameter, (y + 0.5) * diameter)`.
//!
//! Walkability is decided once per cell at build time by the obstacle
//! predicate; afterwards the grid has no writer.

use cs_core::{CellId, Vec2};

use crate::{GridError, GridResult};

// ── GridSpec ──────────────────────────────────────────────────────────────────

/// World bounds and resolution of a grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    /// World position of the centre of the grid rectangle.
    pub center: Vec2,
    /// Width and height of the covered area in world units.
    pub world_size: Vec2,
    /// Half the side length of one cell.
    pub cell_radius: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            center:      Vec2::ZERO,
            world_size:  Vec2::new(50.0, 50.0),
            cell_radius: 0.5,
        }
    }
}

// ── GridCell ──────────────────────────────────────────────────────────────────

/// One immutable grid cell.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridCell {
    pub walkable:       bool,
    pub world_position: Vec2,
    pub x:              u32,
    pub y:              u32,
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Immutable walkability grid.  Construct with [`Grid::build`].
pub struct Grid {
    size_x:      u32,
    size_y:      u32,
    diameter:    f64,
    bottom_left: Vec2,
    world_size:  Vec2,
    cells:       Vec<GridCell>,
}

impl Grid {
    /// Classify every cell with `is_blocked` and return the finished grid.
    ///
    /// The predicate is called exactly once per cell, with the cell's centre.
    /// Time complexity: O(size_x × size_y).
    pub fn build<F>(spec: &GridSpec, is_blocked: F) -> GridResult<Grid>
    where
        F: Fn(Vec2) -> bool,
    {
        if !(spec.cell_radius.is_finite() && spec.cell_radius > 0.0) {
            return Err(GridError::InvalidCellRadius(spec.cell_radius));
        }
        let diameter = spec.cell_radius * 2.0;
        let size_x = (spec.world_size.x / diameter).round();
        let size_y = (spec.world_size.y / diameter).round();
        if !(size_x >= 1.0 && size_y >= 1.0) {
            return Err(GridError::EmptyGrid {
                width:  spec.world_size.x,
                height: spec.world_size.y,
                diameter,
            });
        }
        let (size_x, size_y) = (size_x as u32, size_y as u32);

        let bottom_left = spec.center - spec.world_size * 0.5;
        let mut cells = Vec::with_capacity(size_x as usize * size_y as usize);
        for y in 0..size_y {
            for x in 0..size_x {
                let world_position = bottom_left
                    + Vec2::new(
                        x as f64 * diameter + spec.cell_radius,
                        y as f64 * diameter + spec.cell_radius,
                    );
                cells.push(GridCell {
                    walkable: !is_blocked(world_position),
                    world_position,
                    x,
                    y,
                });
            }
        }

        Ok(Grid {
            size_x,
            size_y,
            diameter,
            bottom_left,
            world_size: spec.world_size,
            cells,
        })
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn size_x(&self) -> u32 {
        self.size_x
    }

    pub fn size_y(&self) -> u32 {
        self.size_y
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cell_diameter(&self) -> f64 {
        self.diameter
    }

    /// Number of walkable cells.
    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|c| c.walkable).count()
    }

    // ── Cell access ───────────────────────────────────────────────────────

    #[inline]
    pub fn cell(&self, id: CellId) -> &GridCell {
        &self.cells[id.index()]
    }

    /// ID of the cell at grid coordinates `(x, y)`, or `None` out of range.
    #[inline]
    pub fn cell_id(&self, x: i64, y: i64) -> Option<CellId> {
        if x < 0 || y < 0 || x >= self.size_x as i64 || y >= self.size_y as i64 {
            return None;
        }
        Some(CellId((y as u32) * self.size_x + x as u32))
    }

    /// The cell containing `pos`.  Positions outside the grid clamp to the
    /// nearest edge cell.
    pub fn cell_at(&self, pos: Vec2) -> CellId {
        let local = pos - self.bottom_left;
        let x = clamp_axis(local.x / self.diameter, self.size_x);
        let y = clamp_axis(local.y / self.diameter, self.size_y);
        CellId(y * self.size_x + x)
    }

    #[inline]
    pub fn is_walkable(&self, id: CellId) -> bool {
        self.cells[id.index()].walkable
    }

    /// `true` if the cell containing `pos` is walkable.
    #[inline]
    pub fn walkable_at(&self, pos: Vec2) -> bool {
        self.is_walkable(self.cell_at(pos))
    }

    /// `true` if `pos` lies inside the grid rectangle (no clamping needed).
    pub fn contains(&self, pos: Vec2) -> bool {
        let local = pos - self.bottom_left;
        (0.0..self.world_size.x).contains(&local.x) && (0.0..self.world_size.y).contains(&local.y)
    }

    /// The up-to-8 cells surrounding `id`, skipping out-of-range indices.
    ///
    /// Walkability is **not** filtered here; callers decide.  Order is fixed
    /// (`dx` outer, `dy` inner, both from -1 to 1) so searches are
    /// reproducible.
    pub fn neighbors(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        let cell = self.cell(id);
        let (cx, cy) = (cell.x as i64, cell.y as i64);
        (-1i64..=1)
            .flat_map(|dx| (-1i64..=1).map(move |dy| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .filter_map(move |(dx, dy)| self.cell_id(cx + dx, cy + dy))
    }

    /// Iterator over every cell in `CellId` order.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, &GridCell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, c)| (CellId(i as u32), c))
    }
}

#[inline]
fn clamp_axis(scaled: f64, size: u32) -> u32 {
    if scaled.is_nan() || scaled <= 0.0 {
        0
    } else {
        (scaled.floor() as u64).min(size as u64 - 1) as u32
    }
}
