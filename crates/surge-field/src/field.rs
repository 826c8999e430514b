//! Distance field storage.

use surge_core::GridError;
use surge_grid::ObstacleMap;

/// Per-cell cost to the nearest target, row-major.
///
/// Values are either a finite cost or
/// [`UNREACHABLE`](DistanceField::UNREACHABLE). The sentinel is a finite
/// number so ordinary integer comparisons work on it: any finite path
/// cost compares strictly smaller, and unreachable neighbours never look
/// attractive to the resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceField {
    cols: u32,
    rows: u32,
    dist: Vec<u32>,
}

impl DistanceField {
    /// Sentinel for blocked or unreachable cells.
    ///
    /// Larger than any possible path cost: the longest path visits every
    /// cell once, and dimensions are bounded well below this value even
    /// at the weighted builder's cost scale.
    pub const UNREACHABLE: u32 = 1_000_000_000;

    /// Build a field from explicit row-major costs.
    ///
    /// Mostly useful to consumers that synthesize gradients directly,
    /// e.g. in tick-resolver tests. Returns [`GridError::EmptyGrid`] for
    /// zero dimensions and [`GridError::ShapeMismatch`] when the cost
    /// vector's length is not `cols * rows`.
    pub fn from_costs(cols: u32, rows: u32, costs: Vec<u32>) -> Result<Self, GridError> {
        if cols == 0 || rows == 0 {
            return Err(GridError::EmptyGrid);
        }
        if costs.len() != cols as usize * rows as usize {
            return Err(GridError::ShapeMismatch {
                expected: (cols, rows),
                found_cells: costs.len(),
            });
        }
        Ok(Self {
            cols,
            rows,
            dist: costs,
        })
    }

    /// An all-unreachable field shaped like the given map.
    pub fn unreachable_over(walls: &ObstacleMap) -> Self {
        Self {
            cols: walls.cols(),
            rows: walls.rows(),
            dist: vec![Self::UNREACHABLE; walls.cell_count()],
        }
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Cost at `(x, y)`. Out-of-bounds reads as unreachable.
    pub fn get(&self, x: i32, y: i32) -> u32 {
        if x < 0 || (x as u32) >= self.cols || y < 0 || (y as u32) >= self.rows {
            return Self::UNREACHABLE;
        }
        self.dist[y as usize * self.cols as usize + x as usize]
    }

    /// Whether `(x, y)` has a finite cost.
    pub fn is_reachable(&self, x: i32, y: i32) -> bool {
        self.get(x, y) != Self::UNREACHABLE
    }

    /// Overwrite the cost of an in-bounds cell.
    pub(crate) fn set(&mut self, x: i32, y: i32, cost: u32) {
        let i = y as usize * self.cols as usize + x as usize;
        self.dist[i] = cost;
    }

    /// Pin every wall cell back to the sentinel.
    ///
    /// Walls are never enqueued by the builders, but the invariant is
    /// restated explicitly for callers that read raw values.
    pub(crate) fn pin_walls(&mut self, walls: &ObstacleMap) {
        for y in 0..self.rows as i32 {
            for x in 0..self.cols as i32 {
                if walls.is_wall(x, y) {
                    self.set(x, y, Self::UNREACHABLE);
                }
            }
        }
    }
}
