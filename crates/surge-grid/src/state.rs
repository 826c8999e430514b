//! The per-tick occupancy layer.

use std::sync::Arc;

use surge_core::{Cell, GridError, Particle};

use crate::obstacles::ObstacleMap;

/// The authoritative snapshot of walls and particle occupancy.
///
/// The wall layer is shared (`Arc<ObstacleMap>`) because it never changes
/// during a match; the occupancy layer is owned and cloned per tick. A
/// cell holds at most one of wall, particle, or nothing; construction
/// rejects particles on walls, and the conserved quantities
/// ([`particle_count`](GridState::particle_count) and
/// [`total_energy`](GridState::total_energy)) are what every tick
/// transition must preserve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridState {
    obstacles: Arc<ObstacleMap>,
    occupants: Vec<Option<Particle>>,
}

impl GridState {
    /// Build a state from a flat row-major occupancy layer.
    ///
    /// Returns [`GridError::ShapeMismatch`] when the layer's cell count
    /// differs from the map's, and [`GridError::ParticleOnWall`] when a
    /// particle sits on a blocked cell.
    pub fn new(
        obstacles: Arc<ObstacleMap>,
        occupants: Vec<Option<Particle>>,
    ) -> Result<Self, GridError> {
        if occupants.len() != obstacles.cell_count() {
            return Err(GridError::ShapeMismatch {
                expected: (obstacles.cols(), obstacles.rows()),
                found_cells: occupants.len(),
            });
        }
        let cols = obstacles.cols() as usize;
        for (i, occ) in occupants.iter().enumerate() {
            if occ.is_some() {
                let cell = Cell::new((i % cols) as i32, (i / cols) as i32);
                if obstacles.is_wall(cell.x, cell.y) {
                    return Err(GridError::ParticleOnWall { cell });
                }
            }
        }
        Ok(Self {
            obstacles,
            occupants,
        })
    }

    /// Build an empty state over the given map.
    pub fn empty(obstacles: Arc<ObstacleMap>) -> Self {
        let cells = obstacles.cell_count();
        Self {
            obstacles,
            occupants: vec![None; cells],
        }
    }

    /// Place a particle during match setup.
    ///
    /// Returns [`GridError::ParticleOnWall`] when the cell is blocked or
    /// out of bounds; any previous occupant is replaced.
    pub fn place(&mut self, cell: Cell, particle: Particle) -> Result<(), GridError> {
        if self.obstacles.is_wall(cell.x, cell.y) {
            return Err(GridError::ParticleOnWall { cell });
        }
        let i = self.idx(cell.x, cell.y);
        self.occupants[i] = Some(particle);
        Ok(())
    }

    /// The shared wall layer.
    pub fn obstacles(&self) -> &Arc<ObstacleMap> {
        &self.obstacles
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.obstacles.cols()
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.obstacles.rows()
    }

    /// Whether `(x, y)` lies inside the grid.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.obstacles.in_bounds(x, y)
    }

    /// Whether `(x, y)` is blocked. Out-of-bounds counts as blocked.
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.obstacles.is_wall(x, y)
    }

    /// The occupant of `(x, y)`, if any. Out-of-bounds reads as empty.
    pub fn occupant(&self, x: i32, y: i32) -> Option<Particle> {
        if !self.obstacles.in_bounds(x, y) {
            return None;
        }
        self.occupants[self.idx(x, y)]
    }

    /// Overwrite the occupant of an in-bounds cell.
    ///
    /// The tick resolver uses this while folding planned actions into a
    /// cloned state. Placing `Some` on a wall is a resolver bug, guarded
    /// in debug builds.
    pub fn set(&mut self, x: i32, y: i32, occupant: Option<Particle>) {
        debug_assert!(self.obstacles.in_bounds(x, y));
        debug_assert!(occupant.is_none() || !self.obstacles.is_wall(x, y));
        let i = self.idx(x, y);
        self.occupants[i] = occupant;
    }

    /// Number of particles on the grid. Conserved across ticks.
    pub fn particle_count(&self) -> usize {
        self.occupants.iter().filter(|o| o.is_some()).count()
    }

    /// Sum of all particle energy. Conserved across ticks.
    pub fn total_energy(&self) -> u64 {
        self.occupants
            .iter()
            .flatten()
            .map(|p| p.energy as u64)
            .sum()
    }

    /// Iterate over occupied cells as `(cell, particle)` in row-major order.
    pub fn particles(&self) -> impl Iterator<Item = (Cell, Particle)> + '_ {
        let cols = self.obstacles.cols() as usize;
        self.occupants.iter().enumerate().filter_map(move |(i, o)| {
            o.map(|p| (Cell::new((i % cols) as i32, (i / cols) as i32), p))
        })
    }

    fn idx(&self, x: i32, y: i32) -> usize {
        y as usize * self.obstacles.cols() as usize + x as usize
    }
}
