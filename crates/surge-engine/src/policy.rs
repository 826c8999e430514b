//! The computer opponent's target policy.
//!
//! Deliberately simple: mirror the observed player's target across the
//! map's vertical axis, and every `retarget_interval` ticks pick a
//! random open cell instead to keep the mass from stalemating. Not part
//! of the resolver core: the policy talks to the controller through the
//! same target interface as mouse input.

use std::collections::VecDeque;
use std::sync::Arc;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use surge_core::{Cell, ControlError, TeamId, ORTHO_STEPS};
use surge_grid::ObstacleMap;

use crate::controller::MatchController;

/// Mirroring opponent with periodic random retargeting.
///
/// The RNG is seeded at construction and the retarget interval counts
/// policy updates rather than wall-clock time, so a fixed seed replays
/// the same decisions in tests.
pub struct OpponentPolicy {
    walls: Arc<ObstacleMap>,
    retarget_interval: u64,
    updates_since_retarget: u64,
    rng: ChaCha8Rng,
}

impl OpponentPolicy {
    /// Default updates between random retargets.
    ///
    /// At the original game's 10 updates per second this matches its
    /// five-second randomization cadence.
    pub const DEFAULT_RETARGET_INTERVAL: u64 = 50;

    /// Create a policy over the given map.
    ///
    /// A `retarget_interval` of 0 disables random retargeting entirely.
    pub fn new(walls: Arc<ObstacleMap>, retarget_interval: u64, seed: u64) -> Self {
        Self {
            walls,
            retarget_interval,
            updates_since_retarget: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Compute the opponent's next target given the player's current one.
    ///
    /// Mirrors horizontally (`x -> cols-1-x`, same row); when the
    /// mirrored cell is a wall, falls back to the nearest open cell by
    /// breadth-first ring search. When the interval elapses, returns a
    /// uniformly random open cell instead and restarts the count.
    pub fn next_target(&mut self, player_target: Cell) -> Cell {
        self.updates_since_retarget += 1;
        if self.retarget_interval > 0 && self.updates_since_retarget >= self.retarget_interval {
            if let Some(cell) = self.random_open_cell() {
                self.updates_since_retarget = 0;
                return cell;
            }
            // A map with no open cell at all: mirroring below is just as
            // hopeless, but keeps the return value well-defined.
        }

        let mirror = Cell::new(
            self.walls.cols() as i32 - 1 - player_target.x,
            player_target.y.clamp(0, self.walls.rows() as i32 - 1),
        );
        if !self.walls.is_wall(mirror.x, mirror.y) {
            return mirror;
        }
        self.nearest_open(mirror).unwrap_or(mirror)
    }

    /// Read the observed team's target, compute the next one, and set it
    /// for the controlled team.
    pub fn drive(
        &mut self,
        controller: &MatchController,
        observed: TeamId,
        controlled: TeamId,
    ) -> Result<(), ControlError> {
        let player = controller.target(observed)?;
        let next = self.next_target(player);
        controller.set_target(controlled, next.x, next.y)
    }

    fn random_open_cell(&mut self) -> Option<Cell> {
        let mut open = Vec::new();
        for y in 0..self.walls.rows() as i32 {
            for x in 0..self.walls.cols() as i32 {
                if !self.walls.is_wall(x, y) {
                    open.push(Cell::new(x, y));
                }
            }
        }
        if open.is_empty() {
            return None;
        }
        let pick = self.rng.random_range(0..open.len());
        Some(open[pick])
    }

    /// Nearest open cell to `from` in breadth-first ring order; the
    /// search expands through walls, only the destination must be open.
    fn nearest_open(&self, from: Cell) -> Option<Cell> {
        if !self.walls.in_bounds(from.x, from.y) {
            return None;
        }
        let (w, h) = (self.walls.cols() as usize, self.walls.rows() as usize);
        let mut seen = vec![false; w * h];
        let mut queue = VecDeque::new();
        seen[from.y as usize * w + from.x as usize] = true;
        queue.push_back(from);

        while let Some(cur) = queue.pop_front() {
            if !self.walls.is_wall(cur.x, cur.y) {
                return Some(cur);
            }
            for (dx, dy) in ORTHO_STEPS {
                let n = cur.offset(dx, dy);
                if !self.walls.in_bounds(n.x, n.y) {
                    continue;
                }
                let i = n.y as usize * w + n.x as usize;
                if !seen[i] {
                    seen[i] = true;
                    queue.push_back(n);
                }
            }
        }
        None
    }
}
