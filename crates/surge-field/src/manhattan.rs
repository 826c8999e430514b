//! Uniform-cost distance fields over the 4-connected grid.

use std::collections::VecDeque;

use surge_core::{Cell, ORTHO_STEPS};
use surge_grid::ObstacleMap;

use crate::builder::FieldBuilder;
use crate::field::DistanceField;

/// Multi-source breadth-first distance field builder.
///
/// Each cell's cost is the minimum number of orthogonal steps to the
/// nearest listed target through open terrain. Neighbours relax in
/// canonical scan order; with unit edge costs the FIFO sweep visits each
/// cell a bounded number of times, so a build is O(w·h).
#[derive(Clone, Copy, Debug, Default)]
pub struct ManhattanBuilder;

impl FieldBuilder for ManhattanBuilder {
    fn name(&self) -> &str {
        "manhattan"
    }

    fn build(&self, walls: &ObstacleMap, targets: &[Cell]) -> DistanceField {
        let mut field = DistanceField::unreachable_over(walls);
        let mut queue = VecDeque::new();

        // Seed every usable target at cost 0. Targets out of bounds or on
        // a wall contribute nothing.
        for &t in targets {
            if !walls.is_wall(t.x, t.y) && field.get(t.x, t.y) != 0 {
                field.set(t.x, t.y, 0);
                queue.push_back(t);
            }
        }

        while let Some(cur) = queue.pop_front() {
            let base = field.get(cur.x, cur.y);
            for (dx, dy) in ORTHO_STEPS {
                let n = cur.offset(dx, dy);
                if walls.is_wall(n.x, n.y) {
                    continue;
                }
                let cost = base + 1;
                if cost < field.get(n.x, n.y) {
                    field.set(n.x, n.y, cost);
                    queue.push_back(n);
                }
            }
        }

        field.pin_walls(walls);
        field
    }
}
