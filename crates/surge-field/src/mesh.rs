//! Weighted distance fields over the 8-connected grid.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use surge_core::Cell;
use surge_grid::ObstacleMap;

use crate::builder::FieldBuilder;
use crate::field::DistanceField;

/// Cost of an orthogonal step.
const COST_ORTHO: u32 = 10;
/// Cost of a diagonal step: integer approximation of `10·√2`.
const COST_DIAG: u32 = 14;

/// 8-neighbourhood steps with edge costs, cardinals first.
const MESH_STEPS: [(i32, i32, u32); 8] = [
    (1, 0, COST_ORTHO),
    (-1, 0, COST_ORTHO),
    (0, 1, COST_ORTHO),
    (0, -1, COST_ORTHO),
    (1, 1, COST_DIAG),
    (1, -1, COST_DIAG),
    (-1, 1, COST_DIAG),
    (-1, -1, COST_DIAG),
];

/// Multi-source Dijkstra distance field builder.
///
/// All arithmetic stays in integers: orthogonal steps cost 10 and
/// diagonal steps 14. The priority queue uses lazy deletion: a popped
/// entry whose cost exceeds the cell's recorded cost is stale and is
/// discarded, so no decrease-key is needed.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeshBuilder;

impl FieldBuilder for MeshBuilder {
    fn name(&self) -> &str {
        "mesh"
    }

    fn build(&self, walls: &ObstacleMap, targets: &[Cell]) -> DistanceField {
        let mut field = DistanceField::unreachable_over(walls);
        // Min-heap keyed on (cost, x, y); the coordinate components only
        // break ties deterministically.
        let mut heap: BinaryHeap<Reverse<(u32, i32, i32)>> = BinaryHeap::new();

        for &t in targets {
            if !walls.is_wall(t.x, t.y) && field.get(t.x, t.y) != 0 {
                field.set(t.x, t.y, 0);
                heap.push(Reverse((0, t.x, t.y)));
            }
        }

        while let Some(Reverse((cost, x, y))) = heap.pop() {
            if cost > field.get(x, y) {
                continue; // stale entry
            }
            for (dx, dy, edge) in MESH_STEPS {
                let n = Cell::new(x + dx, y + dy);
                if walls.is_wall(n.x, n.y) {
                    continue;
                }
                let next = cost + edge;
                if next < field.get(n.x, n.y) {
                    field.set(n.x, n.y, next);
                    heap.push(Reverse((next, n.x, n.y)));
                }
            }
        }

        field.pin_walls(walls);
        field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use surge_test_utils::walls_from_ascii;

    const INF: u32 = DistanceField::UNREACHABLE;

    #[test]
    fn orthogonal_neighbours_cost_ten_diagonal_fourteen() {
        let walls = ObstacleMap::open(5, 5).unwrap();
        let f = MeshBuilder.build(&walls, &[Cell::new(2, 2)]);
        assert_eq!(f.get(2, 2), 0);
        assert_eq!(f.get(3, 2), 10);
        assert_eq!(f.get(1, 2), 10);
        assert_eq!(f.get(2, 3), 10);
        assert_eq!(f.get(2, 1), 10);
        assert_eq!(f.get(3, 3), 14);
        assert_eq!(f.get(1, 1), 14);
        assert_eq!(f.get(3, 1), 14);
        assert_eq!(f.get(1, 3), 14);
    }

    #[test]
    fn straight_and_diagonal_runs_accumulate() {
        let walls = ObstacleMap::open(5, 5).unwrap();
        let f = MeshBuilder.build(&walls, &[Cell::new(0, 0)]);
        // Straight run: three orthogonal steps.
        assert_eq!(f.get(3, 0), 30);
        // Pure diagonal run.
        assert_eq!(f.get(2, 2), 28);
        // Knight-ish offset: one diagonal plus one orthogonal beats three
        // orthogonal steps.
        assert_eq!(f.get(2, 1), 24);
    }

    #[test]
    fn detour_costs_route_around_walls() {
        let walls = walls_from_ascii(
            ".#.
             .#.
             ...",
        );
        let f = MeshBuilder.build(&walls, &[Cell::new(2, 0)]);
        assert_eq!(f.get(1, 0), INF);
        assert_eq!(f.get(1, 1), INF);
        // Left column must descend, slip under the wall, and climb back:
        // (0,0) → (0,1) → (1,2) → (2,1) → (2,0) = 10 + 14 + 14 + 10.
        assert_eq!(f.get(0, 0), 48);
        assert_eq!(f.get(0, 1), 38);
        assert_eq!(f.get(1, 2), 24);
    }

    #[test]
    fn multi_source_takes_cheaper_seed() {
        let walls = ObstacleMap::open(7, 1).unwrap();
        let f = MeshBuilder.build(&walls, &[Cell::new(0, 0), Cell::new(6, 0)]);
        assert_eq!(f.get(2, 0), 20);
        assert_eq!(f.get(4, 0), 20);
        assert_eq!(f.get(3, 0), 30);
    }

    #[test]
    fn walled_pocket_stays_unreachable() {
        let walls = walls_from_ascii(
            ".....
             .###.
             .#.#.
             .###.
             .....",
        );
        let f = MeshBuilder.build(&walls, &[Cell::new(0, 0)]);
        assert_eq!(f.get(2, 2), INF);
        assert_eq!(f.get(1, 1), INF);
        assert!(f.is_reachable(4, 4));
    }

    #[test]
    fn compliance_open_grid() {
        let walls = ObstacleMap::open(8, 8).unwrap();
        compliance::run_field_compliance(&MeshBuilder, &walls, &[Cell::new(5, 2)]);
    }

    #[test]
    fn compliance_bordered_arena() {
        let walls = walls_from_ascii(
            "########
             #......#
             #..##..#
             #......#
             ########",
        );
        compliance::run_field_compliance(&MeshBuilder, &walls, &[Cell::new(1, 1), Cell::new(6, 3)]);
    }
}
