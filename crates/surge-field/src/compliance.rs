//! Reusable compliance assertions for [`FieldBuilder`] implementations.
//!
//! Any builder, regardless of connectivity or cost model, must satisfy
//! these; both shipped builders run the suite from their test modules,
//! and downstream builders are encouraged to do the same.

use surge_core::Cell;
use surge_grid::ObstacleMap;

use crate::builder::FieldBuilder;
use crate::field::DistanceField;

/// All 8 surrounding offsets, used for the downhill-neighbour check.
const SURROUNDING: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Run the full compliance suite against one builder and scenario.
///
/// Asserts, for `builder.build(walls, targets)`:
///
/// 1. the field's dimensions match the map's;
/// 2. every wall cell reads [`DistanceField::UNREACHABLE`];
/// 3. a cell costs 0 exactly when it is a usable (in-bounds, off-wall)
///    target;
/// 4. every finite, non-zero cell has some open surrounding cell with a
///    strictly smaller cost, so a mass there always has somewhere to flow;
/// 5. finite costs stay below the sentinel by a wide margin;
/// 6. building twice yields identical fields.
///
/// # Panics
///
/// Panics (via `assert!`) on the first violated property.
pub fn run_field_compliance(builder: &dyn FieldBuilder, walls: &ObstacleMap, targets: &[Cell]) {
    let field = builder.build(walls, targets);

    assert_eq!(field.cols(), walls.cols(), "field width must match map");
    assert_eq!(field.rows(), walls.rows(), "field height must match map");

    let usable_target =
        |x: i32, y: i32| targets.iter().any(|t| t.x == x && t.y == y) && !walls.is_wall(x, y);

    // Finite costs are bounded by the worst tour of the whole grid at
    // the largest edge cost any shipped builder uses.
    let cost_bound = walls.cell_count() as u32 * 14;

    for y in 0..walls.rows() as i32 {
        for x in 0..walls.cols() as i32 {
            let cost = field.get(x, y);

            if walls.is_wall(x, y) {
                assert_eq!(
                    cost,
                    DistanceField::UNREACHABLE,
                    "wall at ({x}, {y}) must be unreachable"
                );
                continue;
            }

            if usable_target(x, y) {
                assert_eq!(cost, 0, "target at ({x}, {y}) must cost 0");
            } else if cost == 0 {
                panic!("non-target cell ({x}, {y}) has cost 0");
            }

            if cost == DistanceField::UNREACHABLE || cost == 0 {
                continue;
            }

            assert!(
                cost <= cost_bound,
                "cost {cost} at ({x}, {y}) exceeds the grid bound {cost_bound}"
            );

            let has_downhill = SURROUNDING.iter().any(|&(dx, dy)| {
                !walls.is_wall(x + dx, y + dy) && field.get(x + dx, y + dy) < cost
            });
            assert!(
                has_downhill,
                "finite cell ({x}, {y}) at cost {cost} has no cheaper open neighbour"
            );
        }
    }

    let again = builder.build(walls, targets);
    assert_eq!(field, again, "builder '{}' must be deterministic", builder.name());
}
