//! The [`FieldBuilder`] trait.

use surge_core::Cell;
use surge_grid::ObstacleMap;

use crate::field::DistanceField;

/// Builds a per-team distance field from an obstacle map and target cells.
///
/// # Contract
///
/// - `build()` MUST be deterministic: same inputs produce an identical
///   field.
/// - Target cells that are out of bounds or on a wall contribute nothing;
///   they are not errors.
/// - Wall cells end at [`DistanceField::UNREACHABLE`] regardless of
///   connectivity.
/// - Every finite, non-target cell has at least one open neighbour with a
///   strictly smaller cost (so masses always have somewhere to flow).
///
/// The trait is object-safe; the match controller stores its builder as
/// `Box<dyn FieldBuilder>` and swapping builders never touches the tick
/// resolver, which consumes only the resulting [`DistanceField`].
pub trait FieldBuilder: Send + Sync {
    /// Human-readable name for telemetry and labels.
    fn name(&self) -> &str;

    /// Compute the cost-to-target for every cell.
    fn build(&self, walls: &ObstacleMap, targets: &[Cell]) -> DistanceField;
}
