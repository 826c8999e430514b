//! Per-tick telemetry.

use surge_core::{TeamId, TickId};

/// Timing and conservation data for a single tick.
///
/// All durations are in microseconds. The controller populates one of
/// these per [`tick()`](crate::MatchController::tick); consumers
/// (profiling, pacing decisions, invariant monitors) read the most
/// recent value.
#[derive(Clone, Debug)]
pub struct TickMetrics {
    /// The tick this data describes.
    pub tick: TickId,
    /// Wall-clock time for the entire tick.
    pub total_us: u64,
    /// Per-team distance field build times.
    pub field_us: Vec<(TeamId, u64)>,
    /// Time spent in the resolver.
    pub resolve_us: u64,
    /// Time spent publishing the snapshot.
    pub publish_us: u64,
    /// Particles on the grid after the tick; conserved, so a change
    /// between ticks indicates a resolver bug.
    pub particle_count: usize,
    /// Total energy after the tick; conserved likewise.
    pub total_energy: u64,
}
