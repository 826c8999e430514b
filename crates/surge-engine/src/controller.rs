//! The match controller: state ownership and tick orchestration.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use indexmap::IndexMap;
use surge_core::{Cell, ControlError, StepError, TeamId, TickId};
use surge_field::FieldBuilder;
use surge_grid::{GridState, ObstacleMap};

use crate::metrics::TickMetrics;
use crate::resolver;
use crate::target::TargetSlot;

/// Owns the authoritative grid state and one target per team.
///
/// Each [`tick()`](MatchController::tick) builds one distance field per
/// team from the targets visible at tick start, resolves every particle
/// simultaneously, and publishes the successor state by swapping a
/// single `Arc`, so readers always see a fully-formed snapshot, never a
/// half-applied one. Targets may be written from other threads at any
/// time; a write racing a tick is simply observed one tick later.
///
/// The tick computation itself is single-threaded: callers must not
/// invoke `tick()` from two threads at once (the realtime runner drives
/// it from exactly one).
pub struct MatchController {
    obstacles: Arc<ObstacleMap>,
    builder: Box<dyn FieldBuilder>,
    teams: Vec<TeamId>,
    targets: Vec<TargetSlot>,
    world: RwLock<Arc<GridState>>,
    tick: AtomicU64,
}

impl MatchController {
    /// Create a controller for an arbitrary set of teams.
    ///
    /// `teams` pairs each team with its initial target; targets are
    /// clamped to the grid. Fails loudly on an empty or duplicated team
    /// list, or when the initial world contains a particle of a team
    /// that is not configured; every such particle would make the first
    /// tick unresolvable.
    pub fn new(
        initial: GridState,
        teams: &[(TeamId, Cell)],
        builder: Box<dyn FieldBuilder>,
    ) -> Result<Self, ControlError> {
        if teams.is_empty() {
            return Err(ControlError::NoTeams);
        }
        for (i, (team, _)) in teams.iter().enumerate() {
            if teams[..i].iter().any(|(t, _)| t == team) {
                return Err(ControlError::DuplicateTeam { team: *team });
            }
        }
        for (_, particle) in initial.particles() {
            if !teams.iter().any(|(t, _)| *t == particle.team) {
                return Err(ControlError::UnknownTeam {
                    team: particle.team,
                });
            }
        }

        let obstacles = Arc::clone(initial.obstacles());
        let targets = teams
            .iter()
            .map(|(_, cell)| TargetSlot::new(clamp_to(&obstacles, *cell)))
            .collect();
        Ok(Self {
            obstacles,
            builder,
            teams: teams.iter().map(|(t, _)| *t).collect(),
            targets,
            world: RwLock::new(Arc::new(initial)),
            tick: AtomicU64::new(0),
        })
    }

    /// A two-team match with the classic default targets: each team aims
    /// at its own side's quarter-point, mid-height.
    pub fn two_team(
        initial: GridState,
        builder: Box<dyn FieldBuilder>,
    ) -> Result<Self, ControlError> {
        let (w, h) = (initial.cols() as i32, initial.rows() as i32);
        Self::new(
            initial,
            &[
                (TeamId(0), Cell::new(w / 4, h / 2)),
                (TeamId(1), Cell::new(3 * w / 4, h / 2)),
            ],
            builder,
        )
    }

    /// A four-team match with targets spread over the map's quadrants.
    pub fn four_team(
        initial: GridState,
        builder: Box<dyn FieldBuilder>,
    ) -> Result<Self, ControlError> {
        let (w, h) = (initial.cols() as i32, initial.rows() as i32);
        Self::new(
            initial,
            &[
                (TeamId(0), Cell::new(w / 4, h / 4)),
                (TeamId(1), Cell::new(3 * w / 4, h / 4)),
                (TeamId(2), Cell::new(w / 4, 3 * h / 4)),
                (TeamId(3), Cell::new(3 * w / 4, 3 * h / 4)),
            ],
            builder,
        )
    }

    /// The configured teams, in configuration order.
    pub fn teams(&self) -> &[TeamId] {
        &self.teams
    }

    /// The shared wall layer.
    pub fn obstacles(&self) -> &Arc<ObstacleMap> {
        &self.obstacles
    }

    /// The most recently published state.
    pub fn snapshot(&self) -> Arc<GridState> {
        let guard = self.world.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Ticks executed so far.
    pub fn tick_id(&self) -> TickId {
        TickId(self.tick.load(Ordering::Acquire))
    }

    /// A team's current target.
    pub fn target(&self, team: TeamId) -> Result<Cell, ControlError> {
        Ok(self.targets[self.team_index(team)?].load())
    }

    /// Request a new target for a team.
    ///
    /// The coordinates are clamped to the grid; a request landing on a
    /// wall is silently ignored, leaving the previous target in place.
    /// Only an unconfigured team is an error.
    pub fn set_target(&self, team: TeamId, x: i32, y: i32) -> Result<(), ControlError> {
        let slot = &self.targets[self.team_index(team)?];
        let cell = clamp_to(&self.obstacles, Cell::new(x, y));
        if self.obstacles.is_wall(cell.x, cell.y) {
            return Ok(());
        }
        slot.store(cell);
        Ok(())
    }

    /// Advance the match by one tick.
    ///
    /// Builds one distance field per configured team from that team's
    /// current target, resolves all particles, and publishes the result.
    pub fn tick(&self) -> Result<TickMetrics, StepError> {
        let tick_start = Instant::now();
        let current = self.snapshot();

        let mut fields = IndexMap::with_capacity(self.teams.len());
        let mut field_us = Vec::with_capacity(self.teams.len());
        for (team, slot) in self.teams.iter().zip(&self.targets) {
            let build_start = Instant::now();
            let field = self.builder.build(&self.obstacles, &[slot.load()]);
            field_us.push((*team, build_start.elapsed().as_micros() as u64));
            fields.insert(*team, field);
        }

        let resolve_start = Instant::now();
        let next = resolver::step(&current, &fields)?;
        let resolve_us = resolve_start.elapsed().as_micros() as u64;

        let particle_count = next.particle_count();
        let total_energy = next.total_energy();

        let publish_start = Instant::now();
        let next = Arc::new(next);
        *self
            .world
            .write()
            .unwrap_or_else(PoisonError::into_inner) = next;
        let publish_us = publish_start.elapsed().as_micros() as u64;

        let tick = TickId(self.tick.fetch_add(1, Ordering::AcqRel) + 1);
        Ok(TickMetrics {
            tick,
            total_us: tick_start.elapsed().as_micros() as u64,
            field_us,
            resolve_us,
            publish_us,
            particle_count,
            total_energy,
        })
    }

    fn team_index(&self, team: TeamId) -> Result<usize, ControlError> {
        self.teams
            .iter()
            .position(|t| *t == team)
            .ok_or(ControlError::UnknownTeam { team })
    }
}

fn clamp_to(obstacles: &ObstacleMap, cell: Cell) -> Cell {
    Cell::new(
        cell.x.clamp(0, obstacles.cols() as i32 - 1),
        cell.y.clamp(0, obstacles.rows() as i32 - 1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use surge_core::Particle;
    use surge_field::{ManhattanBuilder, MeshBuilder};
    use surge_test_utils::world_from_ascii;

    fn arena() -> GridState {
        world_from_ascii(
            "########
             #0....1#
             #......#
             ########",
        )
    }

    #[test]
    fn rejects_empty_and_duplicate_team_lists() {
        let result = MatchController::new(arena(), &[], Box::new(ManhattanBuilder));
        assert!(matches!(result, Err(ControlError::NoTeams)));

        let result = MatchController::new(
            arena(),
            &[
                (TeamId(0), Cell::new(1, 1)),
                (TeamId(1), Cell::new(2, 1)),
                (TeamId(0), Cell::new(3, 1)),
            ],
            Box::new(ManhattanBuilder),
        );
        assert!(matches!(
            result,
            Err(ControlError::DuplicateTeam { team: TeamId(0) })
        ));
    }

    #[test]
    fn rejects_unconfigured_particles() {
        let result = MatchController::new(
            arena(),
            &[(TeamId(0), Cell::new(1, 1))],
            Box::new(ManhattanBuilder),
        );
        assert!(matches!(
            result,
            Err(ControlError::UnknownTeam { team: TeamId(1) })
        ));
    }

    #[test]
    fn set_target_clamps_to_bounds() {
        let ctl = MatchController::two_team(arena(), Box::new(ManhattanBuilder)).unwrap();
        // Way out of range; clamps to the far corner, which is a border
        // wall, so the previous target survives.
        let before = ctl.target(TeamId(0)).unwrap();
        ctl.set_target(TeamId(0), 100, 100).unwrap();
        assert_eq!(ctl.target(TeamId(0)).unwrap(), before);
        // In range and open: accepted.
        ctl.set_target(TeamId(0), 6, 2).unwrap();
        assert_eq!(ctl.target(TeamId(0)).unwrap(), Cell::new(6, 2));
    }

    #[test]
    fn set_target_on_wall_keeps_previous() {
        let ctl = MatchController::two_team(arena(), Box::new(ManhattanBuilder)).unwrap();
        ctl.set_target(TeamId(1), 3, 1).unwrap();
        ctl.set_target(TeamId(1), 0, 0).unwrap();
        assert_eq!(ctl.target(TeamId(1)).unwrap(), Cell::new(3, 1));
    }

    #[test]
    fn unknown_team_target_access_is_an_error() {
        let ctl = MatchController::two_team(arena(), Box::new(ManhattanBuilder)).unwrap();
        assert!(matches!(
            ctl.target(TeamId(9)),
            Err(ControlError::UnknownTeam { team: TeamId(9) })
        ));
        assert!(ctl.set_target(TeamId(9), 1, 1).is_err());
    }

    #[test]
    fn tick_publishes_a_fresh_snapshot() {
        let ctl = MatchController::two_team(arena(), Box::new(ManhattanBuilder)).unwrap();
        let before = ctl.snapshot();
        ctl.set_target(TeamId(0), 6, 1).unwrap();

        let metrics = ctl.tick().unwrap();

        let after = ctl.snapshot();
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(metrics.tick, TickId(1));
        assert_eq!(ctl.tick_id(), TickId(1));
        // Team 0's particle moved toward its target.
        assert_eq!(after.occupant(1, 1), None);
        assert_eq!(
            after.occupant(2, 1),
            Some(Particle::new(TeamId(0), surge_test_utils::DEFAULT_ENERGY))
        );
        // The old snapshot is untouched.
        assert!(before.occupant(1, 1).is_some());
        // Conservation shows up in the metrics.
        assert_eq!(metrics.particle_count, 2);
        assert_eq!(
            metrics.total_energy,
            2 * surge_test_utils::DEFAULT_ENERGY as u64
        );
        assert_eq!(metrics.field_us.len(), 2);
    }

    #[test]
    fn mesh_builder_is_interchangeable() {
        let ctl = MatchController::two_team(arena(), Box::new(MeshBuilder)).unwrap();
        ctl.set_target(TeamId(0), 6, 1).unwrap();
        ctl.tick().unwrap();
        let after = ctl.snapshot();
        assert_eq!(after.particle_count(), 2);
        // The weighted gradient pulls the particle the same way here.
        assert_eq!(after.occupant(1, 1), None);
    }

    #[test]
    fn four_team_defaults_cover_the_quadrants() {
        let world = world_from_ascii(
            "############
             #0........1#
             #..........#
             #..........#
             #2........3#
             ############",
        );
        let ctl = MatchController::four_team(world, Box::new(ManhattanBuilder)).unwrap();
        assert_eq!(ctl.teams().len(), 4);
        assert_eq!(ctl.target(TeamId(0)).unwrap(), Cell::new(3, 1));
        assert_eq!(ctl.target(TeamId(3)).unwrap(), Cell::new(9, 4));
        ctl.tick().unwrap();
        assert_eq!(ctl.snapshot().particle_count(), 4);
    }
}
