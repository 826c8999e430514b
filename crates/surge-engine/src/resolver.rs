//! The per-tick resolver: decide every particle's action against the
//! pre-tick state, then fold the plan into a fresh copy.
//!
//! The two phases are what make simultaneous resolution correct: no
//! particle's decision can observe another particle's action from the
//! same tick, and conflicting claims on a destination are settled during
//! apply, not by decision order. Every transition conserves particle
//! count and total energy; each applied action either redistributes or
//! does nothing.

use indexmap::IndexMap;
use surge_core::{Cell, Particle, StepError, TeamId};
use surge_field::DistanceField;
use surge_grid::GridState;

/// A particle's planned action for one tick.
///
/// The cell carried by each variant is the action's destination; the
/// acting particle is identified by its origin cell in the plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    /// Step into an empty cell.
    Move(Cell),
    /// Steal one energy from an adjacent enemy, converting it at zero.
    Attack(Cell),
    /// Push one energy to an adjacent teammate closer to the target.
    Transfer(Cell),
    /// No viable interaction this tick.
    Stay,
}

/// Advance the world by one tick.
///
/// `fields` must contain a distance field for every team with at least
/// one particle on the grid; a missing or misshapen field is a
/// configuration bug reported as [`StepError`]. The input state is never
/// mutated; the result is a freshly built successor.
pub fn step(
    current: &GridState,
    fields: &IndexMap<TeamId, DistanceField>,
) -> Result<GridState, StepError> {
    let mut plan: Vec<(Cell, Action)> = Vec::new();

    for (cell, particle) in current.particles() {
        let field = fields
            .get(&particle.team)
            .ok_or(StepError::MissingField {
                team: particle.team,
            })?;
        if field.cols() != current.cols() || field.rows() != current.rows() {
            return Err(StepError::FieldShapeMismatch {
                team: particle.team,
                expected: (current.cols(), current.rows()),
                found: (field.cols(), field.rows()),
            });
        }
        let action = decide(current, field, cell, particle.team);
        if action != Action::Stay {
            plan.push((cell, action));
        }
    }

    let mut next = current.clone();
    for (origin, action) in plan {
        apply(&mut next, origin, action);
    }

    debug_assert_eq!(current.particle_count(), next.particle_count());
    debug_assert_eq!(current.total_energy(), next.total_energy());
    Ok(next)
}

/// Choose one particle's action by reading only the pre-tick state.
///
/// Neighbours are scanned in canonical order through a strict priority
/// ladder; the first category with a hit wins:
///
/// 1. empty neighbour at the minimum neighbour cost ("main free")
/// 2. empty neighbour strictly cheaper than here ("good free")
/// 3. empty neighbour at the same cost as here ("acceptable free")
/// 4. enemy at the minimum neighbour cost ("main enemy")
/// 5. enemy strictly cheaper than here ("good enemy")
/// 6. teammate at the minimum cost, only when that cost beats staying
///    ("main friend")
fn decide(world: &GridState, field: &DistanceField, at: Cell, team: TeamId) -> Action {
    let g0 = field.get(at.x, at.y);

    let neighbours = world.obstacles().open_neighbours4(at);
    if neighbours.is_empty() {
        return Action::Stay; // fully enclosed
    }
    let mut min_g = u32::MAX;
    for n in &neighbours {
        min_g = min_g.min(field.get(n.x, n.y));
    }

    let free = |c: Cell| world.occupant(c.x, c.y).is_none();
    let enemy = |c: Cell| world.occupant(c.x, c.y).is_some_and(|p| p.team != team);
    let friend = |c: Cell| world.occupant(c.x, c.y).is_some_and(|p| p.team == team);

    let scan = |wanted: &dyn Fn(u32, Cell) -> bool| -> Option<Cell> {
        neighbours
            .iter()
            .copied()
            .find(|&n| wanted(field.get(n.x, n.y), n))
    };

    if let Some(c) = scan(&|g, c| g == min_g && free(c)) {
        return Action::Move(c);
    }
    if let Some(c) = scan(&|g, c| g < g0 && free(c)) {
        return Action::Move(c);
    }
    if let Some(c) = scan(&|g, c| g == g0 && free(c)) {
        return Action::Move(c);
    }
    if let Some(c) = scan(&|g, c| g == min_g && enemy(c)) {
        return Action::Attack(c);
    }
    if let Some(c) = scan(&|g, c| g < g0 && enemy(c)) {
        return Action::Attack(c);
    }
    if min_g < g0 {
        if let Some(c) = scan(&|g, c| g == min_g && friend(c)) {
            return Action::Transfer(c);
        }
    }
    Action::Stay
}

/// Fold one planned action into the next state.
///
/// Every re-check here runs against the state being built: an actor that
/// already vacated its origin, a destination claimed by an earlier move,
/// or a victim that left or switched sides all degrade to a silent no-op.
fn apply(next: &mut GridState, origin: Cell, action: Action) {
    let Some(actor) = next.occupant(origin.x, origin.y) else {
        return; // origin vacated by an earlier action
    };

    match action {
        Action::Move(to) => {
            if next.in_bounds(to.x, to.y)
                && !next.is_wall(to.x, to.y)
                && next.occupant(to.x, to.y).is_none()
            {
                next.set(to.x, to.y, Some(actor));
                next.set(origin.x, origin.y, None);
            }
            // Otherwise a rival claimed the cell first; stay put this tick.
        }
        Action::Attack(at) => {
            let Some(mut victim) = next.occupant(at.x, at.y) else {
                return;
            };
            if victim.team == actor.team {
                return;
            }
            let mut attacker = actor;
            if victim.energy > Particle::ENERGY_MIN {
                victim = victim.with_energy(victim.energy - Particle::ENERGY_DELTA);
                // The attacker's gain is deliberately uncapped; only
                // friendly transfers respect ENERGY_MAX.
                attacker = attacker.with_energy(attacker.energy + Particle::ENERGY_DELTA);
                next.set(origin.x, origin.y, Some(attacker));
            }
            if victim.energy <= Particle::ENERGY_MIN {
                victim = victim.with_team(attacker.team).with_energy(Particle::ENERGY_MIN);
            }
            next.set(at.x, at.y, Some(victim));
        }
        Action::Transfer(to) => {
            let Some(friend) = next.occupant(to.x, to.y) else {
                return;
            };
            if friend.team != actor.team {
                return;
            }
            if actor.energy > Particle::ENERGY_MIN && friend.energy < Particle::ENERGY_MAX {
                next.set(
                    origin.x,
                    origin.y,
                    Some(actor.with_energy(actor.energy - Particle::ENERGY_DELTA)),
                );
                next.set(
                    to.x,
                    to.y,
                    Some(friend.with_energy(friend.energy + Particle::ENERGY_DELTA)),
                );
            }
        }
        Action::Stay => {}
    }
}
