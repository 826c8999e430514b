//! The particle value type.

use crate::id::TeamId;

/// A single particle on the grid.
///
/// Particles are plain values with no identity beyond the cell they
/// occupy; "mutating" one means replacing the cell's occupant with a new
/// value via [`with_team`](Particle::with_team) or
/// [`with_energy`](Particle::with_energy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Particle {
    /// Owning team.
    pub team: TeamId,
    /// Stored energy.
    ///
    /// Transfers respect [`ENERGY_MAX`](Particle::ENERGY_MAX); combat
    /// steals are uncapped on the attacker side, so a long-lived
    /// attacker can hold more than the transfer ceiling.
    pub energy: u16,
}

impl Particle {
    /// Floor for energy; a particle at the floor converts when attacked.
    pub const ENERGY_MIN: u16 = 0;
    /// Ceiling enforced by friendly transfers.
    pub const ENERGY_MAX: u16 = 10;
    /// Amount moved by one attack or transfer interaction.
    pub const ENERGY_DELTA: u16 = 1;

    /// Construct a particle.
    pub const fn new(team: TeamId, energy: u16) -> Self {
        Self { team, energy }
    }

    /// Copy with a different owning team.
    pub const fn with_team(self, team: TeamId) -> Self {
        Self {
            team,
            energy: self.energy,
        }
    }

    /// Copy with a different energy value.
    pub const fn with_energy(self, energy: u16) -> Self {
        Self {
            team: self.team,
            energy,
        }
    }
}
