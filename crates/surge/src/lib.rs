//! Surge: a team-based liquid combat simulation engine.
//!
//! Masses of particles flow toward their team's target cell over a
//! walled grid, fight adjacent enemies, and pass energy to teammates.
//! Every tick rebuilds a distance field per team and resolves all
//! particles simultaneously with deterministic tie-breaks, so a match
//! replays identically from the same inputs.
//!
//! This facade crate re-exports the public API of the sub-crates; for
//! most users a single `surge` dependency is enough.
//!
//! # Quick start
//!
//! ```
//! use surge::prelude::*;
//! use std::sync::Arc;
//!
//! // An 8x6 arena with border walls and one particle per team.
//! let walls = Arc::new(ObstacleMap::open(8, 6).unwrap().with_border());
//! let mut world = GridState::empty(Arc::clone(&walls));
//! world.place(Cell::new(2, 2), Particle::new(TeamId(0), 5)).unwrap();
//! world.place(Cell::new(5, 3), Particle::new(TeamId(1), 5)).unwrap();
//!
//! let controller = MatchController::two_team(world, Box::new(ManhattanBuilder)).unwrap();
//! controller.set_target(TeamId(0), 6, 3).unwrap();
//!
//! let metrics = controller.tick().unwrap();
//! assert_eq!(metrics.particle_count, 2);
//! assert_eq!(metrics.total_energy, 10);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `surge-core` | IDs, coordinates, particles, error types |
//! | [`grid`] | `surge-grid` | Obstacle map and grid state |
//! | [`field`] | `surge-field` | Distance field storage and builders |
//! | [`engine`] | `surge-engine` | Tick resolver, controller, realtime runner, opponent policy |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and errors (`surge-core`).
pub use surge_core as types;

/// Obstacle map and grid state (`surge-grid`).
pub use surge_grid as grid;

/// Distance field storage and builders (`surge-field`).
pub use surge_field as field;

/// Tick resolution and match orchestration (`surge-engine`).
pub use surge_engine as engine;

/// The most commonly used types, re-exported flat.
pub mod prelude {
    pub use surge_core::{
        Cell, ControlError, GridError, Particle, StepError, TeamId, TickId,
    };
    pub use surge_engine::{
        Command, MatchController, OpponentPolicy, RealtimeMatch, TickMetrics,
    };
    pub use surge_field::{DistanceField, FieldBuilder, ManhattanBuilder, MeshBuilder};
    pub use surge_grid::{GridState, ObstacleMap};
}
