//! Core types for the Surge liquid-combat simulation.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! fundamental vocabulary shared by the rest of the workspace: team and
//! tick identifiers, grid coordinates, the particle value type, and the
//! error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod error;
pub mod id;
pub mod particle;

pub use cell::{Cell, ORTHO_STEPS};
pub use error::{ControlError, GridError, StepError};
pub use id::{TeamId, TickId};
pub use particle::Particle;
