//! Grid state for the Surge liquid-combat simulation.
//!
//! Two layers make up a match's spatial state:
//!
//! - [`ObstacleMap`] — the wall layout, fixed for the lifetime of a
//!   match and shared between ticks via `Arc`.
//! - [`GridState`] — the per-tick occupancy layer over a shared obstacle
//!   map. The tick resolver never mutates the state it reads; it clones
//!   the occupancy layer and publishes a fresh state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod obstacles;
pub mod state;

pub use obstacles::ObstacleMap;
pub use state::GridState;
