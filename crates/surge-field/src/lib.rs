//! Distance field builders for the Surge liquid-combat simulation.
//!
//! A distance field records, per cell, the cost of the cheapest path to
//! the nearest of a team's target cells through open terrain. One field
//! exists per team per tick; the tick resolver consumes the field without
//! caring how it was produced.
//!
//! Two builders implement the [`FieldBuilder`] trait:
//!
//! - [`ManhattanBuilder`] — multi-source BFS over the 4-connected grid,
//!   unit step cost. The gradient the original game shipped with.
//! - [`MeshBuilder`] — multi-source Dijkstra over the 8-connected grid,
//!   orthogonal cost 10 and diagonal cost 14, for smoother diagonal-aware
//!   flow.
//!
//! The [`compliance`] module holds assertions every builder must satisfy;
//! both builders' test suites run it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod compliance;
pub mod field;
pub mod manhattan;
pub mod mesh;

pub use builder::FieldBuilder;
pub use field::DistanceField;
pub use manhattan::ManhattanBuilder;
pub use mesh::MeshBuilder;
