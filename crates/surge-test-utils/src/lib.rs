//! Test fixtures for Surge development.
//!
//! ASCII-art constructors for obstacle maps and whole worlds, so test
//! scenarios read as pictures instead of index arithmetic.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod fixtures;

pub use fixtures::{walls_from_ascii, world_from_ascii, DEFAULT_ENERGY};
