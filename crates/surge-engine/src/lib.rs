//! Tick resolution and match orchestration for the Surge liquid-combat
//! simulation.
//!
//! The [`resolver`] module turns one grid state plus one distance field
//! per team into the next grid state: the synchronous cellular-automaton
//! step at the heart of the game. [`MatchController`] owns the state and
//! targets, builds fields, and publishes snapshots; [`RealtimeMatch`]
//! drives a controller from a background thread at a fixed tick rate;
//! [`OpponentPolicy`] is the simple mirroring/retargeting computer player.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod controller;
pub mod metrics;
pub mod policy;
pub mod realtime;
pub mod resolver;
pub mod target;

pub use controller::MatchController;
pub use metrics::TickMetrics;
pub use policy::OpponentPolicy;
pub use realtime::{Command, RealtimeMatch};
pub use target::TargetSlot;
