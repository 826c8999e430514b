//! Error types, organized by subsystem: grid construction, tick
//! resolution, and match control.
//!
//! All variants describe caller bugs or configuration mistakes. Benign
//! runtime outcomes (a move losing a conflict, a target set landing on a
//! wall) are absorbed silently by the components themselves and never
//! surface here.

use std::error::Error;
use std::fmt;

use crate::cell::Cell;
use crate::id::TeamId;

/// Errors from grid construction and validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A grid was constructed with zero rows or zero columns.
    EmptyGrid,
    /// A row's length differs from the first row's.
    NonRectangular {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// An occupancy layer's cell count differs from the obstacle map's.
    ShapeMismatch {
        /// Obstacle map dimensions as `(cols, rows)`.
        expected: (u32, u32),
        /// Number of cells in the occupancy layer.
        found_cells: usize,
    },
    /// A particle was placed on a wall cell.
    ParticleOnWall {
        /// The offending cell.
        cell: Cell,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one cell"),
            Self::NonRectangular {
                row,
                expected,
                found,
            } => write!(
                f,
                "row {row} has {found} cells, expected {expected} (grid must be rectangular)"
            ),
            Self::ShapeMismatch {
                expected,
                found_cells,
            } => write!(
                f,
                "occupancy layer has {found_cells} cells, obstacle map is {}x{}",
                expected.0, expected.1
            ),
            Self::ParticleOnWall { cell } => {
                write!(f, "particle placed on wall cell {cell}")
            }
        }
    }
}

impl Error for GridError {}

/// Errors from the tick resolver.
///
/// Both variants indicate the caller assembled an inconsistent tick
/// input; neither can arise from legal in-game activity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A particle's team has no distance field in the supplied mapping.
    MissingField {
        /// Team with no field.
        team: TeamId,
    },
    /// A supplied distance field's dimensions differ from the grid's.
    FieldShapeMismatch {
        /// Team whose field is misshapen.
        team: TeamId,
        /// Grid dimensions as `(cols, rows)`.
        expected: (u32, u32),
        /// Field dimensions as `(cols, rows)`.
        found: (u32, u32),
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { team } => {
                write!(f, "no distance field supplied for team {team}")
            }
            Self::FieldShapeMismatch {
                team,
                expected,
                found,
            } => write!(
                f,
                "distance field for team {team} is {}x{}, grid is {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
        }
    }
}

impl Error for StepError {}

/// Errors from match setup and the realtime runner.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlError {
    /// A match was configured with an empty team list.
    NoTeams,
    /// The same team appears twice in the configuration.
    DuplicateTeam {
        /// The repeated team.
        team: TeamId,
    },
    /// The initial world contains a particle of an unconfigured team.
    UnknownTeam {
        /// The unconfigured team.
        team: TeamId,
    },
    /// The requested tick rate is zero, negative, or non-finite.
    InvalidTickRate {
        /// The offending rate in Hz.
        value: f64,
    },
    /// The realtime command channel is at capacity.
    ChannelFull,
    /// The realtime runner has shut down.
    Shutdown,
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTeams => write!(f, "match requires at least one team"),
            Self::DuplicateTeam { team } => {
                write!(f, "team {team} configured more than once")
            }
            Self::UnknownTeam { team } => {
                write!(f, "initial world contains unconfigured team {team}")
            }
            Self::InvalidTickRate { value } => {
                write!(f, "tick rate must be finite and positive, got {value}")
            }
            Self::ChannelFull => write!(f, "command channel full"),
            Self::Shutdown => write!(f, "runner has shut down"),
        }
    }
}

impl Error for ControlError {}
