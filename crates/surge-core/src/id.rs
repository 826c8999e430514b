//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a team within a match.
///
/// Teams are small non-negative integers assigned at match setup;
/// `TeamId(0)` is conventionally the human player in the two-team game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TeamId(pub u8);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for TeamId {
    fn from(v: u8) -> Self {
        Self(v)
    }
}

/// Monotonically increasing tick counter.
///
/// Incremented each time the simulation advances one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_id_display_and_from() {
        let t: TeamId = 3u8.into();
        assert_eq!(t, TeamId(3));
        assert_eq!(t.to_string(), "3");
    }

    #[test]
    fn tick_id_ordering() {
        assert!(TickId(1) < TickId(2));
        assert_eq!(TickId::from(7u64).to_string(), "7");
    }
}
