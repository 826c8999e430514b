//! ASCII map parsing.
//!
//! Legend: `#` wall, `.` open, digits `0`–`9` a particle of that team
//! holding [`DEFAULT_ENERGY`].

use std::sync::Arc;

use surge_core::{Cell, Particle, TeamId};
use surge_grid::{GridState, ObstacleMap};

/// Energy given to particles placed by [`world_from_ascii`].
pub const DEFAULT_ENERGY: u16 = 5;

/// Parse an obstacle map from ASCII art.
///
/// Leading/trailing whitespace is trimmed per line; every non-`#`
/// character is open terrain.
pub fn walls_from_ascii(art: &str) -> ObstacleMap {
    let rows: Vec<Vec<bool>> = trimmed_lines(art)
        .iter()
        .map(|line| line.chars().map(|c| c == '#').collect())
        .collect();
    ObstacleMap::from_rows(rows).expect("fixture map must be rectangular and non-empty")
}

/// Parse a whole world (walls plus particles) from ASCII art.
pub fn world_from_ascii(art: &str) -> GridState {
    let lines = trimmed_lines(art);
    let rows: Vec<Vec<bool>> = lines
        .iter()
        .map(|line| line.chars().map(|c| c == '#').collect())
        .collect();
    let walls =
        Arc::new(ObstacleMap::from_rows(rows).expect("fixture map must be rectangular and non-empty"));
    let mut state = GridState::empty(walls);
    for (y, line) in lines.iter().enumerate() {
        for (x, ch) in line.chars().enumerate() {
            if let Some(team) = ch.to_digit(10) {
                state
                    .place(
                        Cell::new(x as i32, y as i32),
                        Particle::new(TeamId(team as u8), DEFAULT_ENERGY),
                    )
                    .expect("fixture particles must sit on open cells");
            }
        }
    }
    state
}

fn trimmed_lines(art: &str) -> Vec<&str> {
    art.trim()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walls_parse_hashes() {
        let m = walls_from_ascii(
            "###
             #.#
             ###",
        );
        assert_eq!(m.cols(), 3);
        assert_eq!(m.rows(), 3);
        assert!(m.is_wall(0, 0));
        assert!(!m.is_wall(1, 1));
    }

    #[test]
    fn world_places_team_particles() {
        let w = world_from_ascii(
            "#####
             #0.1#
             #####",
        );
        assert_eq!(w.particle_count(), 2);
        assert_eq!(w.occupant(1, 1).unwrap().team, TeamId(0));
        assert_eq!(w.occupant(3, 1).unwrap().team, TeamId(1));
        assert_eq!(w.occupant(1, 1).unwrap().energy, DEFAULT_ENERGY);
    }
}
