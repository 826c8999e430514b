//! The immutable wall layer.

use smallvec::SmallVec;
use surge_core::{Cell, GridError, ORTHO_STEPS};

/// A rectangular boolean wall grid, immutable for the lifetime of a match.
///
/// Cells outside the grid are treated as blocked, so callers never need a
/// separate bounds check before asking [`is_wall`](ObstacleMap::is_wall).
/// Level loaders are expected to force border walls before handing the
/// map over; [`with_border`](ObstacleMap::with_border) does that for
/// procedurally built maps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObstacleMap {
    cols: u32,
    rows: u32,
    blocked: Vec<bool>,
}

impl ObstacleMap {
    /// Build a map from nested rows (`blocked[y][x]`).
    ///
    /// Returns [`GridError::EmptyGrid`] for zero rows or zero columns and
    /// [`GridError::NonRectangular`] if any row's length differs from the
    /// first row's.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self, GridError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(GridError::EmptyGrid);
        }
        let cols = rows[0].len();
        for (y, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::NonRectangular {
                    row: y,
                    expected: cols,
                    found: row.len(),
                });
            }
        }
        let mut blocked = Vec::with_capacity(cols * rows.len());
        for row in &rows {
            blocked.extend_from_slice(row);
        }
        Ok(Self {
            cols: cols as u32,
            rows: rows.len() as u32,
            blocked,
        })
    }

    /// Build an all-open map of the given dimensions.
    ///
    /// Returns [`GridError::EmptyGrid`] if either dimension is 0.
    pub fn open(cols: u32, rows: u32) -> Result<Self, GridError> {
        if cols == 0 || rows == 0 {
            return Err(GridError::EmptyGrid);
        }
        Ok(Self {
            cols,
            rows,
            blocked: vec![false; cols as usize * rows as usize],
        })
    }

    /// Force every border cell to a wall.
    pub fn with_border(mut self) -> Self {
        let (w, h) = (self.cols as i32, self.rows as i32);
        for x in 0..w {
            let top = self.idx(x, 0);
            self.blocked[top] = true;
            let bottom = self.idx(x, h - 1);
            self.blocked[bottom] = true;
        }
        for y in 0..h {
            let left = self.idx(0, y);
            self.blocked[left] = true;
            let right = self.idx(w - 1, y);
            self.blocked[right] = true;
        }
        self
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Whether `(x, y)` lies inside the grid.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as u32) < self.cols && y >= 0 && (y as u32) < self.rows
    }

    /// Whether `(x, y)` is blocked. Out-of-bounds counts as blocked.
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }
        self.blocked[self.idx(x, y)]
    }

    /// Orthogonal neighbours of `cell` that are in bounds and not walls,
    /// in canonical scan order.
    pub fn open_neighbours4(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        let mut out = SmallVec::new();
        for (dx, dy) in ORTHO_STEPS {
            let n = cell.offset(dx, dy);
            if !self.is_wall(n.x, n.y) {
                out.push(n);
            }
        }
        out
    }

    /// Row-major index of an in-bounds cell.
    fn idx(&self, x: i32, y: i32) -> usize {
        y as usize * self.cols as usize + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_rows_rejects_empty() {
        assert_eq!(ObstacleMap::from_rows(vec![]), Err(GridError::EmptyGrid));
        assert_eq!(
            ObstacleMap::from_rows(vec![vec![]]),
            Err(GridError::EmptyGrid)
        );
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let result = ObstacleMap::from_rows(vec![vec![false, false], vec![false]]);
        assert_eq!(
            result,
            Err(GridError::NonRectangular {
                row: 1,
                expected: 2,
                found: 1,
            })
        );
    }

    #[test]
    fn open_rejects_zero_dimension() {
        assert_eq!(ObstacleMap::open(0, 5), Err(GridError::EmptyGrid));
        assert_eq!(ObstacleMap::open(5, 0), Err(GridError::EmptyGrid));
    }

    #[test]
    fn out_of_bounds_is_wall() {
        let m = ObstacleMap::open(3, 3).unwrap();
        assert!(m.is_wall(-1, 0));
        assert!(m.is_wall(0, -1));
        assert!(m.is_wall(3, 0));
        assert!(m.is_wall(0, 3));
        assert!(!m.is_wall(1, 1));
    }

    #[test]
    fn with_border_blocks_the_frame() {
        let m = ObstacleMap::open(4, 3).unwrap().with_border();
        for x in 0..4 {
            assert!(m.is_wall(x, 0));
            assert!(m.is_wall(x, 2));
        }
        for y in 0..3 {
            assert!(m.is_wall(0, y));
            assert!(m.is_wall(3, y));
        }
        assert!(!m.is_wall(1, 1));
        assert!(!m.is_wall(2, 1));
    }

    #[test]
    fn open_neighbours_interior_in_scan_order() {
        let m = ObstacleMap::open(5, 5).unwrap();
        let n = m.open_neighbours4(Cell::new(2, 2));
        assert_eq!(
            n.as_slice(),
            &[
                Cell::new(3, 2),
                Cell::new(1, 2),
                Cell::new(2, 3),
                Cell::new(2, 1),
            ]
        );
    }

    #[test]
    fn open_neighbours_skips_walls_and_bounds() {
        // 3x1 corridor with a wall in the middle.
        let m = ObstacleMap::from_rows(vec![vec![false, true, false]]).unwrap();
        let n = m.open_neighbours4(Cell::new(0, 0));
        assert!(n.is_empty());
    }

    proptest! {
        #[test]
        fn neighbour_lists_never_contain_walls(cols in 1u32..8, rows in 1u32..8, x in 0i32..8, y in 0i32..8) {
            let m = ObstacleMap::open(cols, rows).unwrap().with_border();
            for n in m.open_neighbours4(Cell::new(x % cols as i32, y % rows as i32)) {
                prop_assert!(m.in_bounds(n.x, n.y));
                prop_assert!(!m.is_wall(n.x, n.y));
            }
        }
    }
}
