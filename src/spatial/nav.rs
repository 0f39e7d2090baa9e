//! Index arithmetic and neighbor computation for row-major grids
//!
//! A `GridNav` is a stateless view of fixed grid dimensions plus a boundary
//! policy. Both adjacency derivation and propagation consult it for the up
//! to four orthogonal neighbors of a cell.

/// One of the four cardinal directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward the previous row
    North,
    /// Toward the next row
    South,
    /// Toward the next column
    East,
    /// Toward the previous column
    West,
}

impl Direction {
    /// All four directions in scan order
    pub const ALL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// The opposite direction
    ///
    /// Adjacency learned in one direction is mirrored into the inverse
    /// relation on the neighbor, so `inverse` must be an involution.
    pub const fn inverse(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Stable index for direction-keyed tables
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }
}

/// Behavior at grid edges
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryMode {
    /// Edge cells have fewer than four neighbors
    #[default]
    Clamp,
    /// Opposite edges are adjacent (toroidal topology)
    Wrap,
}

/// Neighbor computation for a fixed-size row-major grid
#[derive(Clone, Copy, Debug)]
pub struct GridNav {
    columns: usize,
    rows: usize,
    boundary: BoundaryMode,
}

impl GridNav {
    /// Create a navigator for a grid of the given dimensions
    pub const fn new(columns: usize, rows: usize, boundary: BoundaryMode) -> Self {
        Self {
            columns,
            rows,
            boundary,
        }
    }

    /// Number of columns
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    /// Configured boundary policy
    pub const fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    /// Convert a flat index to (column, row) coordinates
    pub const fn coordinates(&self, index: usize) -> (usize, usize) {
        (index % self.columns, index / self.columns)
    }

    /// Convert (column, row) coordinates to a flat index
    pub const fn index_of(&self, column: usize, row: usize) -> usize {
        row * self.columns + column
    }

    /// The neighboring index in a direction, if one exists
    ///
    /// Under `Clamp`, stepping off an edge yields `None`. Under `Wrap` the
    /// opposite edge is returned, except in the degenerate case where the
    /// wrap lands back on the cell itself (a one-column or one-row grid),
    /// which also yields `None`.
    pub fn neighbor(&self, index: usize, direction: Direction) -> Option<usize> {
        let size = self.cell_count();
        if index >= size || size == 0 {
            return None;
        }
        let column = index % self.columns;
        let target = match self.boundary {
            BoundaryMode::Wrap => match direction {
                Direction::North => (index + size - self.columns) % size,
                Direction::South => (index + self.columns) % size,
                Direction::West => index - column + (column + self.columns - 1) % self.columns,
                Direction::East => index - column + (column + 1) % self.columns,
            },
            BoundaryMode::Clamp => match direction {
                Direction::North => {
                    if index < self.columns {
                        index
                    } else {
                        index - self.columns
                    }
                }
                Direction::South => {
                    if index + self.columns >= size {
                        index
                    } else {
                        index + self.columns
                    }
                }
                Direction::West => {
                    if column == 0 { index } else { index - 1 }
                }
                Direction::East => {
                    if column == self.columns - 1 {
                        index
                    } else {
                        index + 1
                    }
                }
            },
        };
        (target != index).then_some(target)
    }

    /// Iterate the existing neighbors of a cell with their directions
    pub fn neighbors(&self, index: usize) -> impl Iterator<Item = (usize, Direction)> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            self.neighbor(index, direction)
                .map(|neighbor| (neighbor, direction))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_is_involution() {
        for direction in Direction::ALL {
            assert_eq!(direction.inverse().inverse(), direction);
        }
    }

    #[test]
    fn test_clamped_corner_has_two_neighbors() {
        let nav = GridNav::new(3, 3, BoundaryMode::Clamp);
        let neighbors: Vec<_> = nav.neighbors(0).collect();
        assert_eq!(neighbors.len(), 2);
        assert!(neighbors.contains(&(1, Direction::East)));
        assert!(neighbors.contains(&(3, Direction::South)));
    }

    #[test]
    fn test_wrapped_corner_has_four_neighbors() {
        let nav = GridNav::new(3, 3, BoundaryMode::Wrap);
        let neighbors: Vec<_> = nav.neighbors(0).collect();
        assert_eq!(neighbors.len(), 4);
        assert!(neighbors.contains(&(6, Direction::North)));
        assert!(neighbors.contains(&(2, Direction::West)));
    }

    #[test]
    fn test_single_column_wrap_has_no_horizontal_neighbors() {
        let nav = GridNav::new(1, 4, BoundaryMode::Wrap);
        assert_eq!(nav.neighbor(2, Direction::East), None);
        assert_eq!(nav.neighbor(2, Direction::West), None);
        assert_eq!(nav.neighbor(0, Direction::North), Some(3));
    }
}
