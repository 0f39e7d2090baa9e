//! Sample and output grid containers
//!
//! Both grids are row-major with a fixed width and height. The sample grid
//! validates its shape on construction so malformed dimensions fail before
//! any per-cell state is allocated; the output grid exists only as the
//! product of a fully collapsed run.

use ndarray::Array2;

use crate::io::error::{Result, WeaveError};
use crate::spatial::tiles::TileValue;

/// A validated row-major sample grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleGrid {
    cells: Array2<TileValue>,
}

impl SampleGrid {
    /// Build a sample grid from row-major tiles and a width
    ///
    /// Height is inferred from `tiles.len() / width`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidShape` if the tile count is zero, the width is zero,
    /// or the tile count is not an exact multiple of the width.
    pub fn new(tiles: Vec<TileValue>, width: usize) -> Result<Self> {
        let length = tiles.len();
        if width == 0 || length == 0 || length % width != 0 {
            return Err(WeaveError::InvalidShape { length, width });
        }
        let height = length / width;
        match Array2::from_shape_vec((height, width), tiles) {
            Ok(cells) => Ok(Self { cells }),
            Err(_) => Err(WeaveError::InvalidShape { length, width }),
        }
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells (never true for a constructed grid)
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The tile at a flat row-major index
    pub fn value(&self, index: usize) -> Option<TileValue> {
        let width = self.width();
        if width == 0 {
            return None;
        }
        self.cells.get((index / width, index % width)).copied()
    }

    /// Iterate tiles in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &TileValue> {
        self.cells.iter()
    }
}

/// The final grid of one resolved tile per cell
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputGrid {
    cells: Array2<TileValue>,
}

impl OutputGrid {
    /// Assemble an output grid from row-major tiles
    ///
    /// # Errors
    ///
    /// Returns `InvalidShape` if `tiles.len()` differs from
    /// `width * height` or either dimension is zero.
    pub fn from_tiles(tiles: Vec<TileValue>, width: usize, height: usize) -> Result<Self> {
        let length = tiles.len();
        if width == 0 || height == 0 || length != width * height {
            return Err(WeaveError::InvalidShape { length, width });
        }
        match Array2::from_shape_vec((height, width), tiles) {
            Ok(cells) => Ok(Self { cells }),
            Err(_) => Err(WeaveError::InvalidShape { length, width }),
        }
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells (never true for a constructed grid)
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The tile at (column, row)
    pub fn get(&self, column: usize, row: usize) -> Option<TileValue> {
        self.cells.get((row, column)).copied()
    }

    /// The tile at a flat row-major index
    pub fn value(&self, index: usize) -> Option<TileValue> {
        let width = self.width();
        if width == 0 {
            return None;
        }
        self.cells.get((index / width, index % width)).copied()
    }

    /// Iterate tiles in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &TileValue> {
        self.cells.iter()
    }

    /// Consume the grid into its row-major tile sequence
    pub fn into_tiles(self) -> Vec<TileValue> {
        self.cells.into_iter().collect()
    }
}
