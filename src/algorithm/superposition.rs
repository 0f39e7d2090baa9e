//! Per-cell superposition storage with cached entropy
//!
//! Every output cell holds the set of tile indices still considered
//! possible plus a cached entropy score derived from the sample weights of
//! those candidates. Sets only ever shrink over the course of a run; a
//! cell is collapsed exactly when one candidate remains.

use crate::algorithm::bitset::CandidateSet;
use crate::algorithm::executor::RandomSelector;
use crate::analysis::adjacency::AdjacencyModel;
use crate::io::error::{Result, WeaveError};
use crate::spatial::grid::OutputGrid;

struct Cell {
    candidates: CandidateSet,
    entropy: f64,
}

/// The mutable superposition state of one generation run
pub struct SuperposGrid {
    cells: Vec<Cell>,
}

impl SuperposGrid {
    /// Initialize every cell to the full tile universe
    pub fn new(cell_count: usize, model: &AdjacencyModel) -> Self {
        let full = CandidateSet::full(model.tile_count());
        let entropy = model.entropy_of(&full);
        let cells = (0..cell_count)
            .map(|_| Cell {
                candidates: full.clone(),
                entropy,
            })
            .collect();
        Self { cells }
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True iff every cell holds at most one candidate
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(|cell| cell.candidates.len() <= 1)
    }

    /// Candidate count of a cell (zero for an out-of-range index)
    pub fn candidate_count(&self, index: usize) -> usize {
        self.cells
            .get(index)
            .map_or(0, |cell| cell.candidates.len())
    }

    /// Cached entropy of a cell (zero for an out-of-range index)
    pub fn entropy(&self, index: usize) -> f64 {
        self.cells.get(index).map_or(0.0, |cell| cell.entropy)
    }

    /// The candidate set of a cell
    pub fn candidates(&self, index: usize) -> Option<&CandidateSet> {
        self.cells.get(index).map(|cell| &cell.candidates)
    }

    /// The resolved tile index of a collapsed cell
    pub fn resolved(&self, index: usize) -> Option<usize> {
        self.cells.get(index).and_then(|cell| cell.candidates.sole())
    }

    /// Collapse a cell to one candidate by weighted random draw
    ///
    /// Probability is proportional to sample occurrence weight. The cell's
    /// set becomes a singleton and its entropy drops to zero.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCandidateSet` if the cell has no candidates left (a
    /// contradiction); an out-of-range index is treated the same way.
    pub fn collapse(
        &mut self,
        index: usize,
        model: &AdjacencyModel,
        selector: &mut RandomSelector,
    ) -> Result<usize> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(WeaveError::EmptyCandidateSet { index })?;

        let choices: Vec<usize> = cell.candidates.ones().collect();
        if choices.is_empty() {
            return Err(WeaveError::EmptyCandidateSet { index });
        }

        let weights: Vec<u32> = choices.iter().map(|&tile| model.weight(tile)).collect();
        let pick = selector.weighted_choice(&weights);
        let tile = choices
            .get(pick)
            .copied()
            .ok_or(WeaveError::EmptyCandidateSet { index })?;

        cell.candidates = CandidateSet::new(model.tile_count());
        cell.candidates.insert(tile);
        cell.entropy = 0.0;
        Ok(tile)
    }

    /// Remove a candidate from a cell, recomputing its cached entropy
    ///
    /// Returns whether a removal occurred, which decides whether the
    /// cell's neighbors need revisiting during propagation.
    pub fn remove(&mut self, index: usize, tile: usize, model: &AdjacencyModel) -> bool {
        let Some(cell) = self.cells.get_mut(index) else {
            return false;
        };
        if cell.candidates.remove(tile) {
            cell.entropy = model.entropy_of(&cell.candidates);
            true
        } else {
            false
        }
    }

    /// Consume the grid into the final output once every cell is resolved
    ///
    /// # Errors
    ///
    /// Returns `EmptyCandidateSet` naming the first unresolved cell, or
    /// `InvalidShape` if `width * height` differs from the cell count.
    pub fn into_output(
        self,
        model: &AdjacencyModel,
        width: usize,
        height: usize,
    ) -> Result<OutputGrid> {
        let mut tiles = Vec::with_capacity(self.cells.len());
        for (index, cell) in self.cells.iter().enumerate() {
            let tile = cell
                .candidates
                .sole()
                .ok_or(WeaveError::EmptyCandidateSet { index })?;
            let value = model
                .tile_at(tile)
                .ok_or(WeaveError::InvalidTileIndex {
                    index: tile,
                    max_tiles: model.tile_count(),
                })?;
            tiles.push(value);
        }
        OutputGrid::from_tiles(tiles, width, height)
    }
}
