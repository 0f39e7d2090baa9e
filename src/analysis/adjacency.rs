use std::collections::HashMap;

use crate::algorithm::bitset::CandidateSet;
use crate::io::error::Result;
use crate::math::entropy::shannon_entropy;
use crate::spatial::grid::SampleGrid;
use crate::spatial::nav::{BoundaryMode, Direction, GridNav};
use crate::spatial::tiles::TileValue;

/// Learned adjacency relation and occurrence weights for a tile universe
///
/// Tiles are indexed in order of first occurrence in the sample, which
/// keeps derivation deterministic and repeat derivations equal. For every
/// tile and direction the model holds the set of tiles observed adjacent
/// in the sample; a pair that never occurs is forbidden. The relation is
/// symmetric under direction inversion because the sample walk visits both
/// cells of every pair.
#[derive(Clone, Debug)]
pub struct AdjacencyModel {
    tiles: Vec<TileValue>,
    index: HashMap<TileValue, usize>,
    weights: Vec<u32>,
    allowed: Vec<[CandidateSet; 4]>,
}

impl AdjacencyModel {
    /// Derive a model from a row-major sample grid and its width
    ///
    /// # Errors
    ///
    /// Returns `InvalidShape` if the tile count is zero, the width is
    /// zero, or the tile count is not an exact multiple of the width.
    pub fn derive(tiles: &[TileValue], width: usize) -> Result<Self> {
        let sample = SampleGrid::new(tiles.to_vec(), width)?;
        Ok(Self::from_sample(&sample))
    }

    /// Derive a model from an already validated sample grid
    ///
    /// Sample navigation is always clamped: a sample swatch has physical
    /// edges, so no adjacency is learned across them.
    pub fn from_sample(sample: &SampleGrid) -> Self {
        let mut index = HashMap::new();
        let mut tiles = Vec::new();
        let mut weights: Vec<u32> = Vec::new();

        for &tile in sample.iter() {
            if let Some(&position) = index.get(&tile) {
                if let Some(weight) = weights.get_mut(position) {
                    *weight += 1;
                }
            } else {
                index.insert(tile, tiles.len());
                tiles.push(tile);
                weights.push(1);
            }
        }

        let universe = tiles.len();
        let mut allowed: Vec<[CandidateSet; 4]> = (0..universe)
            .map(|_| std::array::from_fn(|_| CandidateSet::new(universe)))
            .collect();

        let nav = GridNav::new(sample.width(), sample.height(), BoundaryMode::Clamp);
        for (cell, &tile) in sample.iter().enumerate() {
            let Some(&origin) = index.get(&tile) else {
                continue;
            };
            for (neighbor_cell, direction) in nav.neighbors(cell) {
                let Some(neighbor) = sample.value(neighbor_cell) else {
                    continue;
                };
                let Some(&target) = index.get(&neighbor) else {
                    continue;
                };
                if let Some(table) = allowed.get_mut(origin) {
                    if let Some(set) = table.get_mut(direction.index()) {
                        set.insert(target);
                    }
                }
            }
        }

        Self {
            tiles,
            index,
            weights,
            allowed,
        }
    }

    /// Number of distinct tiles in the universe
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Tiles in universe (first-occurrence) order
    pub fn tiles(&self) -> &[TileValue] {
        &self.tiles
    }

    /// Universe index of a tile value
    pub fn index_of(&self, tile: TileValue) -> Option<usize> {
        self.index.get(&tile).copied()
    }

    /// Tile value at a universe index
    pub fn tile_at(&self, index: usize) -> Option<TileValue> {
        self.tiles.get(index).copied()
    }

    /// Occurrence count of a tile by universe index (zero if out of range)
    pub fn weight(&self, tile: usize) -> u32 {
        self.weights.get(tile).copied().unwrap_or(0)
    }

    /// Occurrence counts in universe order
    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// The allow-set for a tile index in a direction
    pub fn allowed(&self, tile: usize, direction: Direction) -> Option<&CandidateSet> {
        self.allowed.get(tile).and_then(|table| table.get(direction.index()))
    }

    /// Whether tile value `b` may sit in `direction` from tile value `a`
    pub fn allows(&self, a: TileValue, direction: Direction, b: TileValue) -> bool {
        let (Some(origin), Some(target)) = (self.index_of(a), self.index_of(b)) else {
            return false;
        };
        self.allowed(origin, direction)
            .is_some_and(|set| set.contains(target))
    }

    /// Cached-entropy input: entropy of a candidate set under these weights
    pub fn entropy_of(&self, candidates: &CandidateSet) -> f64 {
        shannon_entropy(candidates.ones().map(|tile| self.weight(tile)))
    }
}
