//! Entropy-guided cell selection
//!
//! Each iteration collapses the least certain cell. Exact entropy ties are
//! broken uniformly at random by subtracting a jitter far smaller than any
//! real entropy gap, instead of deterministically by index order.

use crate::algorithm::executor::RandomSelector;
use crate::algorithm::superposition::SuperposGrid;

/// Index of the uncollapsed cell with the lowest jittered entropy
///
/// Cells with one or zero candidates are skipped; `None` means every cell
/// is resolved and the run is done.
pub fn lowest_entropy_cell(grid: &SuperposGrid, selector: &mut RandomSelector) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for index in 0..grid.len() {
        if grid.candidate_count(index) <= 1 {
            continue;
        }
        let jittered = grid.entropy(index) - selector.jitter();
        match best {
            Some((_, score)) if score <= jittered => {}
            _ => best = Some((index, jittered)),
        }
    }
    best.map(|(index, _)| index)
}
