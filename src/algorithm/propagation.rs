//! Worklist constraint propagation
//!
//! After a collapse, the consequences cascade outward: a neighbor's
//! candidate survives only if some candidate of the source cell allows it
//! in that direction. This is a local arc-consistency filter, not a
//! search; it removes values proven locally impossible and nothing more.
//! Correctness does not depend on worklist order, only on running to a
//! fixed point, so the stack discipline here is a performance choice.

use std::collections::HashSet;

use crate::algorithm::bitset::CandidateSet;
use crate::algorithm::superposition::SuperposGrid;
use crate::analysis::adjacency::AdjacencyModel;
use crate::io::error::{Result, WeaveError};
use crate::spatial::nav::GridNav;

/// Propagate candidate removals outward from a changed cell
///
/// Runs a stack worklist with O(1) pending-membership tracking until no
/// cell changes. `on_removal` observes every removal with the affected
/// cell index and its remaining candidate count.
///
/// # Errors
///
/// Returns `EmptyCandidateSet` the moment a removal empties a cell; the
/// grid is left in the contradictory state for inspection and the run
/// should be discarded.
pub fn propagate_from<F>(
    grid: &mut SuperposGrid,
    model: &AdjacencyModel,
    nav: &GridNav,
    start: usize,
    mut on_removal: F,
) -> Result<()>
where
    F: FnMut(usize, usize),
{
    let mut stack = vec![start];
    let mut pending: HashSet<usize> = HashSet::from([start]);

    while let Some(current) = stack.pop() {
        pending.remove(&current);

        let source = match grid.candidates(current) {
            Some(set) => set.clone(),
            None => continue,
        };

        for (neighbor, direction) in nav.neighbors(current) {
            // Union of everything any source candidate allows this way
            let mut allowed_union = CandidateSet::new(model.tile_count());
            for tile in source.ones() {
                if let Some(allowed) = model.allowed(tile, direction) {
                    allowed_union.union_with(allowed);
                }
            }

            let doomed: Vec<usize> = match grid.candidates(neighbor) {
                Some(set) => set
                    .ones()
                    .filter(|&tile| !allowed_union.contains(tile))
                    .collect(),
                None => continue,
            };
            if doomed.is_empty() {
                continue;
            }

            for tile in doomed {
                if grid.remove(neighbor, tile, model) {
                    on_removal(neighbor, grid.candidate_count(neighbor));
                }
            }

            if grid.candidate_count(neighbor) == 0 {
                return Err(WeaveError::EmptyCandidateSet { index: neighbor });
            }

            if pending.insert(neighbor) {
                stack.push(neighbor);
            }
        }
    }

    Ok(())
}
