use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::propagation::propagate_from;
use crate::algorithm::selection::lowest_entropy_cell;
use crate::algorithm::superposition::SuperposGrid;
use crate::analysis::adjacency::AdjacencyModel;
use crate::io::configuration::SELECTION_JITTER;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::OutputGrid;
use crate::spatial::nav::{BoundaryMode, GridNav};
use crate::spatial::tiles::TileValue;

/// Output dimensions and boundary policy for one generation run
#[derive(Clone, Copy, Debug)]
pub struct GeneratorConfig {
    /// Output grid width in cells
    pub width: usize,
    /// Output grid height in cells
    pub height: usize,
    /// Boundary behavior during propagation
    pub boundary: BoundaryMode,
}

impl GeneratorConfig {
    /// Config with the default clamped boundary
    pub const fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            boundary: BoundaryMode::Clamp,
        }
    }

    /// Replace the boundary policy
    pub const fn with_boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }
}

/// Engine state: generation is either still running or complete
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Not every cell is collapsed yet
    Running,
    /// Every cell is resolved; the output can be assembled
    Done,
}

/// Cell change notification for observers
///
/// Emitted after each collapse and after each propagation-induced removal.
/// Observation only; observers never influence the run.
#[derive(Clone, Copy, Debug)]
pub enum CellChange {
    /// A cell was fixed to one concrete tile by weighted random draw
    Collapsed {
        /// Flat row-major cell index
        index: usize,
        /// The chosen tile value
        tile: TileValue,
    },
    /// Propagation removed a candidate from a cell
    Reduced {
        /// Flat row-major cell index
        index: usize,
        /// Candidates remaining after the removal
        remaining: usize,
    },
}

/// Callback receiving cell change notifications
pub type Observer = Box<dyn FnMut(CellChange)>;

/// Seeded random selector for reproducible stochastic choices
///
/// The only source of randomness in a run; injecting the seed here keeps
/// two runs with identical inputs byte-identical.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Weighted random selection over occurrence counts
    ///
    /// Returns an index into `weights` using the cumulative distribution.
    pub fn weighted_choice(&mut self, weights: &[u32]) -> usize {
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return 0;
        }

        let mut rand_val = self.rng.random::<f64>() * f64::from(total);
        for (i, &weight) in weights.iter().enumerate() {
            rand_val -= f64::from(weight);
            if rand_val <= 0.0 {
                return i;
            }
        }
        weights.len().saturating_sub(1)
    }

    /// Sub-entropy-scale random offset for tie-breaking
    pub fn jitter(&mut self) -> f64 {
        self.rng.random::<f64>() * SELECTION_JITTER
    }
}

/// Wave function collapse engine for one generation run
///
/// Repeatedly selects the least certain cell, collapses it by weighted
/// random draw, and propagates the consequences to a fixed point. The
/// engine owns the superposition grid for its whole lifetime; dropping it
/// abandons the run.
pub struct Generator {
    model: AdjacencyModel,
    grid: SuperposGrid,
    nav: GridNav,
    selector: RandomSelector,
    observer: Option<Observer>,
    status: Status,
    iterations: usize,
}

impl Generator {
    /// Create an engine for the given model, output shape and seed
    ///
    /// Every cell starts as the full tile universe. A universe of one tile
    /// means every cell is born collapsed and the engine starts `Done`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either output dimension is zero.
    pub fn new(model: AdjacencyModel, config: GeneratorConfig, seed: u64) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(invalid_parameter(
                "dimensions",
                &format!("{}x{}", config.width, config.height),
                &"output dimensions must be positive",
            ));
        }

        let nav = GridNav::new(config.width, config.height, config.boundary);
        let grid = SuperposGrid::new(nav.cell_count(), &model);
        let status = if grid.is_fully_collapsed() {
            Status::Done
        } else {
            Status::Running
        };

        Ok(Self {
            model,
            grid,
            nav,
            selector: RandomSelector::new(seed),
            observer: None,
            status,
            iterations: 0,
        })
    }

    /// Current engine state
    pub const fn status(&self) -> Status {
        self.status
    }

    /// Completed select/collapse/propagate iterations
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// The adjacency model driving this run
    pub const fn model(&self) -> &AdjacencyModel {
        &self.model
    }

    /// The superposition grid, for inspection between steps
    pub const fn grid(&self) -> &SuperposGrid {
        &self.grid
    }

    /// Install an observer for collapse and removal notifications
    pub fn set_observer(&mut self, observer: Observer) {
        self.observer = Some(observer);
    }

    /// Remove the observer
    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    /// Run one select/collapse/propagate iteration
    ///
    /// A no-op returning `Done` once complete. Calling `step` in a loop is
    /// outcome-identical to `generate`; the boundary between iterations is
    /// the cooperative suspension point for callers that want to observe
    /// intermediate state.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCandidateSet` if propagation empties a cell (the run
    /// is contradictory and should be discarded).
    pub fn step(&mut self) -> Result<Status> {
        if self.status == Status::Done {
            return Ok(Status::Done);
        }

        let Some(index) = lowest_entropy_cell(&self.grid, &mut self.selector) else {
            self.status = Status::Done;
            return Ok(Status::Done);
        };
        self.iterations += 1;

        let tile = self.grid.collapse(index, &self.model, &mut self.selector)?;
        if let Some(observer) = self.observer.as_mut() {
            if let Some(value) = self.model.tile_at(tile) {
                observer(CellChange::Collapsed { index, tile: value });
            }
        }

        let observer = &mut self.observer;
        propagate_from(
            &mut self.grid,
            &self.model,
            &self.nav,
            index,
            |cell, remaining| {
                if let Some(callback) = observer.as_mut() {
                    callback(CellChange::Reduced {
                        index: cell,
                        remaining,
                    });
                }
            },
        )?;

        if self.grid.is_fully_collapsed() {
            self.status = Status::Done;
        }
        Ok(self.status)
    }

    /// Run to completion and assemble the output grid
    ///
    /// # Errors
    ///
    /// Returns `EmptyCandidateSet` if any iteration hits a contradiction.
    pub fn generate(mut self) -> Result<OutputGrid> {
        while self.step()? == Status::Running {}
        self.into_output()
    }

    /// Consume a finished engine into its output grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the engine is still running, or
    /// `EmptyCandidateSet` if a cell was left contradictory.
    pub fn into_output(self) -> Result<OutputGrid> {
        if self.status != Status::Done {
            return Err(invalid_parameter(
                "status",
                &"running",
                &"output requested before every cell collapsed",
            ));
        }
        self.grid
            .into_output(&self.model, self.nav.columns(), self.nav.rows())
    }
}
