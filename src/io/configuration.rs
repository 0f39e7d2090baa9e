//! Algorithm constants and runtime configuration defaults

/// Scale of the random jitter subtracted from entropy during selection
///
/// Breaks exact entropy ties uniformly at random instead of by index
/// order. Must stay below the smallest entropy gap between distinct
/// candidate-set compositions so it never reorders genuinely different
/// cells; with integer occurrence weights that gap is many orders of
/// magnitude above this value.
pub const SELECTION_JITTER: f64 = 1e-9;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default output grid width in cells
pub const DEFAULT_OUTPUT_WIDTH: usize = 32;

/// Default output grid height in cells
pub const DEFAULT_OUTPUT_HEIGHT: usize = 32;

/// Default number of generation attempts before giving up on contradiction
pub const DEFAULT_RETRIES: usize = 10;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_woven";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
