//! Statistical analysis of sample grids
//!
//! Derives the adjacency relation and occurrence weights a generation run
//! consults. The derived model is a pure function of the sample and is
//! immutable after construction.

/// Adjacency rule and weight derivation
pub mod adjacency;

pub use adjacency::AdjacencyModel;
