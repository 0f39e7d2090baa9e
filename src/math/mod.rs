//! Mathematical utilities for the algorithm

/// Weighted Shannon entropy of candidate sets
pub mod entropy;
