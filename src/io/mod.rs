//! Input/output operations and error handling

/// Command-line interface and batch processing
pub mod cli;
/// Algorithm constants and runtime configuration defaults
pub mod configuration;
/// Error types for all operations
pub mod error;
/// PNG import and export of tile grids
pub mod image;
/// Progress reporting for batch generation
pub mod progress;
