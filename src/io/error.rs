//! Error types for sample analysis, generation and file operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all operations
#[derive(Debug)]
pub enum WeaveError {
    /// Grid length is not a positive exact multiple of the declared width
    ///
    /// Surfaced before any per-cell state is allocated.
    InvalidShape {
        /// Number of tiles supplied
        length: usize,
        /// Declared grid width
        width: usize,
    },

    /// A cell's candidate set was reduced to zero (contradiction)
    ///
    /// No tile value can legally occupy the cell given prior choices. The
    /// run is unrecoverable; the only defined recovery is to discard it
    /// and start over with a fresh seed.
    EmptyCandidateSet {
        /// Flat row-major index of the contradictory cell
        index: usize,
    },

    /// Every generation attempt ended in contradiction
    RetriesExhausted {
        /// Number of attempts made
        attempts: usize,
    },

    /// Tile index exceeds the derived tile universe
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Size of the tile universe
        max_tiles: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to load a sample image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for WeaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidShape { length, width } => {
                write!(
                    f,
                    "Grid of {length} tiles is not an exact multiple of width {width}"
                )
            }
            Self::EmptyCandidateSet { index } => {
                write!(f, "Cell {index} has no remaining candidates (contradiction)")
            }
            Self::RetriesExhausted { attempts } => {
                write!(f, "All {attempts} generation attempts ended in contradiction")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (universe: {max_tiles})")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for WeaveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for results across the crate
pub type Result<T> = std::result::Result<T, WeaveError>;

impl From<std::io::Error> for WeaveError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> WeaveError {
    WeaveError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
