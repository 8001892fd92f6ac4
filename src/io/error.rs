//! Error types for move application, optimization and file handling

use std::fmt;
use std::path::{Path, PathBuf};

use crate::spatial::geometry::{Point, Shape};
use crate::spatial::partition::BlockId;

/// Failure to apply a single move to a partition
///
/// Always local and recoverable: the partition the move was applied to is
/// never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Referenced block id is absent from the partition
    BlockNotFound {
        /// The missing id
        id: BlockId,
    },

    /// Cut point is not strictly inside the block
    PointOutsideBlock {
        /// Block the cut addressed
        id: BlockId,
        /// Requested cut point
        point: Point,
        /// Rectangle of the addressed block
        shape: Shape,
    },

    /// Operation is not supported on the addressed block
    WrongBlockKind {
        /// Block the operation addressed
        id: BlockId,
        /// Name of the rejected operation
        operation: &'static str,
    },

    /// Swap between blocks of different width or height
    ShapeMismatch {
        /// First block of the pair
        first: BlockId,
        /// Second block of the pair
        second: BlockId,
    },

    /// Merge between blocks that do not share a full edge
    NotAdjacent {
        /// First block of the pair
        first: BlockId,
        /// Second block of the pair
        second: BlockId,
    },

    /// Merge between blocks in different containing regions
    DifferentParents {
        /// First block of the pair
        first: BlockId,
        /// Second block of the pair
        second: BlockId,
    },

    /// Rectangle or partition geometry is malformed
    InvalidGeometry {
        /// Description of the violation
        reason: String,
    },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockNotFound { id } => write!(f, "Block '{id}' not found"),
            Self::PointOutsideBlock { id, point, shape } => {
                write!(
                    f,
                    "Point {point} is not strictly inside block '{id}' ({shape})"
                )
            }
            Self::WrongBlockKind { id, operation } => {
                write!(f, "Block '{id}' does not support {operation}")
            }
            Self::ShapeMismatch { first, second } => {
                write!(
                    f,
                    "Blocks '{first}' and '{second}' have different shapes and cannot be swapped"
                )
            }
            Self::NotAdjacent { first, second } => {
                write!(f, "Blocks '{first}' and '{second}' are not adjacent")
            }
            Self::DifferentParents { first, second } => {
                write!(f, "Blocks '{first}' and '{second}' have different parents")
            }
            Self::InvalidGeometry { reason } => write!(f, "Invalid geometry: {reason}"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Main error type for all crate operations
#[derive(Debug)]
pub enum RasterError {
    /// Failed to load a target image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered partition to disk
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

    /// Target pixel buffer is unusable (zero area, missing channels, wrong size)
    InvalidImage {
        /// Description of what is wrong with the image
        reason: String,
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

    /// A move could not be applied
    Move(MoveError),

    /// Optimization pass stopped by its cancel token
    Cancelled {
        /// Blocks evaluated before cancellation was noticed
        completed: usize,
        /// Blocks in the pass
        total: usize,
    },

    /// Move log line could not be parsed
    Transcript {
        /// One-based line number
        line: usize,
        /// Description of the problem
        reason: String,
    },
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
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
            Self::InvalidImage { reason } => write!(f, "Invalid image: {reason}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Move(error) => write!(f, "Move failed: {error}"),
            Self::Cancelled { completed, total } => {
                write!(
                    f,
                    "Optimization cancelled after {completed} of {total} blocks"
                )
            }
            Self::Transcript { line, reason } => {
                write!(f, "Malformed move log at line {line}: {reason}")
            }
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Move(error) => Some(error),
            _ => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, RasterError>;

impl From<MoveError> for RasterError {
    fn from(err: MoveError) -> Self {
        Self::Move(err)
    }
}

impl From<image::ImageError> for RasterError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for RasterError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Attaches the file involved to filesystem failures
pub trait WithPath<T> {
    /// Tag an I/O failure with its path and operation
    ///
    /// # Errors
    ///
    /// Propagates the original error as [`RasterError::FileSystem`]
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|source| RasterError::FileSystem {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> RasterError {
    RasterError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid image error
pub fn invalid_image(reason: &impl ToString) -> RasterError {
    RasterError::InvalidImage {
        reason: reason.to_string(),
    }
}
