//! Error types for catalog construction, generation runs and file I/O

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all library operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// A sample or tile image could not be opened or decoded
    ImageLoad {
        /// Image that was read
        path: PathBuf,
        /// Decoder failure
        source: image::ImageError,
    },

    /// Samples, blocks or adjacency cannot form a catalog
    InvalidSourceData {
        /// What the input lacks
        reason: String,
    },

    /// Tile images or pixel blocks of differing sizes were supplied
    InconsistentTileSize {
        /// Name or position of the offending tile
        tile: String,
        /// Side length established by the first tile
        expected: usize,
        /// Side length of the offending tile
        found: usize,
    },

    /// A rule set named a symmetry class that is not recognized
    UnknownSymmetry {
        /// The unrecognized class name
        name: String,
    },

    /// A rule set is structurally invalid
    MalformedRules {
        /// Description of the problem
        reason: String,
    },

    /// A numeric or path argument is out of range
    InvalidParameter {
        /// Argument name
        parameter: &'static str,
        /// Rejected value, formatted
        value: String,
        /// Accepted range or rule
        reason: String,
    },

    /// Tile index exceeds the catalog
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Number of tiles in the catalog
        max_tiles: usize,
    },

    /// Consecutive contradictions reached the caller's retry ceiling
    ///
    /// Indicates the constraint set is most likely unsatisfiable for the
    /// requested grid.
    Unsatisfiable {
        /// Number of attempts made, each ending in a contradiction
        attempts: usize,
    },

    /// A PNG or GIF output could not be encoded or written
    ImageExport {
        /// Output file
        path: PathBuf,
        /// Encoder failure
        source: image::ImageError,
    },

    /// Reading a definition or preparing an output location failed
    FileSystem {
        /// File or directory involved
        path: PathBuf,
        /// What was being done, e.g. "read tile set"
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Cannot decode image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => write!(f, "Unusable input: {reason}"),
            Self::InconsistentTileSize {
                tile,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Tile '{tile}' is {found}x{found} but the tileset uses {expected}x{expected}"
                )
            }
            Self::UnknownSymmetry { name } => {
                write!(f, "Unknown symmetry class '{name}'")
            }
            Self::MalformedRules { reason } => {
                write!(f, "Malformed rule set: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (tiles: {max_tiles})")
            }
            Self::Unsatisfiable { attempts } => {
                write!(
                    f,
                    "Gave up after {attempts} consecutive contradictions; constraints look unsatisfiable"
                )
            }
            Self::ImageExport { path, source } => {
                write!(f, "Cannot write image '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => write!(f, "Cannot {operation} '{}': {source}", path.display()),
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::InvalidSourceData { .. }
            | Self::InconsistentTileSize { .. }
            | Self::UnknownSymmetry { .. }
            | Self::MalformedRules { .. }
            | Self::InvalidParameter { .. }
            | Self::InvalidTileIndex { .. }
            | Self::Unsatisfiable { .. } => None,
        }
    }
}

/// Convenience type alias for library results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

impl AlgorithmError {
    /// Whether this error stems from an invalid tileset or rule set
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InconsistentTileSize { .. }
                | Self::UnknownSymmetry { .. }
                | Self::MalformedRules { .. }
                | Self::InvalidSourceData { .. }
        )
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a malformed rule set error
pub fn malformed_rules(reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::MalformedRules {
        reason: reason.to_string(),
    }
}

/// Create an error for an input path that is not a regular file
pub fn missing_file(path: &Path, operation: &'static str) -> AlgorithmError {
    AlgorithmError::FileSystem {
        path: path.to_path_buf(),
        operation,
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "not a regular file"),
    }
}
