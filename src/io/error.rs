//! Error types for pool bookkeeping, configuration and layout export

use std::fmt;
use std::path::PathBuf;

use crate::lifecycle::record::Category;

/// Main error type for all generation and release operations
#[derive(Debug)]
pub enum LevelError {
    /// Configuration parameter failed validation
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// An instance was released to a pool that already holds it as inactive
    ///
    /// Reported only when collection checks are enabled. The pool is left
    /// untouched by the offending release.
    DoubleRelease {
        /// Category of the pool that rejected the release
        category: Category,
        /// Archetype index of the pool
        pool_index: usize,
    },

    /// Archetype index does not address any pool of the category
    UnknownPool {
        /// Category that was addressed
        category: Category,
        /// The requested pool index
        index: usize,
        /// Number of pools configured for the category
        pool_count: usize,
    },

    /// A placement record no longer matches the registry contents
    ///
    /// Occurs when an enemy is removed by a stored identifier that has drifted
    /// from its position, or when the record was already released.
    StaleRecord {
        /// Identifier stored in the record
        id: i64,
        /// Current length of the enemy sequence
        registered: usize,
    },

    /// Generation was requested before the pools were set up
    PoolsNotReady,

    /// Failed to save the layout image to disk
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

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::DoubleRelease {
                category,
                pool_index,
            } => {
                write!(
                    f,
                    "Instance released twice to {category} pool {pool_index}; release ignored"
                )
            }
            Self::UnknownPool {
                category,
                index,
                pool_count,
            } => {
                write!(
                    f,
                    "{category} pool index {index} is out of bounds (pools: {pool_count})"
                )
            }
            Self::StaleRecord { id, registered } => {
                write!(
                    f,
                    "Placement record {id} does not match the registry ({registered} enemies registered)"
                )
            }
            Self::PoolsNotReady => {
                write!(f, "Pools must be set up before generating a level")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export layout to '{}': {source}",
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

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl LevelError {
    /// Whether the error is a reported, non-fatal double release
    pub const fn is_double_release(&self) -> bool {
        matches!(self, Self::DoubleRelease { .. })
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, LevelError>;

impl From<std::io::Error> for LevelError {
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
) -> LevelError {
    LevelError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
