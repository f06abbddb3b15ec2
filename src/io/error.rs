//! Error types and context management for packing operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all packing operations
#[derive(Debug)]
pub enum PackingError {
    /// Puzzle text could not be turned into shapes and regions
    Parse {
        /// 1-based line number of the offending line
        line: usize,
        /// Description of what's wrong with the line
        reason: String,
    },

    /// A region requires instances of a shape the catalog does not know
    UnknownShape {
        /// Shape id referenced by the region's counts
        shape_id: usize,
        /// Index of the region in its puzzle
        region: usize,
    },

    /// The search node budget ran out before a verdict was reached
    ///
    /// The region is neither proven feasible nor proven infeasible.
    SearchBudgetExhausted {
        /// Index of the region in its puzzle
        region: usize,
        /// Number of search nodes visited before stopping
        nodes: u64,
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

impl fmt::Display for PackingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { line, reason } => {
                write!(f, "Invalid puzzle input at line {line}: {reason}")
            }
            Self::UnknownShape { shape_id, region } => {
                write!(f, "Region {region} requires unknown shape {shape_id}")
            }
            Self::SearchBudgetExhausted { region, nodes } => {
                write!(
                    f,
                    "Search budget exhausted for region {region} after {nodes} nodes (feasibility unknown)"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
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

impl std::error::Error for PackingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for packing results
pub type Result<T> = std::result::Result<T, PackingError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Index of the region being evaluated
    pub region: Option<usize>,
    /// File the failing data came from
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with evaluation state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add the path and operation of a file system access
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path context applied
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<PackingError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                PackingError::UnknownShape { region, .. }
                | PackingError::SearchBudgetExhausted { region, .. } => {
                    if let Some(index) = context.region {
                        *region = index;
                    }
                }
                PackingError::FileSystem {
                    path, operation, ..
                } => {
                    if let Some(context_path) = context.path {
                        *path = context_path;
                    }
                    if let Some(context_operation) = context.operation {
                        *operation = context_operation;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.into()),
            operation: Some(operation),
            ..Default::default()
        })
    }
}

impl From<std::io::Error> for PackingError {
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
) -> PackingError {
    PackingError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a parse error for a 1-based line number
pub fn parse_error(line: usize, reason: &impl ToString) -> PackingError {
    PackingError::Parse {
        line,
        reason: reason.to_string(),
    }
}
