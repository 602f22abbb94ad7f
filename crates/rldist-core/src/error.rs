//! Error types for rldist-core
//!
//! Aggregation itself never fails on empty data. Errors come from:
//! - Trial records whose matrices do not agree on the number of runs
//! - Target lookups that have no value for a function or level
//! - Configuration and reference-archive loading

use thiserror::Error;

/// Main error type for rldist operations
#[derive(Error, Debug)]
pub enum EcdfError {
    /// Malformed trial record
    #[error("Invalid trial record: {0}")]
    Record(#[from] RecordError),

    /// Target lookup failure
    #[error("Target lookup failed: {0}")]
    Target(#[from] TargetError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Reference archive errors
    #[error("Reference data error: {0}")]
    Reference(#[from] ReferenceError),
}

/// Errors raised when building a trial record
#[derive(Error, Debug, PartialEq)]
pub enum RecordError {
    /// Dimension must be positive
    #[error("Function {func_id}: dimension must be positive")]
    ZeroDimension { func_id: u32 },

    /// A record without trials
    #[error("Function {func_id} in {dim}-D has no runs")]
    NoRuns { func_id: u32, dim: u32 },

    /// A run budget that is not a positive number of evaluations
    #[error("Function {func_id} in {dim}-D: run {run} has budget {budget}, expected a positive finite value")]
    InvalidBudget {
        func_id: u32,
        dim: u32,
        run: usize,
        budget: f64,
    },

    /// Matrix width disagrees with the number of runs
    #[error("{matrix} matrix has {actual} columns, expected {expected} (one key column plus one per run)")]
    ColumnMismatch {
        matrix: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A matrix that must hold at least one row
    #[error("{matrix} matrix has no rows")]
    EmptyMatrix { matrix: &'static str },

    /// Rows of unequal length
    #[error("{matrix} rows have unequal lengths")]
    Ragged { matrix: &'static str },
}

/// Errors raised when resolving a target precision
#[derive(Error, Debug, PartialEq)]
pub enum TargetError {
    /// Per-function mapping without an entry
    #[error("No target for function {func_id}")]
    MissingFunction { func_id: u32 },

    /// Provider has fewer levels than requested
    #[error("Target level {index} out of range ({len} levels) for f{func_id} in {dim}-D")]
    LevelOutOfRange {
        index: usize,
        len: usize,
        func_id: u32,
        dim: u32,
    },

    /// Precision targets must be positive and finite
    #[error("Invalid target {value} for f{func_id} in {dim}-D")]
    InvalidValue { value: f64, func_id: u32, dim: u32 },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the file failed
    #[error("Cannot read configuration: {0}")]
    Io(String),

    /// Parsing failed
    #[error("Cannot parse configuration: {0}")]
    Parse(String),

    /// A value outside its valid range
    #[error("Out of range: {0}")]
    OutOfRange(String),
}

/// Errors related to the reference archive
#[derive(Error, Debug)]
pub enum ReferenceError {
    /// Reading the file failed
    #[error("Cannot read reference data: {0}")]
    Io(String),

    /// Parsing failed
    #[error("Cannot parse reference data: {0}")]
    Parse(String),
}

/// Result type alias for rldist operations
pub type EcdfResult<T> = Result<T, EcdfError>;

/// Result type alias for record construction
pub type RecordResult<T> = Result<T, RecordError>;

/// Result type alias for target lookups
pub type TargetResult<T> = Result<T, TargetError>;

/// Result type alias for configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for reference data
pub type ReferenceResult<T> = Result<T, ReferenceError>;
