//! Error types for branchbound

use thiserror::Error;

/// Main error type for branchbound operations
#[derive(Debug, Error)]
pub enum SolverError {
    /// Error in solver configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error in domain model definition
    #[error("Domain model error: {0}")]
    DomainModel(String),

    /// Incremental score diverged from an independent recalculation
    #[error("Score corruption: {0}")]
    ScoreCorruption(String),

    /// Invalid operation for current solver state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Internal error (should not occur in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for branchbound operations
pub type Result<T> = std::result::Result<T, SolverError>;
