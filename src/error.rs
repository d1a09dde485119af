//! Error types for tanyadb.

use thiserror::Error;

/// The main error type for tanyadb operations.
///
/// Every variant is caught at the console-loop boundary and printed; none of
/// them terminates the process.
#[derive(Debug, Error)]
pub enum TanyaError {
    /// Prediction-service request or poll failure (network, HTTP status,
    /// malformed response).
    #[error("API error: {0}")]
    Api(String),

    /// The polling budget ran out before the prediction reached a terminal
    /// status.
    #[error("Prediction still running after {attempts} polls ({elapsed_ms} ms); giving up")]
    PollBudget { attempts: u32, elapsed_ms: u128 },

    /// The generated statement does not start with a recognized SQL verb.
    #[error("Query tidak dikenali atau tidak didukung.")]
    Unsupported,

    /// Query execution error.
    #[error("Database error: {0}")]
    Query(String),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tanyadb operations.
pub type TanyaResult<T> = Result<T, TanyaError>;
