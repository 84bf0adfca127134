//! Error types for the task registry client.

use std::path::PathBuf;

/// Top-level error type for registry reads, command building and configuration.
///
/// Mutation failures reported by the utility are not errors; they come back as
/// [`MutationOutcome`](crate::registry::MutationOutcome) values.
#[derive(Debug, thiserror::Error)]
pub enum SchtasksError {
    /// Output bytes are not valid under the configured codepage.
    #[error("output is not valid {encoding}")]
    Decode {
        /// Name of the encoding used for decoding.
        encoding: &'static str,
    },

    /// A data row does not match the task record schema.
    #[error("malformed task row: expected {expected} fields, found {found}")]
    Parse {
        /// Number of fields the schema requires.
        expected: usize,
        /// Number of fields (or rows, in strict mode) actually seen.
        found: usize,
    },

    /// The CSV reader reported a failure.
    ///
    /// Flexible parsing of decoded text closes unterminated quotes at end of
    /// input, so this is not expected in practice.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A read operation exited unsuccessfully.
    #[error("{operation} failed (exit code: {status_code:?}): {stderr}")]
    RegistryQuery {
        /// Operation that failed (`list` or `query`).
        operation: &'static str,
        /// Exit code, if the process reported one.
        status_code: Option<i32>,
        /// Captured standard error, lossily decoded.
        stderr: String,
    },

    /// An input failed validation before any process was spawned.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The task-scheduling utility could not be started.
    #[error("failed to spawn {}: {source}", program.display())]
    Spawn {
        /// Program that was being started.
        program: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, SchtasksError>;
