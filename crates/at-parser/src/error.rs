//! Error types for the AT parser.

use thiserror::Error;

/// Errors surfaced by parser construction and handler registration.
///
/// Malformed protocol input is deliberately not represented here: noisy or
/// partially corrupted transports are expected, so unparseable lines are
/// dropped and streaming continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParserError {
    /// The requested line buffer cannot hold even the shortest command line.
    #[error("buffer capacity {requested} is below the minimum of {minimum} bytes")]
    BufferTooSmall {
        /// Smallest accepted capacity.
        minimum: usize,
        /// Capacity the caller asked for.
        requested: usize,
    },

    /// Handlers must be registered under a non-empty command name.
    #[error("command name must not be empty")]
    EmptyCommandName,
}

/// Result type alias for parser operations.
pub type ParserResult<T> = Result<T, ParserError>;
