//! Error types for the slacktime reporting engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while building a report.

use thiserror::Error;

/// The main error type for the reporting engine.
///
/// Fatal kinds (validation, authentication, rendering) abort the whole batch
/// and surface as a single error response. Per-mailbox failures are caught by
/// the orchestrator and recorded in that mailbox's report row instead; ledger
/// and holiday failures degrade to empty data and only warn.
///
/// # Example
///
/// ```
/// use slacktime::error::EngineError;
///
/// let error = EngineError::Validation {
///     message: "las fechas proporcionadas no son válidas".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Validation error: las fechas proporcionadas no son válidas"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The request payload failed validation before any processing started.
    #[error("Validation error: {message}")]
    Validation {
        /// A description of what was missing or malformed.
        message: String,
    },

    /// A required environment variable was missing or unusable.
    #[error("Configuration error: {message}")]
    Config {
        /// A description of the configuration problem.
        message: String,
    },

    /// Token acquisition against the identity provider failed.
    #[error("Authentication failed: {message}")]
    Auth {
        /// A description of the token failure.
        message: String,
    },

    /// An outbound call to a remote service failed.
    #[error("Request to {service} failed: {message}")]
    Upstream {
        /// The remote service that was called.
        service: String,
        /// A description of the transport or protocol failure.
        message: String,
    },

    /// A calendar event carried a timestamp that could not be parsed.
    #[error("Invalid event timestamp '{value}'")]
    EventTime {
        /// The raw timestamp value as received.
        value: String,
    },

    /// The benefits ledger workbook could not be opened or read.
    #[error("Benefits ledger error: {message}")]
    Ledger {
        /// A description of the ledger problem.
        message: String,
    },

    /// The holiday calendar could not produce dates for a year.
    #[error("Holiday calendar error for year {year}: {message}")]
    Holidays {
        /// The year that was requested.
        year: i32,
        /// A description of the lookup failure.
        message: String,
    },

    /// Writing the report artifact failed.
    #[error("Report output error: {message}")]
    Render {
        /// A description of the write failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
