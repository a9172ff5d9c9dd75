//! Error types for kvs-client
//!
//! One error type for every operation. Errors raised by network I/O carry
//! the [`Stage`] they happened in so callers can report which step failed.

use std::fmt;
use std::io;

use thiserror::Error;

use crate::network::ConnectionState;

/// Result type alias using ClientError
pub type Result<T> = std::result::Result<T, ClientError>;

/// The I/O step of an exchange that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Connect,
    Send,
    Receive,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Connect => "connect",
            Stage::Send => "send",
            Stage::Receive => "recv",
        };
        f.write_str(name)
    }
}

/// Unified error type for kvs-client operations
#[derive(Debug, Error)]
pub enum ClientError {
    // -------------------------------------------------------------------------
    // Stage Errors
    // -------------------------------------------------------------------------
    #[error("cannot connect to {endpoint}: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: io::Error,
    },

    #[error("write failed: {source}")]
    Send {
        #[source]
        source: io::Error,
    },

    #[error("short write: {written} of {expected} bytes sent")]
    ShortWrite { written: usize, expected: usize },

    #[error("read failed: {source}")]
    Receive {
        #[source]
        source: io::Error,
    },

    // -------------------------------------------------------------------------
    // Usage Errors
    // -------------------------------------------------------------------------
    #[error("cannot {operation} while connection is {state}")]
    InvalidState {
        operation: &'static str,
        state: ConnectionState,
    },

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// The network step this error belongs to, if any.
    ///
    /// Errors without a stage are detected before any I/O happens.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            ClientError::Connect { .. } => Some(Stage::Connect),
            ClientError::Send { .. } | ClientError::ShortWrite { .. } => Some(Stage::Send),
            ClientError::Receive { .. } => Some(Stage::Receive),
            _ => None,
        }
    }
}
