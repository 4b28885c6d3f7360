//! Error handling for grblwire
//!
//! Provides error types for each layer of the engine:
//! - Protocol errors (acknowledgement timeouts, rejected commands)
//! - Connection errors (transport)
//! - Configuration errors
//!
//! None of these are fatal to the engine; a failed operation leaves it ready
//! for the caller's next cycle. All error types use `thiserror`.

use thiserror::Error;

/// Protocol error type
///
/// Represents failures of the command/acknowledgement exchange.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProtocolError {
    /// No acknowledgement arrived before the deadline
    #[error("Acknowledgement timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// Controller answered with `error:n`
    #[error("Command rejected: error:{code} - {description}")]
    CommandRejected {
        /// The numeric error code.
        code: u8,
        /// Human-readable description of the code.
        description: String,
    },
}

/// Connection error type
///
/// Represents errors from the byte transport underneath the engine.
#[derive(Error, Debug, Clone)]
pub enum ConnectionError {
    /// Transport is not open
    #[error("Transport not connected")]
    NotConnected,

    /// Failed to open port
    #[error("Failed to open port {port}: {reason}")]
    FailedToOpen {
        /// The name of the port that failed to open.
        port: String,
        /// The reason the port failed to open.
        reason: String,
    },

    /// Serial port error
    #[error("Serial port error: {reason}")]
    SerialError {
        /// The reason for the serial port error.
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {reason}")]
    IoError {
        /// The reason for the I/O error.
        reason: String,
    },
}

/// Configuration error type
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    /// A configuration value is out of range
    #[error("Invalid setting '{key}': {reason}")]
    Invalid {
        /// The offending key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configuration file could not be read or written
    #[error("Config file error: {0}")]
    File(String),

    /// The configuration file could not be parsed or serialized
    #[error("Config format error: {0}")]
    Format(String),
}

/// Main error type for grblwire
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Protocol error
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Connection error
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is an acknowledgement timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Protocol(ProtocolError::Timeout { .. }))
    }

    /// Check if the controller rejected the command
    pub fn is_rejected(&self) -> bool {
        matches!(self, Error::Protocol(ProtocolError::CommandRejected { .. }))
    }

    /// Check if this is a connection error
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Error::Connection(_) | Error::Io(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
