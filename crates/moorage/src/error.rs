//! Error types for moorage.
//!
//! This module defines all error types used throughout the moorage crate,
//! providing detailed context for debugging and user-friendly messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::registry::codec::DecodeError;

/// The main error type for moorage operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Registry Errors ===
    /// Failed to open the boat data file.
    #[error("failed to open {path}: {source}")]
    FileOpen {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A record line could not be decoded.
    #[error("malformed boat record: {0}")]
    Decode(#[from] DecodeError),

    /// The registry is already holding as many boats as it can.
    #[error("marina is full ({capacity} boats)")]
    CapacityExceeded {
        /// The configured registry capacity.
        capacity: usize,
    },

    /// No boat matched the requested name.
    #[error("no boat named '{name}'")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// A payment was larger than the outstanding balance.
    #[error("payment of ${amount:.2} exceeds the amount owed, ${owed:.2}")]
    OverpaymentRejected {
        /// The rejected payment amount.
        amount: f64,
        /// The balance at the time of the payment.
        owed: f64,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for moorage operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a file-open error for the given path.
    #[must_use]
    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a not-found error for the given boat name.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Check if this error means a lookup found no boat.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is a rejected overpayment.
    #[must_use]
    pub fn is_overpayment(&self) -> bool {
        matches!(self, Self::OverpaymentRejected { .. })
    }
}
