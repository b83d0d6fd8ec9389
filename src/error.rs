//! Error types for rebar-takeoff

use std::io;
use thiserror::Error;

/// Main error type for takeoff operations.
///
/// Only conditions that make the whole run meaningless are errors. Noisy
/// drawing content (malformed pairs, unrecognized callouts) is absorbed and
/// reported through [`crate::notification::NotificationCollection`] instead.
#[derive(Debug, Error)]
pub enum TakeoffError {
    /// The input source could not be opened or read
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Estimation policy or reader configuration was rejected before reading
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type alias for takeoff operations
pub type Result<T> = std::result::Result<T, TakeoffError>;

impl TakeoffError {
    /// Whether this error came from the input source rather than the caller.
    pub fn is_read_failure(&self) -> bool {
        matches!(self, TakeoffError::Io(_))
    }
}
