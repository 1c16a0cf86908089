//! Domain-specific error types for vecpush.
//!
//! All fallible operations return `Result<T, VecpushError>`.
//! Nothing is retried: an error surfaces to the caller as soon as it occurs.

use std::time::Duration;
use thiserror::Error;

/// The canonical error type for building and sending a payload.
#[derive(Debug, Error)]
pub enum VecpushError {
    // ── Payload Errors ───────────────────────────────────────────
    /// The requested sample count exceeds [`crate::MAX_SAMPLES`].
    #[error("sample count too large: {count} (max {max})")]
    SampleCountTooLarge { count: usize, max: usize },

    /// A buffer whose length is not `1 + 4 * n` for any `n`.
    #[error("invalid payload length: {len} bytes is not 1 + 4n")]
    InvalidLength { len: usize },

    /// More bytes buffered than the largest legal payload.
    #[error("frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: usize, max: usize },

    /// The stream ended before a whole payload was received.
    #[error("truncated payload: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// The decoded tag byte is not the one the receiver expects.
    #[error("unexpected tag: expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedTag { expected: u8, actual: u8 },

    // ── Connection Errors ────────────────────────────────────────
    /// Connecting to the peer failed (refused, unresolvable, unreachable).
    #[error("connection to {addr} failed: {source}")]
    Connection {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The configured connect deadline elapsed.
    #[error("connection to {addr} timed out after {after:?}")]
    ConnectTimeout { addr: String, after: Duration },

    /// Writing or shutting down the stream failed.
    #[error("write error: {0}")]
    Write(#[from] std::io::Error),

    // ── Configuration Errors ─────────────────────────────────────
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl VecpushError {
    /// True for failures that happened before any byte could be written.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            VecpushError::Connection { .. } | VecpushError::ConnectTimeout { .. }
        )
    }
}
