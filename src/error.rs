//! Error types for the client
//!
//! Enqueue-time failures (serialization, closed client) surface synchronously
//! to the caller. Delivery failures are reported once per affected record via
//! the error callback and are never retried.

use thiserror::Error;

use crate::response::DeliveryResponse;
use crate::transport::TransportError;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when enqueueing or delivering records
#[derive(Debug, Error)]
pub enum ClientError {
    /// Record could not be serialized at enqueue time
    #[error("failed to serialize record: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The client has been closed; no further records are accepted
    #[error("client is closed")]
    Closed,

    /// The delivery call itself failed (connection, timeout, malformed response)
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The endpoint answered with a non-accept status
    #[error("delivery rejected: HTTP {} {}", .response.status, .response.reason)]
    Rejected {
        /// The full response, kept for diagnostics
        response: DeliveryResponse,
    },

    /// A required message field was missing when building a record
    #[error("{0} is required")]
    MissingField(&'static str),
}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
