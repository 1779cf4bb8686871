//! Response type returned by the ingestion endpoint

use serde_json::Value;

/// Response from one delivery call
///
/// Wraps the HTTP status line and the structured body the endpoint echoes
/// back. A response with any 2xx status is considered accepted; everything
/// else is a rejection.
#[derive(Debug, Clone)]
pub struct DeliveryResponse {
    /// HTTP status code
    pub status: u16,

    /// HTTP reason phrase (empty if the server sent none)
    pub reason: String,

    /// Response body, parsed as JSON where possible
    pub content: Value,
}

impl DeliveryResponse {
    /// Create a response from its parts
    pub fn new(status: u16, reason: impl Into<String>, content: Value) -> Self {
        Self {
            status,
            reason: reason.into(),
            content,
        }
    }

    /// Whether the endpoint accepted the batch (2xx status)
    #[inline]
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl std::fmt::Display for DeliveryResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {} {}: {}", self.status, self.reason, self.content)
    }
}
