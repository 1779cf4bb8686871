//! Delivery transport
//!
//! The [`Transport`] trait is the seam between the flush path and the wire:
//! one call posts a serialized batch and returns the endpoint's status and
//! body. [`HttpTransport`] is the production implementation; tests swap in
//! an in-memory transport.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::codec::CONTENT_TYPE;
use crate::config::ClientConfig;
use crate::response::DeliveryResponse;

/// Errors raised by the transport layer
///
/// These cover the call itself, not rejections: a response with a non-accept
/// status is returned as a normal [`DeliveryResponse`] and mapped to
/// [`ClientError::Rejected`](crate::ClientError::Rejected) by the caller.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP request could not be completed
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body could not be read
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// One-shot batch delivery
///
/// Implementations perform a single POST of the batch payload and report
/// the status line plus structured body. No retries happen at this layer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Deliver one serialized batch, returning the endpoint's response
    async fn deliver(&self, body: Vec<u8>) -> Result<DeliveryResponse, TransportError>;
}

/// HTTP transport posting to the configured ingestion endpoint
///
/// Bearer-token authenticated. The underlying connection pool is reused
/// across flushes.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl HttpTransport {
    /// Build a transport from the client configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: config.endpoint.clone(),
            token: config.token.clone(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn deliver(&self, body: Vec<u8>) -> Result<DeliveryResponse, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();

        let text = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        // Endpoints answer JSON; keep the raw text if a proxy sent something else
        let content =
            serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text));

        Ok(DeliveryResponse::new(status.as_u16(), reason, content))
    }
}
