//! Relay Client Library
//!
//! Asynchronous batching client for a relay ingestion endpoint. Records are
//! JSON objects; the client accumulates them into batches under byte,
//! count, and time thresholds and delivers each batch with one
//! bearer-authenticated HTTP POST, reporting the outcome to optional
//! per-record handlers.
//!
//! # Architecture
//!
//! - Producers enqueue records through the [`Client`] facade; each record
//!   is serialized on the calling task and travels as an immutable byte
//!   snapshot.
//! - A single worker task owns the pending batch, drains the bounded
//!   channel, and flushes when a threshold trips.
//! - [`Client::close`] pushes a shutdown sentinel through the same channel,
//!   guaranteeing every previously enqueued record is flushed first.
//!
//! # Quick Start
//!
//! ```no_run
//! use relay_client::{Action, Client, ClientConfig, MessageBuilder};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), relay_client::ClientError> {
//! let client = Client::new(
//!     ClientConfig::new("https://ingest.example.com/push", 1234, "token", "events")
//!         .with_table_name("people")
//!         .with_key_names(["id"]),
//! );
//!
//! let record = MessageBuilder::new()
//!     .action(Action::Upsert)
//!     .sequence_now()
//!     .data(json!({"id": 1, "name": "Nina Simone"}))
//!     .build()?;
//!
//! // Queued path: batched, delivered in the background
//! client.put(&record, None).await?;
//!
//! // Synchronous path: immediate delivery, skips the queue
//! let response = client.push(record).await?;
//! assert!(response.is_ok());
//!
//! // Flush everything and stop the worker
//! client.close().await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod codec;
mod config;
mod envelope;
mod error;
mod handler;
mod metrics;
mod record;
mod response;
mod transport;
mod worker;

#[cfg(test)]
pub(crate) mod test_utils;

pub use client::Client;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use handler::ResponseHandler;
pub use metrics::{ClientMetrics, MetricsSnapshot};
pub use record::{Action, MessageBuilder, Record, fields};
pub use response::DeliveryResponse;
pub use transport::{HttpTransport, Transport, TransportError};
