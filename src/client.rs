//! Client facade
//!
//! Producers hand records to the facade; a single background worker drains
//! them, batches them, and delivers each batch with one HTTP POST. The
//! bounded channel between the two is the only shared state. `push` is the
//! second delivery path: it skips the queue entirely and delivers on the
//! calling task, so pushed records can interleave with queued ones.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};

use crate::codec;
use crate::config::ClientConfig;
use crate::envelope::{Envelope, QueuedRecord};
use crate::error::{ClientError, Result};
use crate::handler::ResponseHandler;
use crate::metrics::{ClientMetrics, MetricsSnapshot};
use crate::record::Record;
use crate::response::DeliveryResponse;
use crate::transport::{HttpTransport, Transport};
use crate::worker::Worker;

/// Batching client for the ingestion endpoint
///
/// Created with [`Client::new`] inside a Tokio runtime; the worker task is
/// spawned immediately. Records enqueued with [`put`](Self::put) /
/// [`offer`](Self::offer) are flushed in FIFO order; records sent with
/// [`push`](Self::push) bypass the queue and may be delivered out of order
/// relative to queued ones.
///
/// Call [`close`](Self::close) before dropping the client: it flushes
/// everything enqueued so far and waits for the worker to finish. Dropping
/// without closing terminates the worker without a final flush.
pub struct Client {
    tx: mpsc::Sender<Envelope>,
    transport: Arc<dyn Transport>,
    config: Arc<ClientConfig>,
    metrics: Arc<ClientMetrics>,
    closed: AtomicBool,
}

impl Client {
    /// Create a client and spawn its worker task
    ///
    /// Must be called within a Tokio runtime.
    pub fn new(config: ClientConfig) -> Self {
        let transport = Arc::new(HttpTransport::new(&config));
        Self::with_transport(config, transport)
    }

    /// Create a client with a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let config = Arc::new(config);
        let metrics = Arc::new(ClientMetrics::new());
        let (tx, rx) = mpsc::channel(config.queue_capacity);

        let worker = Worker::new(
            rx,
            Arc::clone(&transport),
            Arc::clone(&config),
            Arc::clone(&metrics),
        );
        tokio::spawn(worker.run());

        Self {
            tx,
            transport,
            config,
            metrics,
            closed: AtomicBool::new(false),
        }
    }

    /// Deliver a single record immediately, bypassing the queue
    ///
    /// Blocks the calling task for the full round trip and returns the
    /// endpoint's response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] if the endpoint answers with a
    /// non-accept status, or [`ClientError::Transport`] if the call fails.
    pub async fn push(&self, record: Record) -> Result<DeliveryResponse> {
        self.push_all(vec![record]).await
    }

    /// Deliver a batch of records immediately, bypassing the queue
    pub async fn push_all(&self, records: Vec<Record>) -> Result<DeliveryResponse> {
        let records: Vec<Record> = records
            .into_iter()
            .map(|mut record| {
                codec::inject_required_fields(&mut record, &self.config);
                record
            })
            .collect();

        let body = codec::encode_batch(&records)?;
        match self.transport.deliver(body).await? {
            response if response.is_ok() => Ok(response),
            response => Err(ClientError::Rejected { response }),
        }
    }

    /// Enqueue a record without blocking
    ///
    /// Returns `Ok(false)` if the queue is full; the record is not
    /// enqueued and the caller must handle the back-pressure itself.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Serialization`] if the record cannot be
    /// serialized, or [`ClientError::Closed`] after [`close`](Self::close).
    pub fn offer(
        &self,
        record: &Record,
        handler: Option<Box<dyn ResponseHandler>>,
    ) -> Result<bool> {
        let envelope = self.wrap(record, handler)?;
        match self.tx.try_send(envelope) {
            Ok(()) => {
                self.metrics.record_enqueued();
                Ok(true)
            }
            Err(mpsc::error::TrySendError::Full(_)) => Ok(false),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(ClientError::Closed),
        }
    }

    /// Enqueue a record, waiting up to `timeout` for queue space
    ///
    /// Returns `Ok(false)` if the timeout elapses before space frees.
    pub async fn offer_timeout(
        &self,
        record: &Record,
        handler: Option<Box<dyn ResponseHandler>>,
        timeout: Duration,
    ) -> Result<bool> {
        let envelope = self.wrap(record, handler)?;
        match self.tx.send_timeout(envelope, timeout).await {
            Ok(()) => {
                self.metrics.record_enqueued();
                Ok(true)
            }
            Err(mpsc::error::SendTimeoutError::Timeout(_)) => Ok(false),
            Err(mpsc::error::SendTimeoutError::Closed(_)) => Err(ClientError::Closed),
        }
    }

    /// Enqueue a record, suspending until queue space frees
    pub async fn put(
        &self,
        record: &Record,
        handler: Option<Box<dyn ResponseHandler>>,
    ) -> Result<()> {
        let envelope = self.wrap(record, handler)?;
        self.tx
            .send(envelope)
            .await
            .map_err(|_| ClientError::Closed)?;
        self.metrics.record_enqueued();
        Ok(())
    }

    /// Flush everything enqueued so far and stop the worker
    ///
    /// Enqueues the shutdown sentinel behind all pending records (this send
    /// blocks under queue pressure) and waits until the worker has flushed
    /// and terminated. Idempotent: later calls return `Ok(())` without
    /// doing anything. After the first call, enqueue operations fail with
    /// [`ClientError::Closed`].
    ///
    /// There is no timeout; wrap in [`tokio::time::timeout`] to bound it.
    pub async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let (done, done_rx) = oneshot::channel();
        self.tx
            .send(Envelope::Shutdown { done })
            .await
            .map_err(|_| ClientError::Closed)?;

        // Errors only if the worker died before signalling
        done_rx.await.map_err(|_| ClientError::Closed)
    }

    /// Get a snapshot of the client metrics
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Serialize a record into its queued envelope
    ///
    /// Runs on the calling task so serialization failures surface to the
    /// caller, never to the worker.
    fn wrap(
        &self,
        record: &Record,
        handler: Option<Box<dyn ResponseHandler>>,
    ) -> Result<Envelope> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ClientError::Closed);
        }
        let payload = codec::encode_record(record)?;
        Ok(Envelope::Record(QueuedRecord { payload, handler }))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;
