//! Background worker - batch accumulation and flush
//!
//! The worker is the sole consumer of the enqueue channel and the only
//! owner of the pending batch, so batch state needs no locking. It flushes
//! when the accumulated bytes, record count, or time since the last flush
//! crosses its threshold; the time check runs after each accumulation, so
//! the interval is a ceiling enforced as records arrive, not a wall-clock
//! timer that fires while the queue is idle.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::codec;
use crate::config::ClientConfig;
use crate::envelope::{Envelope, QueuedRecord};
use crate::error::ClientError;
use crate::metrics::ClientMetrics;
use crate::record::Record;
use crate::response::DeliveryResponse;
use crate::transport::Transport;

pub(crate) struct Worker {
    rx: mpsc::Receiver<Envelope>,
    transport: Arc<dyn Transport>,
    config: Arc<ClientConfig>,
    metrics: Arc<ClientMetrics>,

    /// Pending batch, owned exclusively by this task
    items: Vec<QueuedRecord>,
    num_bytes: usize,
    last_flush: Instant,
}

impl Worker {
    pub(crate) fn new(
        rx: mpsc::Receiver<Envelope>,
        transport: Arc<dyn Transport>,
        config: Arc<ClientConfig>,
        metrics: Arc<ClientMetrics>,
    ) -> Self {
        Self {
            rx,
            transport,
            config,
            metrics,
            items: Vec::new(),
            num_bytes: 0,
            last_flush: Instant::now(),
        }
    }

    /// Run until the shutdown sentinel arrives or all senders drop
    pub(crate) async fn run(mut self) {
        tracing::debug!(
            endpoint = %self.config.endpoint,
            max_batch_bytes = self.config.max_batch_bytes,
            max_batch_records = self.config.max_batch_records,
            flush_interval_ms = self.config.max_flush_interval.as_millis() as u64,
            "worker started"
        );

        loop {
            match self.rx.recv().await {
                Some(Envelope::Record(item)) => {
                    self.num_bytes += item.payload.len();
                    self.items.push(item);
                    if self.should_flush() {
                        self.flush().await;
                    }
                }
                Some(Envelope::Shutdown { done }) => {
                    self.flush().await;
                    let _ = done.send(());
                    break;
                }
                None => {
                    // Forced cancellation: the client was dropped without
                    // close(). Terminate without flushing.
                    if !self.items.is_empty() {
                        tracing::warn!(
                            dropped = self.items.len(),
                            "channel closed with pending records, dropping batch"
                        );
                    }
                    break;
                }
            }
        }

        let snapshot = self.metrics.snapshot();
        tracing::debug!(
            batches_delivered = snapshot.batches_delivered,
            batches_failed = snapshot.batches_failed,
            records_delivered = snapshot.records_delivered,
            records_failed = snapshot.records_failed,
            "worker shutting down"
        );
    }

    fn should_flush(&self) -> bool {
        self.num_bytes >= self.config.max_batch_bytes
            || self.items.len() >= self.config.max_batch_records
            || self.last_flush.elapsed() >= self.config.max_flush_interval
    }

    /// Deliver the pending batch and dispatch per-record callbacks
    ///
    /// An empty batch (possible only on the sentinel path) performs no
    /// delivery call. Any failure is reported through the handlers and the
    /// worker carries on with the next batch.
    async fn flush(&mut self) {
        let items = std::mem::take(&mut self.items);
        self.num_bytes = 0;

        if items.is_empty() {
            self.last_flush = Instant::now();
            return;
        }

        let records: Vec<Record> = items
            .iter()
            .map(|item| {
                codec::decode_record(&item.payload).unwrap_or_else(|e| {
                    // The payload was produced by encode_record, so this
                    // only fires on in-memory corruption.
                    tracing::error!(error = %e, "failed to decode queued record");
                    Record::new()
                })
            })
            .map(|mut record| {
                codec::inject_required_fields(&mut record, &self.config);
                record
            })
            .collect();

        let outcome = self.deliver(&records).await;

        match &outcome {
            Ok(response) => {
                tracing::debug!(
                    records = records.len(),
                    status = response.status,
                    "flushed batch"
                );
            }
            Err(error) => {
                tracing::error!(
                    records = records.len(),
                    error = %error,
                    "batch delivery failed"
                );
                self.metrics.record_batch_failed(records.len() as u64);
            }
        }

        for (item, record) in items.iter().zip(records.iter()) {
            let Some(handler) = &item.handler else {
                continue;
            };
            let dispatched = catch_unwind(AssertUnwindSafe(|| match &outcome {
                Ok(response) => handler.handle_ok(record, response),
                Err(error) => handler.handle_error(record, error),
            }));
            if dispatched.is_err() {
                tracing::warn!("response handler panicked, continuing");
            }
        }

        self.last_flush = Instant::now();
    }

    async fn deliver(&self, records: &[Record]) -> Result<DeliveryResponse, ClientError> {
        let body = codec::encode_batch(records)?;
        let body_len = body.len() as u64;

        match self.transport.deliver(body).await {
            Ok(response) if response.is_ok() => {
                self.metrics
                    .record_batch_delivered(records.len() as u64, body_len);
                Ok(response)
            }
            Ok(response) => Err(ClientError::Rejected { response }),
            Err(e) => Err(ClientError::Transport(e)),
        }
    }
}

#[cfg(test)]
#[path = "worker_test.rs"]
mod worker_test;
