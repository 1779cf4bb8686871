//! Shared test helpers: in-memory transport and recording handlers

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Semaphore;

use crate::error::ClientError;
use crate::handler::ResponseHandler;
use crate::record::Record;
use crate::response::DeliveryResponse;
use crate::transport::{Transport, TransportError};

/// What the next delivery call should report
#[derive(Debug, Clone, Copy)]
pub(crate) enum MockOutcome {
    /// 200 with a small JSON body
    Accept,
    /// The given non-accept status
    Reject(u16),
    /// A transport-level failure
    Fail,
}

/// Transport that records every delivered body instead of sending it
///
/// Optionally gated: each delivery then waits for a permit, which lets a
/// test hold the worker inside a flush while it fills the queue.
pub(crate) struct MockTransport {
    bodies: Mutex<Vec<Value>>,
    outcome: Mutex<MockOutcome>,
    /// Permit added each time a delivery call starts
    pub(crate) started: Semaphore,
    gate: Option<Semaphore>,
}

impl MockTransport {
    pub(crate) fn accepting() -> Arc<Self> {
        Arc::new(Self {
            bodies: Mutex::new(Vec::new()),
            outcome: Mutex::new(MockOutcome::Accept),
            started: Semaphore::new(0),
            gate: None,
        })
    }

    /// Deliveries block until [`release`](Self::release) adds permits
    pub(crate) fn gated() -> Arc<Self> {
        Arc::new(Self {
            bodies: Mutex::new(Vec::new()),
            outcome: Mutex::new(MockOutcome::Accept),
            started: Semaphore::new(0),
            gate: Some(Semaphore::new(0)),
        })
    }

    pub(crate) fn set_outcome(&self, outcome: MockOutcome) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub(crate) fn release(&self, permits: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(permits);
        }
    }

    /// Delivered bodies, each parsed as JSON
    pub(crate) fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    /// All delivered records across batches, in delivery order
    pub(crate) fn flattened_records(&self) -> Vec<Value> {
        self.bodies()
            .iter()
            .flat_map(|body| body.as_array().cloned().unwrap_or_default())
            .collect()
    }

    /// Wait until `count` deliveries have been recorded
    pub(crate) async fn wait_for_deliveries(&self, count: usize) {
        for _ in 0..200 {
            if self.bodies.lock().unwrap().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "timed out waiting for {count} deliveries, saw {}",
            self.bodies.lock().unwrap().len()
        );
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn deliver(&self, body: Vec<u8>) -> Result<DeliveryResponse, TransportError> {
        self.started.add_permits(1);
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }

        let parsed: Value = serde_json::from_slice(&body).expect("body should be JSON");
        let outcome = *self.outcome.lock().unwrap();

        match outcome {
            MockOutcome::Fail => Err(TransportError::Body("simulated transport failure".into())),
            MockOutcome::Reject(status) => {
                self.bodies.lock().unwrap().push(parsed);
                Ok(DeliveryResponse::new(
                    status,
                    "Bad Request",
                    json!({"error": "rejected"}),
                ))
            }
            MockOutcome::Accept => {
                self.bodies.lock().unwrap().push(parsed);
                Ok(DeliveryResponse::new(200, "OK", json!({"status": "ok"})))
            }
        }
    }
}

/// Handler that counts its callbacks
#[derive(Default)]
pub(crate) struct RecordingHandler {
    pub(crate) ok_count: Arc<AtomicUsize>,
    pub(crate) err_count: Arc<AtomicUsize>,
    pub(crate) last_error: Arc<Mutex<Option<String>>>,
}

impl RecordingHandler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A boxed handle sharing this handler's counters
    pub(crate) fn boxed(&self) -> Box<dyn ResponseHandler> {
        Box::new(RecordingHandler {
            ok_count: Arc::clone(&self.ok_count),
            err_count: Arc::clone(&self.err_count),
            last_error: Arc::clone(&self.last_error),
        })
    }

    pub(crate) fn ok(&self) -> usize {
        self.ok_count.load(Ordering::SeqCst)
    }

    pub(crate) fn err(&self) -> usize {
        self.err_count.load(Ordering::SeqCst)
    }
}

impl ResponseHandler for RecordingHandler {
    fn handle_ok(&self, _record: &Record, _response: &DeliveryResponse) {
        self.ok_count.fetch_add(1, Ordering::SeqCst);
    }

    fn handle_error(&self, _record: &Record, error: &ClientError) {
        self.err_count.fetch_add(1, Ordering::SeqCst);
        *self.last_error.lock().unwrap() = Some(error.to_string());
    }
}

/// Handler that panics on success, for worker isolation tests
pub(crate) struct PanickingHandler;

impl ResponseHandler for PanickingHandler {
    fn handle_ok(&self, _record: &Record, _response: &DeliveryResponse) {
        panic!("handler exploded");
    }

    fn handle_error(&self, _record: &Record, _error: &ClientError) {
        panic!("handler exploded");
    }
}
