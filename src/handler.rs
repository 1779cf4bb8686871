//! Per-record delivery callbacks

use crate::error::ClientError;
use crate::record::Record;
use crate::response::DeliveryResponse;

/// Callback invoked with the delivery outcome of a queued record
///
/// Delivery is all-or-nothing per batch, so every record in a flushed batch
/// receives the same outcome, dispatched in enqueue order. Handlers are
/// best-effort observers: a panic inside a handler is caught and logged and
/// never stops the worker.
///
/// Outcomes are reported exactly once; there is no retry.
pub trait ResponseHandler: Send + Sync {
    /// The batch containing `record` was accepted
    fn handle_ok(&self, record: &Record, response: &DeliveryResponse);

    /// The batch containing `record` failed to deliver or was rejected
    fn handle_error(&self, record: &Record, error: &ClientError);
}
