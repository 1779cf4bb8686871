//! The queued unit passed from producers to the worker

use bytes::Bytes;
use tokio::sync::oneshot;

use crate::handler::ResponseHandler;

/// One item on the enqueue channel
///
/// Shutdown travels through the same channel as data so the worker observes
/// it strictly after every record enqueued before it; the variant carries
/// the latch [`Client::close`](crate::Client::close) waits on.
pub enum Envelope {
    /// A record snapshot awaiting batching
    Record(QueuedRecord),

    /// Graceful-shutdown sentinel, always the last item processed
    Shutdown {
        /// Signalled once the final flush has completed
        done: oneshot::Sender<()>,
    },
}

/// A record serialized at enqueue time
///
/// The byte snapshot is taken before the record enters the queue, so the
/// caller cannot mutate it after handoff and the worker never touches the
/// caller's map.
pub struct QueuedRecord {
    /// JSON-serialized record
    pub payload: Bytes,

    /// Optional completion callback
    pub handler: Option<Box<dyn ResponseHandler>>,
}
