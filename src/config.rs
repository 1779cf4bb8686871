//! Client configuration
//!
//! All fields are fixed at construction; the worker task reads them through
//! a shared reference and no field is mutated after [`Client::new`]
//! consumes the config.
//!
//! [`Client::new`]: crate::Client::new

use std::time::Duration;

/// Default queue capacity (records waiting for the worker)
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

/// Default flush threshold in serialized bytes (4 MiB)
pub const DEFAULT_MAX_BATCH_BYTES: usize = 4 * 1024 * 1024;

/// Default flush threshold in records
pub const DEFAULT_MAX_BATCH_RECORDS: usize = 10_000;

/// Default ceiling on time between flushes
pub const DEFAULT_MAX_FLUSH_INTERVAL: Duration = Duration::from_secs(60);

/// Default HTTP connect timeout
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(2 * 60);

/// Configuration for [`Client`](crate::Client)
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use relay_client::ClientConfig;
///
/// let config = ClientConfig::new("https://ingest.example.com/push", 1234, "token", "events")
///     .with_table_name("people")
///     .with_key_names(["id"])
///     .with_max_batch_records(500)
///     .with_max_flush_interval(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Ingestion endpoint URL
    pub endpoint: String,

    /// Numeric client identifier, injected into every record
    pub client_id: i64,

    /// Bearer token for the endpoint
    pub token: String,

    /// Destination namespace, injected into every record
    pub namespace: String,

    /// Destination table, injected into records that carry none
    pub table_name: Option<String>,

    /// Key field names, injected into records that carry none
    pub key_names: Option<Vec<String>>,

    /// Flush once the accumulated serialized size reaches this many bytes
    pub max_batch_bytes: usize,

    /// Flush once this many records have accumulated
    pub max_batch_records: usize,

    /// Flush once this long has passed since the last flush, checked as
    /// records arrive (no flush happens while the queue is idle)
    pub max_flush_interval: Duration,

    /// Capacity of the bounded enqueue channel
    pub queue_capacity: usize,

    /// HTTP connect timeout for delivery calls
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Create a config with the required fields and default thresholds
    pub fn new(
        endpoint: impl Into<String>,
        client_id: i64,
        token: impl Into<String>,
        namespace: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            client_id,
            token: token.into(),
            namespace: namespace.into(),
            table_name: None,
            key_names: None,
            max_batch_bytes: DEFAULT_MAX_BATCH_BYTES,
            max_batch_records: DEFAULT_MAX_BATCH_RECORDS,
            max_flush_interval: DEFAULT_MAX_FLUSH_INTERVAL,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Set the default destination table
    #[must_use]
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// Set the default key field names
    #[must_use]
    pub fn with_key_names<I, S>(mut self, key_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_names = Some(key_names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the byte flush threshold
    #[must_use]
    pub fn with_max_batch_bytes(mut self, max_batch_bytes: usize) -> Self {
        self.max_batch_bytes = max_batch_bytes;
        self
    }

    /// Set the record-count flush threshold
    #[must_use]
    pub fn with_max_batch_records(mut self, max_batch_records: usize) -> Self {
        self.max_batch_records = max_batch_records;
        self
    }

    /// Set the flush interval ceiling
    #[must_use]
    pub fn with_max_flush_interval(mut self, max_flush_interval: Duration) -> Self {
        self.max_flush_interval = max_flush_interval;
        self
    }

    /// Set the enqueue channel capacity
    #[must_use]
    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    /// Set the HTTP connect timeout
    #[must_use]
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}
