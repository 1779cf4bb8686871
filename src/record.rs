//! Record construction
//!
//! A [`Record`] is the unit callers submit for delivery: a JSON object
//! mapping field names to values. [`MessageBuilder`] assembles well-formed
//! records with the fields the ingestion endpoint understands; callers can
//! also build the map by hand.

use serde_json::{Map, Value};

use crate::error::{ClientError, Result};

/// A structured key-value payload submitted for delivery
pub type Record = Map<String, Value>;

/// Field names recognized by the ingestion endpoint
pub mod fields {
    /// Numeric client identifier, injected by the client on every record
    pub const CLIENT_ID: &str = "client_id";

    /// Destination namespace, injected by the client on every record
    pub const NAMESPACE: &str = "namespace";

    /// What the endpoint should do with the record
    pub const ACTION: &str = "action";

    /// Destination table; injected from config when the record has none
    pub const TABLE_NAME: &str = "table_name";

    /// Primary key field names; injected from config when the record has none
    pub const KEY_NAMES: &str = "key_names";

    /// Monotonic ordering hint for records sharing a key
    pub const SEQUENCE: &str = "sequence";

    /// The caller's data payload
    pub const DATA: &str = "data";
}

/// Action the endpoint should perform with a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Insert the record, or update it if its key already exists
    Upsert,

    /// Atomically switch the destination table to a new view
    SwitchView,
}

impl Action {
    /// Wire name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Upsert => "upsert",
            Action::SwitchView => "switch_view",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder for ingestion records
///
/// # Required Fields
///
/// - `action` - what the endpoint should do with the record
/// - `data` - the payload object
///
/// # Optional Fields
///
/// - `sequence` - ordering hint, use [`sequence_now`](Self::sequence_now)
///   for wall-clock millis
/// - `table_name` / `key_names` - per-record overrides of the client config
///
/// # Example
///
/// ```
/// use relay_client::{Action, MessageBuilder};
/// use serde_json::json;
///
/// let record = MessageBuilder::new()
///     .action(Action::Upsert)
///     .sequence(1)
///     .data(json!({"id": 1, "name": "Jerry Garcia"}))
///     .build()
///     .unwrap();
///
/// assert_eq!(record["action"], "upsert");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageBuilder {
    action: Option<Action>,
    sequence: Option<i64>,
    table_name: Option<String>,
    key_names: Option<Vec<String>>,
    data: Option<Value>,
}

impl MessageBuilder {
    /// Create a new builder with no fields set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the action (required)
    #[inline]
    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Set the sequence number
    #[inline]
    #[must_use]
    pub fn sequence(mut self, sequence: i64) -> Self {
        self.sequence = Some(sequence);
        self
    }

    /// Set the sequence number to the current wall clock in milliseconds
    #[must_use]
    pub fn sequence_now(self) -> Self {
        let millis = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(0);
        self.sequence(millis)
    }

    /// Override the destination table for this record
    #[inline]
    #[must_use]
    pub fn table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }

    /// Override the key field names for this record
    #[must_use]
    pub fn key_names<I, S>(mut self, key_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key_names = Some(key_names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the data payload (required)
    #[inline]
    #[must_use]
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Build the record
    ///
    /// # Errors
    ///
    /// Returns error if `action` or `data` is not set.
    pub fn build(self) -> Result<Record> {
        let action = self.action.ok_or(ClientError::MissingField(fields::ACTION))?;
        let data = self.data.ok_or(ClientError::MissingField(fields::DATA))?;

        let mut record = Record::new();
        record.insert(fields::ACTION.into(), Value::String(action.as_str().into()));
        if let Some(sequence) = self.sequence {
            record.insert(fields::SEQUENCE.into(), Value::from(sequence));
        }
        if let Some(table_name) = self.table_name {
            record.insert(fields::TABLE_NAME.into(), Value::String(table_name));
        }
        if let Some(key_names) = self.key_names {
            record.insert(fields::KEY_NAMES.into(), Value::from(key_names));
        }
        record.insert(fields::DATA.into(), data);

        Ok(record)
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;
