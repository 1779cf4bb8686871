//! Record and batch wire encoding
//!
//! Records are serialized to JSON bytes at enqueue time so the queued unit
//! is an immutable snapshot; the flush path decodes them back only to hand
//! the original content to response handlers and to assemble the batch
//! payload. The batch wire format is one JSON array of records.

use bytes::Bytes;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::record::{Record, fields};

/// Content type sent with every delivery call
pub const CONTENT_TYPE: &str = "application/json";

/// Serialize a single record into its queued byte snapshot
pub fn encode_record(record: &Record) -> Result<Bytes> {
    let buf = serde_json::to_vec(record)?;
    Ok(Bytes::from(buf))
}

/// Decode a queued byte snapshot back into a record
///
/// The bytes were produced by [`encode_record`], so failure here means the
/// payload was corrupted in memory; decoding is infallible in practice.
pub fn decode_record(payload: &[u8]) -> Result<Record> {
    Ok(serde_json::from_slice(payload)?)
}

/// Serialize a batch of records into one wire payload
pub fn encode_batch(records: &[Record]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(records)?)
}

/// Inject the server-required fields into a record
///
/// Client id and namespace always overwrite whatever the record holds;
/// table name and key names are filled in from config only when the record
/// carries neither a value of its own nor a config default exists.
pub fn inject_required_fields(record: &mut Record, config: &ClientConfig) {
    record.insert(fields::CLIENT_ID.into(), Value::from(config.client_id));
    record.insert(
        fields::NAMESPACE.into(),
        Value::String(config.namespace.clone()),
    );
    if let Some(table_name) = &config.table_name {
        if !record.contains_key(fields::TABLE_NAME) {
            record.insert(
                fields::TABLE_NAME.into(),
                Value::String(table_name.clone()),
            );
        }
    }
    if let Some(key_names) = &config.key_names {
        if !record.contains_key(fields::KEY_NAMES) {
            record.insert(fields::KEY_NAMES.into(), Value::from(key_names.clone()));
        }
    }
}
