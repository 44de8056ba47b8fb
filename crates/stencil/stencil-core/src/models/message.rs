use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::constants::EVENT_ID_HEX_LEN;

/// An input message as produced by ingest. Never mutated downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique id within one corpus (`msg_000001`).
    pub id: String,
    pub sender: String,
    pub received_at: NaiveDateTime,
    /// The message body exactly as received.
    pub text_raw: String,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        sender: impl Into<String>,
        received_at: NaiveDateTime,
        text_raw: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            sender: sender.into(),
            received_at,
            text_raw: text_raw.into(),
        }
    }

    /// Deterministic idempotency key: the first 16 hex characters of the
    /// BLAKE3 digest of `text_raw|sender|received_at`.
    ///
    /// Two deliveries of the same SMS share an event id even when the
    /// export assigns them different ids.
    pub fn event_id(&self) -> String {
        let input = format!(
            "{}|{}|{}",
            self.text_raw,
            self.sender,
            self.received_at.format("%Y-%m-%dT%H:%M:%S")
        );
        let hash = blake3::hash(input.as_bytes());
        hash.to_hex()[..EVENT_ID_HEX_LEN].to_string()
    }
}
