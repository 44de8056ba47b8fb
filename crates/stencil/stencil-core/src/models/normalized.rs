use serde::{Deserialize, Serialize};

use super::Message;

/// A message with its canonical text and skeleton attached.
///
/// Serialized flat, so a normalized record is a plain message record with
/// two extra fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedMessage {
    #[serde(flatten)]
    pub message: Message,
    pub text_norm: String,
    pub text_skeleton: String,
}

impl NormalizedMessage {
    pub fn new(message: Message, text_norm: String, text_skeleton: String) -> Self {
        Self {
            message,
            text_norm,
            text_skeleton,
        }
    }

    pub fn id(&self) -> &str {
        &self.message.id
    }

    pub fn text_raw(&self) -> &str {
        &self.message.text_raw
    }
}
