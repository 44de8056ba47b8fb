use crate::errors::{Loaded, StencilResult};
use crate::models::Message;

/// Anything that can supply the message corpus.
///
/// The pipeline accepts messages regardless of origin; export parsers and
/// record stores implement this.
pub trait IMessageSource {
    /// Human-readable origin used in logs.
    fn describe(&self) -> String;

    /// Load every message, skipping malformed records.
    fn load(&self) -> StencilResult<Loaded<Message>>;
}
