//! Attach canonical text and skeletons to messages.

use stencil_core::models::{Message, NormalizedMessage};
use stencil_core::traits::ISkeletonizer;
use tracing::{debug, info};

use crate::normalizer::normalize;

/// Normalize one message and derive its skeleton.
pub fn annotate(message: Message, skeletonizer: &dyn ISkeletonizer) -> NormalizedMessage {
    let text_norm = normalize(&message.text_raw);
    let text_skeleton = skeletonizer.skeletonize(&text_norm);
    NormalizedMessage::new(message, text_norm, text_skeleton)
}

/// Annotate a corpus, preserving input order.
pub fn annotate_all(
    messages: Vec<Message>,
    skeletonizer: &dyn ISkeletonizer,
) -> Vec<NormalizedMessage> {
    let total = messages.len();
    let annotated: Vec<NormalizedMessage> = messages
        .into_iter()
        .map(|m| annotate(m, skeletonizer))
        .collect();

    let empty = annotated.iter().filter(|m| m.text_skeleton.is_empty()).count();
    if empty > 0 {
        debug!(empty, "messages with empty skeletons");
    }
    info!(messages = total, "messages normalized");
    annotated
}
