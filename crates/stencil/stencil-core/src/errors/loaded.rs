//! Load results that carry non-fatal record failures.

use super::StencilError;

/// Records produced by a loader plus the malformed records it skipped.
///
/// Skips are kept rather than dropped so every stage can report how many
/// records it lost and why.
#[derive(Debug)]
pub struct Loaded<T> {
    /// Records that decoded cleanly, in source order.
    pub records: Vec<T>,
    /// `MalformedRecord` errors for records that were skipped.
    pub skipped: Vec<StencilError>,
}

impl<T> Loaded<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            skipped: Vec::new(),
        }
    }

    /// Record a skipped line.
    pub fn skip(&mut self, line: usize, reason: impl Into<String>) {
        self.skipped.push(StencilError::MalformedRecord {
            line,
            reason: reason.into(),
        });
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
