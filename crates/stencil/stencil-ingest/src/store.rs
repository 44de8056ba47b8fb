//! JSON Lines record store and atomic file writes.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use stencil_core::errors::{Loaded, StencilError, StencilResult};
use stencil_core::models::{Message, NormalizedMessage};
use stencil_core::traits::IMessageSource;
use tracing::{debug, warn};

/// Read one record per line. Blank lines are ignored; lines that fail to
/// decode are skipped and recorded.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> StencilResult<Loaded<T>> {
    if !path.exists() {
        return Err(StencilError::missing_input(path));
    }
    let content = std::fs::read_to_string(path).map_err(|e| StencilError::io(path, e))?;

    let mut loaded = Loaded::default();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(line) {
            Ok(record) => loaded.records.push(record),
            Err(e) => {
                warn!(path = %path.display(), line = idx + 1, error = %e, "skipping undecodable record");
                loaded.skip(idx + 1, e.to_string());
            }
        }
    }
    debug!(
        path = %path.display(),
        records = loaded.records.len(),
        skipped = loaded.skipped_count(),
        "records loaded"
    );
    Ok(loaded)
}

/// Encode records one per line, in order.
pub fn encode_jsonl<T: Serialize>(records: &[T]) -> StencilResult<String> {
    let mut out = String::new();
    for record in records {
        let line = serde_json::to_string(record).map_err(|e| StencilError::serialization("JSON", e))?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Write records as JSON Lines, replacing `path` atomically.
pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> StencilResult<()> {
    let encoded = encode_jsonl(records)?;
    write_atomic(path, encoded.as_bytes())
}

pub fn read_messages(path: &Path) -> StencilResult<Loaded<Message>> {
    read_jsonl(path)
}

pub fn read_normalized(path: &Path) -> StencilResult<Loaded<NormalizedMessage>> {
    read_jsonl(path)
}

/// Write `contents` to a temporary file beside `path`, then rename it into
/// place. Readers never observe a partial file. Parent directories are
/// created as needed.
pub fn write_atomic(path: &Path, contents: &[u8]) -> StencilResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir).map_err(|e| StencilError::io(&dir, e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| StencilError::io(&dir, e))?;
    tmp.write_all(contents).map_err(|e| StencilError::io(path, e))?;
    tmp.as_file().sync_all().map_err(|e| StencilError::io(path, e))?;
    tmp.persist(path).map_err(|e| StencilError::io(path, e.error))?;
    Ok(())
}

/// Canonical message records on disk.
#[derive(Debug, Clone)]
pub struct JsonlSource {
    path: PathBuf,
}

impl JsonlSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl IMessageSource for JsonlSource {
    fn describe(&self) -> String {
        format!("records {}", self.path.display())
    }

    fn load(&self) -> StencilResult<Loaded<Message>> {
        read_messages(&self.path)
    }
}
