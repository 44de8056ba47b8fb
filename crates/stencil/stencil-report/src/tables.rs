//! `clusters.csv` and `cluster_membership.csv`: encoding and reading back.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use stencil_core::errors::{Loaded, StencilError, StencilResult};
use stencil_core::models::{ClusterSummary, MembershipRow};
use tracing::warn;

pub const CLUSTERS_FILE: &str = "clusters.csv";
pub const MEMBERSHIP_FILE: &str = "cluster_membership.csv";

/// Encode rows as CSV with a header taken from the row type's field names.
pub fn encode_csv<T: Serialize>(rows: &[T]) -> StencilResult<String> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| StencilError::serialization("CSV", e))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| StencilError::serialization("CSV", e))?;
    String::from_utf8(bytes).map_err(|e| StencilError::serialization("CSV", e))
}

/// Header-only output still needs the header, which `serialize` only emits
/// with the first row.
fn encode_table<T: Serialize>(rows: &[T], header: &[&str]) -> StencilResult<String> {
    if rows.is_empty() {
        return Ok(format!("{}\n", header.join(",")));
    }
    encode_csv(rows)
}

pub fn encode_clusters(rows: &[ClusterSummary]) -> StencilResult<String> {
    encode_table(
        rows,
        &["cluster_id", "count", "representative_id", "representative_text_raw"],
    )
}

pub fn encode_membership(rows: &[MembershipRow]) -> StencilResult<String> {
    encode_table(rows, &["message_id", "cluster_id"])
}

/// Read a CSV table. Rows that fail to decode are skipped and recorded.
pub fn read_csv<T: DeserializeOwned>(path: &Path) -> StencilResult<Loaded<T>> {
    if !path.exists() {
        return Err(StencilError::missing_input(path));
    }
    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_error(path, e))?;

    let mut loaded = Loaded::default();
    for (idx, result) in reader.deserialize::<T>().enumerate() {
        match result {
            Ok(row) => loaded.records.push(row),
            Err(e) => {
                // Header is line 1.
                let line = e
                    .position()
                    .map_or(idx + 2, |p| p.line() as usize);
                warn!(path = %path.display(), line, error = %e, "skipping undecodable row");
                loaded.skip(line, e.to_string());
            }
        }
    }
    Ok(loaded)
}

pub fn read_clusters(path: &Path) -> StencilResult<Loaded<ClusterSummary>> {
    read_csv(path)
}

pub fn read_membership(path: &Path) -> StencilResult<Loaded<MembershipRow>> {
    read_csv(path)
}

fn csv_error(path: &Path, e: csv::Error) -> StencilError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => StencilError::io(path, io),
        other => StencilError::serialization("CSV", format!("{other:?}")),
    }
}
