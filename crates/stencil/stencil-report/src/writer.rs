//! Writing rendered artifacts.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use stencil_core::errors::{StencilError, StencilResult};
use stencil_ingest::write_atomic;
use tracing::debug;

/// A file rendered in memory, relative to its output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub relative_path: PathBuf,
    pub contents: String,
}

impl RenderedFile {
    pub fn new(relative_path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            relative_path: relative_path.into(),
            contents,
        }
    }
}

/// Write every file under `root`, each one atomically. Returns the paths
/// written, in order.
pub fn write_rendered(root: &Path, files: &[RenderedFile]) -> StencilResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = root.join(&file.relative_path);
        write_atomic(&path, file.contents.as_bytes())?;
        debug!(path = %path.display(), bytes = file.contents.len(), "artifact written");
        written.push(path);
    }
    Ok(written)
}

/// A family of files a renderer produces one of per cluster, such as
/// `cluster_examples/cluster_<id>.txt`. Files of the family that a run did
/// not render belong to clusters that no longer exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnedFiles {
    /// Directory relative to the output root; empty for the root itself.
    pub dir: &'static str,
    pub prefix: &'static str,
    pub extension: &'static str,
}

impl OwnedFiles {
    fn matches(&self, name: &str) -> bool {
        name.strip_prefix(self.prefix)
            .and_then(|rest| rest.strip_suffix(self.extension))
            .is_some_and(|stem| stem.ends_with('.'))
    }
}

/// Remove files of the `owned` families under `root` that are not among
/// `rendered`. Returns the removed paths.
pub fn prune_stale(
    root: &Path,
    owned: &[OwnedFiles],
    rendered: &[RenderedFile],
) -> StencilResult<Vec<PathBuf>> {
    let keep: HashSet<PathBuf> = rendered.iter().map(|f| root.join(&f.relative_path)).collect();
    let mut removed = Vec::new();

    for family in owned {
        let dir = if family.dir.is_empty() {
            root.to_path_buf()
        } else {
            root.join(family.dir)
        };
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => return Err(StencilError::io(&dir, e)),
        };
        for entry in entries {
            let path = entry.map_err(|e| StencilError::io(&dir, e))?.path();
            let is_owned = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| family.matches(n));
            if !is_owned || !path.is_file() || keep.contains(&path) {
                continue;
            }
            std::fs::remove_file(&path).map_err(|e| StencilError::io(&path, e))?;
            debug!(path = %path.display(), "stale artifact removed");
            removed.push(path);
        }
    }
    removed.sort();
    Ok(removed)
}
