//! File collaborators: whole-file reads and atomic writes

use crate::PatchError;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

/// Read a whole file into memory
pub fn read_input(path: &Path) -> Result<Vec<u8>, PatchError> {
    fs::read(path).map_err(|source| PatchError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `data` to `path` so readers see either the old file or the complete new one.
///
/// The bytes go to a temporary file in the destination directory, are synced,
/// and the temporary file is then renamed over `path`.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<(), PatchError> {
    let io_err = |source: io::Error| PatchError::Io {
        path: path.to_path_buf(),
        source,
    };

    let dir = parent_dir(path);
    let mut tmp = NamedTempFile::new_in(&dir).map_err(io_err)?;
    tmp.write_all(data).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    tracing::trace!(path = %path.display(), bytes = data.len(), "wrote file");
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
