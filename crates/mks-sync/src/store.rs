//! The persisted data file: read once at the start of a run, replaced at the end.

use std::io::{ErrorKind, Write};
use std::path::Path;

use mks_core::{ParsedRecords, Record, parse_records};
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::SyncError;

/// Read the raw items of the data file.
///
/// A missing file, or one that is empty or whitespace, is an empty history.
/// So is a path whose parent is not a directory; writing there fails later.
///
/// # Errors
///
/// [`SyncError::PersistedStateCorrupt`] when the content is not a JSON array,
/// [`SyncError::PersistedStateRead`] for any other I/O failure.
pub fn load_items(path: &Path) -> Result<Vec<Value>, SyncError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if matches!(error.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(SyncError::PersistedStateRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&content).map_err(|source| SyncError::PersistedStateCorrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// [`load_items`] followed by record extraction.
///
/// # Errors
///
/// See [`load_items`].
pub fn load_records(path: &Path) -> Result<ParsedRecords, SyncError> {
    load_items(path).map(parse_records)
}

/// Pretty-printed (2-space) JSON array, no trailing newline.
///
/// # Errors
///
/// Returns [`SyncError::Serialize`] if serialization fails.
pub fn render(records: &[Record]) -> Result<String, SyncError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Replace the data file with `records`.
///
/// Writes a temporary file next to the target and renames it into place, so
/// the previous file stays intact if anything fails before the rename. The
/// target keeps its permission bits; a new file gets `0666` minus the umask.
///
/// # Errors
///
/// Returns [`SyncError::Serialize`] or [`SyncError::Write`].
pub fn persist(path: &Path, records: &[Record]) -> Result<(), SyncError> {
    let rendered = render(records)?;
    let write_err = |source: std::io::Error| SyncError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(write_err)?;

    let existing = std::fs::metadata(path).ok().map(|meta| meta.permissions());
    let mut tmp = temp_file_in(dir).map_err(write_err)?;
    tmp.write_all(rendered.as_bytes()).map_err(write_err)?;
    if let Some(permissions) = existing {
        tmp.as_file().set_permissions(permissions).map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(std::fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}
