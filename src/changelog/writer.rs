//! Write the rendered changelog to disk.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ChangelogError;

/// Replace the file at `path` with `content`.
///
/// The text is written to a temporary file in the same directory and renamed
/// over the target, so a failed write leaves any existing changelog intact.
pub fn write_changelog(path: &Path, content: &str) -> Result<(), ChangelogError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(ChangelogError::TempFileFailed)?;
    file.write_all(content.as_bytes())
        .map_err(ChangelogError::WriteFailed)?;
    file.flush().map_err(ChangelogError::WriteFailed)?;

    file.persist(path)
        .map_err(|e| ChangelogError::PersistFailed(e.error))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
