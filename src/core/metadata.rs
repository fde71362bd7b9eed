/*!
 * File metadata preservation (timestamps, permissions)
 */

use crate::error::{FizzzError, Result};
use filetime::{set_file_times, FileTime};
use std::path::Path;

/// Preserve file metadata from source to destination
pub fn preserve_metadata(source_path: &Path, dest_path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(source_path).map_err(|e| {
        FizzzError::MetadataFailed(format!(
            "Failed to read metadata of {}: {}",
            source_path.display(),
            e
        ))
    })?;

    std::fs::set_permissions(dest_path, metadata.permissions())
        .map_err(|e| FizzzError::MetadataFailed(format!("Failed to set permissions: {}", e)))?;

    let accessed = FileTime::from_last_access_time(&metadata);
    let modified = FileTime::from_last_modification_time(&metadata);

    set_file_times(dest_path, accessed, modified)
        .map_err(|e| FizzzError::MetadataFailed(format!("Failed to set timestamps: {}", e)))?;

    Ok(())
}

/// Copy a file and carry its permissions and timestamps over
pub fn copy_with_metadata(source_path: &Path, dest_path: &Path) -> Result<u64> {
    let bytes = std::fs::copy(source_path, dest_path)?;
    preserve_metadata(source_path, dest_path)?;
    Ok(bytes)
}
