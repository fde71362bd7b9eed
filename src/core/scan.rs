/*!
 * Source directory scanning
 *
 * Lists the regular files directly inside a directory together with their
 * sizes. Subdirectories, symbolic links, excluded names and the running
 * executable are skipped.
 */

use std::path::{Path, PathBuf};

use tracing::{debug, trace};
use walkdir::WalkDir;

use super::bin::FileEntry;
use super::filter::ExcludeFilter;
use crate::error::{FizzzError, Result};

/// Scan `source_dir`, skipping the running executable
pub fn scan(source_dir: &Path, filter: &ExcludeFilter) -> Result<Vec<FileEntry>> {
    let own_exe = own_executable();
    scan_excluding(source_dir, filter, own_exe.as_deref())
}

/// Scan `source_dir`, additionally skipping `skip` (compared by canonical path)
pub fn scan_excluding(
    source_dir: &Path,
    filter: &ExcludeFilter,
    skip: Option<&Path>,
) -> Result<Vec<FileEntry>> {
    if !source_dir.exists() {
        return Err(FizzzError::SourceNotFound(source_dir.to_path_buf()));
    }
    if !source_dir.is_dir() {
        return Err(FizzzError::InvalidPath(source_dir.to_path_buf()));
    }

    let walker = WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false);

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        let file_type = entry.file_type();

        if !file_type.is_file() {
            trace!("Skipping non-regular entry {}", entry.path().display());
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if let Some(pattern) = filter.matching_pattern(&name) {
            debug!("Excluding {} (matches '{}')", name, pattern);
            continue;
        }

        let path = entry.path().canonicalize()?;
        if skip.is_some_and(|s| s == path) {
            debug!("Excluding running executable {}", path.display());
            continue;
        }

        let size = entry.metadata().map_err(std::io::Error::from)?.len();
        trace!("Found {} ({} bytes)", path.display(), size);
        entries.push(FileEntry::new(path, size));
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(
        "Scanned {}: {} file(s)",
        source_dir.display(),
        entries.len()
    );
    Ok(entries)
}

/// Canonical path of the running executable, if it can be determined
fn own_executable() -> Option<PathBuf> {
    std::env::current_exe()
        .and_then(|p| p.canonicalize())
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn dotfile_filter() -> ExcludeFilter {
        ExcludeFilter::from_patterns(&[".*"]).unwrap()
    }

    #[test]
    fn test_missing_source() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = scan(&missing, &ExcludeFilter::new()).unwrap_err();
        assert!(matches!(err, FizzzError::SourceNotFound(p) if p == missing));
    }

    #[test]
    fn test_source_is_a_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, b"x").unwrap();

        let err = scan(&file, &ExcludeFilter::new()).unwrap_err();
        assert!(matches!(err, FizzzError::InvalidPath(_)));
    }

    #[test]
    fn test_scan_sizes_and_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.dat"), vec![0u8; 20]).unwrap();
        fs::write(dir.path().join("a.dat"), vec![0u8; 5]).unwrap();
        fs::write(dir.path().join("c.dat"), b"").unwrap();

        let entries = scan(dir.path(), &dotfile_filter()).unwrap();
        let summary: Vec<_> = entries
            .iter()
            .map(|e| (e.file_name().unwrap().to_string_lossy().to_string(), e.size))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("a.dat".to_string(), 5),
                ("b.dat".to_string(), 20),
                ("c.dat".to_string(), 0),
            ]
        );
        assert!(entries.iter().all(|e| e.path.is_absolute()));
    }

    #[test]
    fn test_skips_subdirectories_and_hidden_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("visible"), b"abc").unwrap();
        fs::write(dir.path().join(".hidden"), b"abc").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("inner"), b"abc").unwrap();

        let entries = scan(dir.path(), &dotfile_filter()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name().unwrap(), "visible");
    }

    #[test]
    fn test_empty_filter_keeps_dotfiles() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".hidden"), b"abc").unwrap();

        let entries = scan(dir.path(), &ExcludeFilter::new()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_skip_path() {
        let dir = tempdir().unwrap();
        let me = dir.path().join("fizzz");
        fs::write(&me, b"binary").unwrap();
        fs::write(dir.path().join("data"), b"payload").unwrap();

        let skip = me.canonicalize().unwrap();
        let entries = scan_excluding(dir.path(), &ExcludeFilter::new(), Some(&skip)).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name().unwrap(), "data");
    }

    #[cfg(unix)]
    #[test]
    fn test_skips_symlinks() {
        let dir = tempdir().unwrap();
        let real = dir.path().join("real");
        fs::write(&real, b"data").unwrap();
        std::os::unix::fs::symlink(&real, dir.path().join("link")).unwrap();

        let entries = scan(dir.path(), &ExcludeFilter::new()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name().unwrap(), "real");
    }
}
