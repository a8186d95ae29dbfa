use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::IoError;

/// Recursively collects files with `extension` under `root`.
///
/// Entries that cannot be read are logged and skipped so one unreadable
/// subtree does not hide the rest of the tree. A missing root is an error
/// for the caller to report.
pub fn walk_module_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>, IoError> {
    if !root.is_dir() {
        return Err(IoError::directory_not_found(root));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let err = IoError::scan_error(root, e);
                tracing::warn!("Skipping unreadable entry: {err}");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if entry.path().extension().is_some_and(|ext| ext == extension) {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Path segments of `file` below `anchor`, or `None` when the file is not
/// under it.
pub fn segments_below(file: &Path, anchor: &Path) -> Option<Vec<String>> {
    let relative = file.strip_prefix(anchor).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            std::path::Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts)
    }
}
