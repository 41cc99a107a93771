//! Pre-run project backup.
//!
//! The backup is a full snapshot of the project tree, copied to a sibling
//! directory before any file is mutated. Backup failure aborts the run;
//! this is a safety contract, not best effort.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::error::{Error, Result};

/// Copies the entire tree under `root` to a sibling directory named
/// `backup_<project>_<YYYYmmdd_HHMMSS>` and returns the new path.
///
/// The root is canonicalized first, so a relative root (`.` included)
/// backs up beside the directory it resolves to, never inside it.
/// Nothing is excluded from the copy. Fails if the target already exists,
/// so a backup never silently merges into a previous one.
pub fn backup_project(root: &Path) -> Result<PathBuf> {
    let root = fs::canonicalize(root).map_err(|e| {
        Error::backup_failed(e.to_string(), Some(format!("resolve {}", root.display())))
    })?;
    let project = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "project".to_string());
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let parent = root.parent().unwrap_or_else(|| Path::new("."));
    let backup_dir = parent.join(format!("backup_{}_{}", project, timestamp));

    fs::create_dir(&backup_dir).map_err(|e| {
        Error::backup_failed(e.to_string(), Some(format!("create {}", backup_dir.display())))
    })?;
    copy_tree(&root, &backup_dir)?;

    Ok(backup_dir)
}

fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    // Snapshot the listing before writing anything under dst.
    let entries = fs::read_dir(src)
        .and_then(|entries| entries.collect::<io::Result<Vec<_>>>())
        .map_err(|e| Error::backup_failed(e.to_string(), Some(format!("read {}", src.display()))))?;

    for entry in entries {
        let from = entry.path();
        let to = dst.join(entry.file_name());

        if from.is_dir() {
            fs::create_dir_all(&to).map_err(|e| {
                Error::backup_failed(e.to_string(), Some(format!("create {}", to.display())))
            })?;
            copy_tree(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(|e| {
                Error::backup_failed(e.to_string(), Some(format!("copy {}", from.display())))
            })?;
        }
    }

    Ok(())
}
