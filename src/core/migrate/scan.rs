//! Candidate file discovery with exclusion filtering.
//!
//! Discovery walks a project tree, keeps files matching the migration's
//! extensions, and drops anything the exclusion config rejects. The whole
//! candidate set is materialized up front so the total is known before any
//! file is touched.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Exclusion config
// ============================================================================

/// Directory names never worth scanning in a Flutter project tree
/// (VCS, IDE state, build output, pub caches).
const FLUTTER_SKIP_DIRS: &[&str] = &[".git", ".idea", ".vscode", "build", ".dart_tool"];

/// Directory and file base names excluded from discovery.
///
/// Entries are exact, case-sensitive names, not globs.
#[derive(Debug, Clone, Default)]
pub struct ExclusionConfig {
    skip_dirs: HashSet<String>,
    skip_file_names: HashSet<String>,
}

impl ExclusionConfig {
    pub fn new(skip_dirs: &[&str], skip_file_names: &[&str]) -> Self {
        Self {
            skip_dirs: skip_dirs.iter().map(|s| s.to_string()).collect(),
            skip_file_names: skip_file_names.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Standard Flutter exclusions plus migration-specific file-name skips.
    pub fn flutter(skip_file_names: &[&str]) -> Self {
        Self::new(FLUTTER_SKIP_DIRS, skip_file_names)
    }

    /// True when `path` must not participate in a run.
    ///
    /// A path is skipped when any ancestor directory's base name is an
    /// excluded directory name, or when its own base name is an excluded
    /// file name. The ancestor walk is unbounded: it continues past the
    /// scan root to the filesystem root, so a root nested inside a
    /// directory with an excluded name yields no files at all.
    pub fn should_skip(&self, path: &Path) -> bool {
        for ancestor in path.ancestors().skip(1) {
            if let Some(name) = ancestor.file_name() {
                if self.skip_dirs.contains(name.to_string_lossy().as_ref()) {
                    return true;
                }
            }
        }

        if let Some(name) = path.file_name() {
            if self.skip_file_names.contains(name.to_string_lossy().as_ref()) {
                return true;
            }
        }

        false
    }
}

// ============================================================================
// File walking
// ============================================================================

/// Enumerates every file under `root` whose name ends with one of
/// `extensions` and survives the exclusion config.
///
/// Returns a materialized, sorted list; directory read errors during the
/// walk skip that directory and continue.
pub fn discover(root: &Path, extensions: &[String], config: &ExclusionConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();
    walk_recursive(root, extensions, config, &mut files);
    files.sort();
    files
}

fn walk_recursive(
    dir: &Path,
    extensions: &[String],
    config: &ExclusionConfig,
    files: &mut Vec<PathBuf>,
) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            // Pruning is an optimization; should_skip re-checks the full
            // ancestor chain for every candidate.
            if config.skip_dirs.contains(&name) {
                continue;
            }
            walk_recursive(&path, extensions, config, files);
        } else {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if extensions.iter().any(|ext| name.ends_with(ext.as_str()))
                && !config.should_skip(&path)
            {
                files.push(path);
            }
        }
    }
}
