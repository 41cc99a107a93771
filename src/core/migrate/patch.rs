//! One-shot anchored insertion into a project entry point.
//!
//! Deliberately not a rewrite rule: this targets a single designated file,
//! matches one anchor pattern, and inserts a fixed block after the first
//! occurrence only. It is fragile pattern matching against one literal
//! signature line and stays scoped that way. Every outcome is advisory; a
//! patch that cannot apply never fails the surrounding run.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;

/// A fixed insertion tied to one entry-point file.
pub struct EntryPointPatch {
    /// Entry-point file, relative to the project root.
    pub file: PathBuf,
    /// Literal guard; when present anywhere in the file the patch is
    /// already applied.
    pub marker: String,
    /// Anchor pattern; the block goes immediately after its first match.
    pub anchor: Regex,
    /// Block inserted verbatim.
    pub insert: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatchStatus {
    Inserted,
    AlreadyInitialized,
    EntryPointMissing,
    AnchorNotFound,
    Failed,
}

/// Outcome of the patch step.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchOutcome {
    pub file: String,
    pub status: PatchStatus,
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PatchOutcome {
    fn new(file: &Path, status: PatchStatus, applied: bool) -> Self {
        Self {
            file: file.to_string_lossy().to_string(),
            status,
            applied,
            message: None,
        }
    }

    fn failed(file: &Path, message: String) -> Self {
        Self {
            file: file.to_string_lossy().to_string(),
            status: PatchStatus::Failed,
            applied: false,
            message: Some(message),
        }
    }
}

/// Applies `patch` under `root`.
///
/// Idempotent through the marker guard. Under dry-run the outcome is
/// computed but nothing is written and `applied` stays false.
pub fn apply_entry_point_patch(
    root: &Path,
    patch: &EntryPointPatch,
    dry_run: bool,
) -> PatchOutcome {
    let path = root.join(&patch.file);
    if !path.is_file() {
        return PatchOutcome::new(&patch.file, PatchStatus::EntryPointMissing, false);
    }

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => return PatchOutcome::failed(&patch.file, e.to_string()),
    };

    if content.contains(&patch.marker) {
        return PatchOutcome::new(&patch.file, PatchStatus::AlreadyInitialized, false);
    }

    let Some(anchor) = patch.anchor.find(&content) else {
        return PatchOutcome::new(&patch.file, PatchStatus::AnchorNotFound, false);
    };

    if dry_run {
        return PatchOutcome::new(&patch.file, PatchStatus::Inserted, false);
    }

    let insert_pos = anchor.end();
    let mut patched = String::with_capacity(content.len() + patch.insert.len());
    patched.push_str(&content[..insert_pos]);
    patched.push_str(&patch.insert);
    patched.push_str(&content[insert_pos..]);

    if let Err(e) = fs::write(&path, patched) {
        return PatchOutcome::failed(&patch.file, e.to_string());
    }

    PatchOutcome::new(&patch.file, PatchStatus::Inserted, true)
}
