//! Migration orchestration.
//!
//! A run is Discover -> Transform-all -> optional entry-point patch, in
//! that order, strictly sequential. Only pre-flight failures (backup)
//! abort; per-file read/write problems are recorded into the stats and the
//! run continues. The orchestrator never prints; rendering the stats is
//! the command layer's concern.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::core::error::Result;
use crate::core::migrate::backup::backup_project;
use crate::core::migrate::patch::{apply_entry_point_patch, EntryPointPatch, PatchOutcome};
use crate::core::migrate::rules::{apply_rules, RewriteRule};
use crate::core::migrate::scan::{discover, ExclusionConfig};

// ============================================================================
// Options and stats
// ============================================================================

/// Per-run knobs supplied by the command layer.
pub struct RunOptions {
    /// File-name suffixes eligible for rewriting (e.g. ".dart").
    pub extensions: Vec<String>,
    /// Snapshot the tree before mutating. Ignored under dry-run, which
    /// mutates nothing.
    pub backup: bool,
    /// Compute and report changes without touching disk.
    pub dry_run: bool,
    /// One-shot entry-point insertion, applied after the rewrite pass.
    pub patch: Option<EntryPointPatch>,
}

/// A file whose content the rules changed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangedFile {
    /// Root-relative path.
    pub file: String,
    pub replacements: usize,
}

/// A file the run had to skip.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileError {
    /// Root-relative path.
    pub file: String,
    pub message: String,
}

/// Aggregate outcome of one run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub files_discovered: usize,
    pub files_changed: usize,
    pub total_replacements: usize,
    pub changes: Vec<ChangedFile>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FileError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<PatchOutcome>,
    /// False for dry runs: changes were computed, disk was not touched.
    pub applied: bool,
}

// ============================================================================
// Run
// ============================================================================

/// Runs one migration over `root`.
///
/// Counts in the stats reflect actual writes, except under dry-run where
/// they reflect the writes a wet run would have made.
pub fn run(
    root: &Path,
    rules: &[RewriteRule],
    exclusions: &ExclusionConfig,
    options: &RunOptions,
) -> Result<RunStats> {
    let mut stats = RunStats {
        files_discovered: 0,
        files_changed: 0,
        total_replacements: 0,
        changes: Vec::new(),
        errors: Vec::new(),
        backup_dir: None,
        patch: None,
        applied: !options.dry_run,
    };

    if options.backup && !options.dry_run {
        let backup_dir = backup_project(root)?;
        stats.backup_dir = Some(backup_dir.to_string_lossy().to_string());
    }

    let files = discover(root, &options.extensions, exclusions);
    stats.files_discovered = files.len();

    for path in &files {
        let relative = path
            .strip_prefix(root)
            .unwrap_or(path)
            .to_string_lossy()
            .to_string();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                stats.errors.push(FileError {
                    file: relative,
                    message: e.to_string(),
                });
                continue;
            }
        };

        let (rewritten, replacements) = apply_rules(rules, &content);
        if rewritten == content {
            continue;
        }

        if !options.dry_run {
            if let Err(e) = fs::write(path, &rewritten) {
                stats.errors.push(FileError {
                    file: relative,
                    message: e.to_string(),
                });
                continue;
            }
        }

        stats.files_changed += 1;
        stats.total_replacements += replacements;
        stats.changes.push(ChangedFile {
            file: relative,
            replacements,
        });
    }

    if let Some(patch) = &options.patch {
        stats.patch = Some(apply_entry_point_patch(root, patch, options.dry_run));
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::migrate::patch::PatchStatus;
    use regex::Regex;
    use std::path::PathBuf;

    fn rename_rules() -> Vec<RewriteRule> {
        vec![RewriteRule::template(
            "rename",
            r"\bOldPalette\b",
            "NewPalette",
        )]
    }

    fn options(dry_run: bool, backup: bool) -> RunOptions {
        RunOptions {
            extensions: vec![".dart".to_string()],
            backup,
            dry_run,
            patch: None,
        }
    }

    fn write(root: &Path, relative: &str, content: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn rewrites_matching_files_and_counts() {
        let temp = tempfile::tempdir().unwrap();
        let changed = write(
            temp.path(),
            "lib/a.dart",
            "OldPalette.primary; OldPalette.accent;",
        );
        write(temp.path(), "lib/b.dart", "nothing relevant");
        write(temp.path(), "build/gen.dart", "OldPalette.primary");

        let exclusions = ExclusionConfig::new(&["build"], &[]);
        let stats = run(temp.path(), &rename_rules(), &exclusions, &options(false, false)).unwrap();

        assert_eq!(stats.files_discovered, 2);
        assert_eq!(stats.files_changed, 1);
        assert_eq!(stats.total_replacements, 2);
        assert!(stats.applied);
        assert_eq!(stats.changes.len(), 1);
        assert_eq!(stats.changes[0].file, "lib/a.dart");
        assert_eq!(stats.changes[0].replacements, 2);
        assert_eq!(
            fs::read_to_string(changed).unwrap(),
            "NewPalette.primary; NewPalette.accent;"
        );
    }

    #[test]
    fn unchanged_files_are_not_rewritten() {
        let temp = tempfile::tempdir().unwrap();
        let untouched = write(temp.path(), "lib/plain.dart", "nothing relevant");
        let before = fs::metadata(&untouched).unwrap().modified().unwrap();

        let stats = run(
            temp.path(),
            &rename_rules(),
            &ExclusionConfig::default(),
            &options(false, false),
        )
        .unwrap();

        assert_eq!(stats.files_changed, 0);
        assert!(stats.errors.is_empty());
        let after = fs::metadata(&untouched).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn unreadable_file_is_recorded_and_run_continues() {
        let temp = tempfile::tempdir().unwrap();
        let bad = temp.path().join("lib/bad.dart");
        fs::create_dir_all(bad.parent().unwrap()).unwrap();
        fs::write(&bad, [0xff, 0xfe, 0x00, 0x41]).unwrap();
        write(temp.path(), "lib/good.dart", "OldPalette.primary");

        let stats = run(
            temp.path(),
            &rename_rules(),
            &ExclusionConfig::default(),
            &options(false, false),
        )
        .unwrap();

        assert_eq!(stats.errors.len(), 1);
        assert_eq!(stats.errors[0].file, "lib/bad.dart");
        assert_eq!(stats.files_changed, 1);
        assert_eq!(stats.changes[0].file, "lib/good.dart");
    }

    #[test]
    fn dry_run_counts_without_touching_disk() {
        let temp = tempfile::tempdir().unwrap();
        let target = write(temp.path(), "lib/a.dart", "OldPalette.primary");

        let stats = run(
            temp.path(),
            &rename_rules(),
            &ExclusionConfig::default(),
            &options(true, true),
        )
        .unwrap();

        assert!(!stats.applied);
        assert_eq!(stats.files_changed, 1);
        assert_eq!(stats.total_replacements, 1);
        // Dry runs skip the backup along with the writes.
        assert!(stats.backup_dir.is_none());
        assert_eq!(
            fs::read_to_string(target).unwrap(),
            "OldPalette.primary"
        );
    }

    #[test]
    fn backup_snapshots_tree_before_mutation() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("app");
        write(&root, "lib/a.dart", "OldPalette.primary");

        let stats = run(
            &root,
            &rename_rules(),
            &ExclusionConfig::default(),
            &options(false, true),
        )
        .unwrap();

        let backup_dir = PathBuf::from(stats.backup_dir.unwrap());
        assert!(backup_dir
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("backup_app_"));
        assert_eq!(
            fs::read_to_string(backup_dir.join("lib/a.dart")).unwrap(),
            "OldPalette.primary"
        );
        assert_eq!(
            fs::read_to_string(root.join("lib/a.dart")).unwrap(),
            "NewPalette.primary"
        );
    }

    #[test]
    fn patch_outcome_lands_in_stats() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "lib/main.dart", "void main() {\n  run();\n}\n");

        let mut opts = options(false, false);
        opts.patch = Some(EntryPointPatch {
            file: PathBuf::from("lib/main.dart"),
            marker: "Analytics.start".to_string(),
            anchor: Regex::new(r"void main\(\) \{").unwrap(),
            insert: "\n  Analytics.start();\n".to_string(),
        });

        let stats = run(
            temp.path(),
            &rename_rules(),
            &ExclusionConfig::default(),
            &opts,
        )
        .unwrap();

        let patch = stats.patch.unwrap();
        assert_eq!(patch.status, PatchStatus::Inserted);
        assert!(patch.applied);
    }

    #[test]
    fn second_run_finds_nothing_left_to_do() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "lib/a.dart", "OldPalette.primary");

        let first = run(
            temp.path(),
            &rename_rules(),
            &ExclusionConfig::default(),
            &options(false, false),
        )
        .unwrap();
        let second = run(
            temp.path(),
            &rename_rules(),
            &ExclusionConfig::default(),
            &options(false, false),
        )
        .unwrap();

        assert_eq!(first.files_changed, 1);
        assert_eq!(second.files_changed, 0);
        assert_eq!(second.total_replacements, 0);
    }
}
