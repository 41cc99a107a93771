//! Directory-scoped, rule-based text migrations.
//!
//! A migration is Discover -> Transform -> Commit: walk the candidate
//! files under a project root, apply an ordered rewrite-rule list to each
//! file's full contents, and write back only what changed. `opacity` and
//! `theme` are the built-in presets.

pub mod backup;
pub mod opacity;
pub mod patch;
pub mod rules;
pub mod run;
pub mod scan;
pub mod theme;

pub use backup::backup_project;
pub use patch::{apply_entry_point_patch, EntryPointPatch, PatchOutcome, PatchStatus};
pub use rules::{apply_rules, Replacement, RewriteRule};
pub use run::{run, ChangedFile, FileError, RunOptions, RunStats};
pub use scan::{discover, ExclusionConfig};
