use dartmend::migrate::{PatchStatus, RunStats};

pub type CmdResult<T> = dartmend::Result<(T, i32)>;

pub(crate) struct GlobalArgs {}

pub mod opacity;
pub mod theme;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (dartmend::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Opacity(args) => dispatch!(args, global, opacity),
        crate::Commands::Theme(args) => dispatch!(args, global, theme),
    }
}

// ============================================================================
// Human summary rendering
// ============================================================================

/// Errors shown in the terminal summary; the JSON payload carries them all.
const MAX_REPORTED_ERRORS: usize = 5;

/// Renders run stats as terminal status lines.
///
/// The stats value is the contract; these lines are a convenience view and
/// only appear when stderr is a terminal.
pub(crate) fn report(stats: &RunStats, hints: &[String]) {
    use crate::tty::status;

    if let Some(backup_dir) = &stats.backup_dir {
        status(&format!("Backup created at {}", backup_dir));
    }

    status(&format!(
        "{} files scanned, {} changed, {} replacements{}",
        stats.files_discovered,
        stats.files_changed,
        stats.total_replacements,
        if stats.applied { "" } else { " (dry run)" },
    ));

    for change in &stats.changes {
        status(&format!(
            "  {} ({} replacements)",
            change.file, change.replacements
        ));
    }

    if !stats.errors.is_empty() {
        status(&format!("{} files skipped with errors:", stats.errors.len()));
        for error in stats.errors.iter().take(MAX_REPORTED_ERRORS) {
            status(&format!("  {}: {}", error.file, error.message));
        }
        if stats.errors.len() > MAX_REPORTED_ERRORS {
            status(&format!(
                "  ... and {} more",
                stats.errors.len() - MAX_REPORTED_ERRORS
            ));
        }
    }

    if let Some(patch) = &stats.patch {
        match patch.status {
            PatchStatus::Inserted => {
                status(&format!("Initialization inserted into {}", patch.file));
            }
            PatchStatus::AlreadyInitialized => {
                status(&format!("{} already initialized; insert skipped", patch.file));
            }
            PatchStatus::EntryPointMissing => {
                status(&format!("Warning: {} not found; insert skipped", patch.file));
            }
            PatchStatus::AnchorNotFound => {
                status(&format!(
                    "Warning: no insertion anchor found in {}",
                    patch.file
                ));
            }
            PatchStatus::Failed => {
                status(&format!(
                    "Warning: could not patch {}: {}",
                    patch.file,
                    patch.message.as_deref().unwrap_or("unknown error")
                ));
            }
        }
    }

    for hint in hints {
        status(&format!("Next: {}", hint));
    }
}
