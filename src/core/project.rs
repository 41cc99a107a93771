//! Project root resolution and pre-flight validation.

use std::path::PathBuf;

use crate::core::error::{Error, Result};
use crate::utils::validation;

/// Expands and validates the user-supplied project root.
///
/// `marker` names a file that must sit directly under the root for the
/// tree to count as a project (`pubspec.yaml` for Flutter); `None` skips
/// that gate. Tilde is expanded before any check.
pub fn resolve_root(raw: &str, marker: Option<&str>) -> Result<PathBuf> {
    let raw = validation::require_non_empty(raw, "root", "Project root path is required")?;

    let expanded = shellexpand::tilde(raw);
    let root = PathBuf::from(expanded.as_ref());

    if !root.exists() {
        return Err(Error::project_root_not_found(root.display().to_string())
            .with_hint(format!("Verify the path exists: ls -la {}", root.display())));
    }

    if let Some(marker) = marker {
        if !root.join(marker).is_file() {
            return Err(
                Error::project_marker_missing(root.display().to_string(), marker).with_hint(
                    format!("Point at the project directory that contains {}", marker),
                ),
            );
        }
    }

    Ok(root)
}
