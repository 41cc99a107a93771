//! `theme` subcommand: rename `AppColors`/`AppColorsLight` references to
//! `AppTheme` across a Flutter project.

use clap::Args;
use serde::Serialize;

use dartmend::migrate::{self, theme, RunOptions, RunStats};
use dartmend::project;

use crate::commands::{CmdResult, GlobalArgs};

#[derive(Args, Debug)]
pub struct ThemeArgs {
    /// Flutter project root (must contain pubspec.yaml)
    pub root: String,

    /// Report would-be changes without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the pre-run backup of the project tree
    #[arg(long)]
    pub no_backup: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOutput {
    pub command: &'static str,
    pub root: String,
    pub stats: RunStats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

pub fn run(args: ThemeArgs, _global: &GlobalArgs) -> CmdResult<ThemeOutput> {
    let root = project::resolve_root(&args.root, Some("pubspec.yaml"))?;

    dartmend::log_status!("theme", "Migrating {}", root.display());

    let options = RunOptions {
        extensions: theme::extensions(),
        backup: !args.no_backup,
        dry_run: args.dry_run,
        patch: Some(theme::entry_point_patch()),
    };
    let stats = migrate::run(&root, &theme::rules(), &theme::exclusions(), &options)?;

    let hints = theme::hints();
    crate::commands::report(&stats, &hints);

    Ok((
        ThemeOutput {
            command: "theme",
            root: root.display().to_string(),
            stats,
            hints,
        },
        0,
    ))
}
