//! `opacity` subcommand: rewrite deprecated `.withOpacity()` calls.

use clap::Args;
use serde::Serialize;

use dartmend::migrate::{self, opacity, RunOptions, RunStats};
use dartmend::project;

use crate::commands::{CmdResult, GlobalArgs};

#[derive(Args, Debug)]
pub struct OpacityArgs {
    /// Project or subtree root to rewrite
    pub root: String,

    /// Report would-be changes without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Snapshot the tree to a sibling backup directory first
    #[arg(long)]
    pub backup: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpacityOutput {
    pub command: &'static str,
    pub root: String,
    pub stats: RunStats,
}

pub fn run(args: OpacityArgs, _global: &GlobalArgs) -> CmdResult<OpacityOutput> {
    let root = project::resolve_root(&args.root, None)?;

    dartmend::log_status!("opacity", "Scanning {}", root.display());

    let options = RunOptions {
        extensions: opacity::extensions(),
        backup: args.backup,
        dry_run: args.dry_run,
        patch: None,
    };
    let stats = migrate::run(&root, &opacity::rules(), &opacity::exclusions(), &options)?;

    crate::commands::report(&stats, &[]);

    Ok((
        OpacityOutput {
            command: "opacity",
            root: root.display().to_string(),
            stats,
        },
        0,
    ))
}
