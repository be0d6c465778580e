//! The batch exclusion pass

use colored::Colorize;

use dropfix_core::{DropboxCli, FsMover, RunSummary, TreeWalker};

use crate::cli::{RunArgs, SourceArgs};
use crate::console::ConsoleProgress;
use crate::error::Result;
use crate::settings;

/// Run the walk with the Dropbox CLI and the real filesystem.
pub fn run_walk(source: &SourceArgs, run: &RunArgs) -> Result<()> {
    let config = settings::resolve_run(source, run)?;
    let root = dropfix_fs::resolve_lenient(&config.root)?;
    let client = DropboxCli::new(config.client.clone(), root);
    let dry_run = config.dry_run;

    if dry_run {
        println!("{} Dry run: nothing will be moved or excluded", "=>".blue().bold());
    }

    let summary = TreeWalker::new(config, client, FsMover).run(&mut ConsoleProgress)?;
    print_summary(&summary, dry_run);
    Ok(())
}

fn print_summary(summary: &RunSummary, dry_run: bool) {
    let excluded = if dry_run {
        format!("{} to exclude", summary.would_exclude)
    } else {
        format!("{} excluded", summary.excluded)
    };
    println!(
        "{} {}, {} already excluded, {} avoided, {} directories walked",
        "Done".green().bold(),
        excluded,
        summary.already_excluded,
        summary.avoided,
        summary.directories
    );
}
