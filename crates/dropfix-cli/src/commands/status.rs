//! Status command implementation

use colored::Colorize;

use dropfix_core::{DropboxCli, SyncClient, SyncStatus};

use crate::cli::SourceArgs;
use crate::error::Result;
use crate::settings;

/// Print the client's sync state and exclusion list.
pub fn run_status(source: &SourceArgs) -> Result<()> {
    let config = settings::resolve_source(source)?;
    let root = dropfix_fs::resolve_lenient(&config.root)?;
    let client = DropboxCli::new(config.client.clone(), root.clone());

    let status = client.status()?;
    let rendered = match &status {
        SyncStatus::UpToDate => status.to_string().green(),
        SyncStatus::Busy(_) => status.to_string().yellow(),
        SyncStatus::NotRunning => status.to_string().red(),
    };
    println!("{}:   {}", "Root".dimmed(), root.display());
    println!("{}: {}", "Status".dimmed(), rendered);
    println!();

    if status == SyncStatus::NotRunning {
        return Ok(());
    }

    let excluded = client.list_excluded()?;
    println!("{}:", "Excluded".bold());
    if excluded.is_empty() {
        println!("  {}", "None".dimmed());
    }
    for path in &excluded {
        let shown = path.strip_prefix(&root).unwrap_or(path);
        println!("  {} {}", "-".dimmed(), shown.display());
    }
    Ok(())
}
