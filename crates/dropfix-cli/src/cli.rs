//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// dropfix - Exclude directories from Dropbox without losing their contents
#[derive(Parser, Debug)]
#[command(name = "dropfix")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the configuration comes from and which client to talk to
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// Config file (.toml, .json, .yaml)
    #[arg(short, long, env = "DROPFIX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root of the synced tree
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Sync client executable
    #[arg(long)]
    pub client: Option<String>,
}

/// Overrides for a walk
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct RunArgs {
    /// Scratch directory used to stage targets (must be outside the root)
    #[arg(long)]
    pub scratch: Option<PathBuf>,

    /// Directory name to exclude (repeatable, replaces the configured list)
    #[arg(long = "exclude-dir", value_name = "NAME")]
    pub exclude_dirs: Vec<String>,

    /// File name to exclude (repeatable, replaces the configured list)
    #[arg(long = "exclude-file", value_name = "NAME")]
    pub exclude_files: Vec<String>,

    /// Directory name never to descend into (repeatable, replaces the configured list)
    #[arg(long = "avoid-dir", value_name = "NAME")]
    pub avoid_dirs: Vec<String>,

    /// Seconds between sync status checks
    #[arg(long, value_name = "SECS")]
    pub poll_interval: Option<u64>,

    /// Give up after this many status checks per target (default: wait forever)
    #[arg(long, value_name = "N")]
    pub max_polls: Option<u32>,

    /// Report what would be excluded without moving anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Walk the synced tree and exclude matching paths, keeping their contents
    ///
    /// Every match is moved to the scratch area, Dropbox is given time to
    /// sync the removal, the path is excluded, and the content is moved back.
    ///
    /// Examples:
    ///   dropfix run                               # Use config file and defaults
    ///   dropfix run --dry-run                     # Only list targets
    ///   dropfix run --exclude-dir target --exclude-dir node_modules
    Run {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Show the sync client's status and current exclusion list
    Status {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
