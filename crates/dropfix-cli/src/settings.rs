//! Configuration resolution
//!
//! Built-in defaults, then the config file, then command-line flags.

use std::path::{Path, PathBuf};

use dropfix_core::FixerConfig;
use dropfix_fs::ConfigStore;

use crate::cli::{RunArgs, SourceArgs};
use crate::error::{CliError, Result};

const CONFIG_DIR: &str = "dropfix";
const CONFIG_FILE: &str = "config.toml";

/// The per-user config file, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load the explicit config file, or the per-user one when it exists.
fn load_base(explicit: Option<&Path>) -> Result<FixerConfig> {
    let store = ConfigStore::new();
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(CliError::user(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            tracing::debug!(path = %path.display(), "loading config");
            Ok(store.load(path)?)
        }
        None => match default_config_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading user config");
                Ok(store.load(&path)?)
            }
            _ => Ok(FixerConfig::default()),
        },
    }
}

/// Resolve the configuration for commands that only need root and client.
pub fn resolve_source(source: &SourceArgs) -> Result<FixerConfig> {
    let mut config = load_base(source.config.as_deref())?;
    if let Some(root) = &source.root {
        config.root = root.clone();
    }
    if let Some(client) = &source.client {
        config.client = client.clone();
    }
    Ok(config.validated()?)
}

/// Resolve the configuration for a walk.
pub fn resolve_run(source: &SourceArgs, run: &RunArgs) -> Result<FixerConfig> {
    let mut config = resolve_source(source)?;
    apply_run_overrides(&mut config, run);
    Ok(config.validated()?)
}

fn apply_run_overrides(config: &mut FixerConfig, run: &RunArgs) {
    if let Some(scratch) = &run.scratch {
        config.scratch = scratch.clone();
    }
    if !run.exclude_dirs.is_empty() {
        config.exclude_dirs = run.exclude_dirs.clone();
    }
    if !run.exclude_files.is_empty() {
        config.exclude_files = run.exclude_files.clone();
    }
    if !run.avoid_dirs.is_empty() {
        config.avoid_dirs = run.avoid_dirs.clone();
    }
    if let Some(secs) = run.poll_interval {
        config.sync_wait.poll_interval_secs = secs;
    }
    if let Some(max) = run.max_polls {
        config.sync_wait.max_polls = Some(max);
    }
    if run.dry_run {
        config.dry_run = true;
    }
}
