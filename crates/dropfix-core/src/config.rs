//! Run configuration
//!
//! All settings of a run live in one [`FixerConfig`] value that is passed to
//! the walker. Defaults match a stock Dropbox install on Linux.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use dropfix_fs::{expand_home, validate_entry_name};

use crate::{Error, Result};

/// Directory names excluded by default.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["node_modules", "build", "_build", "bower_components"];

/// Directory names never descended into by default.
pub const DEFAULT_AVOID_DIRS: &[&str] = &[".git", ".svn"];

/// Default staging location, outside any home-directory Dropbox.
pub const DEFAULT_SCRATCH: &str = "/tmp/dropbox_ignore";

/// Default synced root.
pub const DEFAULT_ROOT: &str = "~/Dropbox";

/// Default sync client command.
pub const DEFAULT_CLIENT: &str = "dropbox";

/// How the engine waits for the sync client to settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SyncWait {
    /// Seconds slept before every status check
    pub poll_interval_secs: u64,
    /// Upper bound on status checks; `None` waits indefinitely
    pub max_polls: Option<u32>,
}

impl Default for SyncWait {
    fn default() -> Self {
        Self {
            poll_interval_secs: 10,
            max_polls: None,
        }
    }
}

impl SyncWait {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Everything a run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FixerConfig {
    /// Root of the synced tree
    pub root: PathBuf,
    /// Staging directory, must lie outside `root`
    pub scratch: PathBuf,
    /// Directory names to exclude, in processing order
    pub exclude_dirs: Vec<String>,
    /// File names to exclude, in processing order
    pub exclude_files: Vec<String>,
    /// Directory names never descended into
    pub avoid_dirs: Vec<String>,
    /// Sync client executable
    pub client: String,
    /// Report targets without moving or excluding anything
    pub dry_run: bool,
    pub sync_wait: SyncWait,
}

impl Default for FixerConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            scratch: PathBuf::from(DEFAULT_SCRATCH),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            exclude_files: Vec::new(),
            avoid_dirs: DEFAULT_AVOID_DIRS.iter().map(|s| s.to_string()).collect(),
            client: DEFAULT_CLIENT.to_string(),
            dry_run: false,
            sync_wait: SyncWait::default(),
        }
    }
}

impl FixerConfig {
    /// Check names and the poll interval, drop duplicates and expand `~` in
    /// paths.
    ///
    /// Containment of the scratch area is checked later by
    /// [`dropfix_fs::ScratchArea::prepare`], once the root is known to exist.
    pub fn validated(mut self) -> Result<Self> {
        if self.sync_wait.poll_interval_secs == 0 {
            return Err(Error::InvalidConfig {
                message: "sync_wait.poll_interval_secs must be at least 1".to_string(),
            });
        }
        for list in [
            &mut self.exclude_dirs,
            &mut self.exclude_files,
            &mut self.avoid_dirs,
        ] {
            for name in list.iter() {
                validate_entry_name(name)?;
            }
            dedup_keep_first(list);
        }
        self.root = expand_home(&self.root);
        self.scratch = expand_home(&self.scratch);
        Ok(self)
    }
}

fn dedup_keep_first(names: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    names.retain(|name| seen.insert(name.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_stock_setup() {
        let config = FixerConfig::default();
        assert_eq!(config.exclude_dirs, ["node_modules", "build", "_build", "bower_components"]);
        assert_eq!(config.avoid_dirs, [".git", ".svn"]);
        assert!(config.exclude_files.is_empty());
        assert_eq!(config.sync_wait.interval(), Duration::from_secs(10));
        assert_eq!(config.sync_wait.max_polls, None);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: FixerConfig = toml::from_str(
            r#"
root = "/data/Dropbox"
exclude_files = [".DS_Store"]

[sync_wait]
max_polls = 3
"#,
        )
        .unwrap();

        assert_eq!(config.root, PathBuf::from("/data/Dropbox"));
        assert_eq!(config.exclude_files, [".DS_Store"]);
        assert_eq!(config.exclude_dirs.len(), 4);
        assert_eq!(config.sync_wait.poll_interval_secs, 10);
        assert_eq!(config.sync_wait.max_polls, Some(3));
    }

    #[test]
    fn validated_drops_duplicates_in_order() {
        let config = FixerConfig {
            exclude_dirs: vec!["build".into(), "target".into(), "build".into()],
            ..FixerConfig::default()
        }
        .validated()
        .unwrap();

        assert_eq!(config.exclude_dirs, ["build", "target"]);
    }

    #[test]
    fn validated_rejects_path_like_names() {
        let config = FixerConfig {
            avoid_dirs: vec!["a/b".into()],
            ..FixerConfig::default()
        };
        assert!(config.validated().is_err());
    }

    #[test]
    fn validated_rejects_zero_poll_interval() {
        let config = FixerConfig {
            sync_wait: SyncWait {
                poll_interval_secs: 0,
                max_polls: None,
            },
            ..FixerConfig::default()
        };
        let err = config.validated().unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
        assert!(err.to_string().contains("poll_interval_secs"));
    }
}
