//! Scratch area used to stage exclusion targets outside the synced tree

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::{Error, Result, io, path};

/// A validated, empty holding directory that is disjoint from the synced root.
///
/// Only [`ScratchArea::prepare`] constructs one, so holding a value means the
/// preconditions were checked at the start of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchArea {
    path: PathBuf,
}

impl ScratchArea {
    /// Validate and create the scratch area.
    ///
    /// Fails if `scratch` is `root` or lies beneath it, creates it with any
    /// missing parents, and fails if it already holds anything. A non-empty
    /// scratch area means an earlier run was interrupted and its staged
    /// content must be recovered by hand.
    pub fn prepare(scratch: impl AsRef<Path>, root: impl AsRef<Path>) -> Result<Self> {
        let scratch = path::resolve_lenient(scratch)?;
        let root = path::resolve_lenient(root)?;

        if scratch.starts_with(&root) {
            return Err(Error::ScratchInsideRoot { scratch, root });
        }

        io::ensure_dir(&scratch)?;

        // Creating the directory may have resolved a symlinked component
        let scratch = dunce::canonicalize(&scratch).map_err(|e| Error::io(&scratch, e))?;
        if scratch.starts_with(&root) {
            return Err(Error::ScratchInsideRoot { scratch, root });
        }

        if !io::is_empty_dir(&scratch)? {
            return Err(Error::ScratchNotEmpty { path: scratch });
        }

        tracing::debug!(scratch = %scratch.display(), "scratch area ready");
        Ok(Self { path: scratch })
    }

    /// The canonical scratch directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an entry called `name` sits while staged.
    pub fn staging_path(&self, name: &OsStr) -> PathBuf {
        self.path.join(name)
    }
}
