//! Filesystem move capability used by the engine

use std::path::Path;

use crate::Result;

/// Moves an entry to an exact destination without replacing anything there.
pub trait Mover {
    fn move_no_clobber(&self, from: &Path, to: &Path) -> Result<()>;
}

/// Moves on the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsMover;

impl Mover for FsMover {
    fn move_no_clobber(&self, from: &Path, to: &Path) -> Result<()> {
        tracing::debug!(from = %from.display(), to = %to.display(), "moving");
        dropfix_fs::io::move_no_clobber(from, to)?;
        Ok(())
    }
}

impl<T: Mover + ?Sized> Mover for &T {
    fn move_no_clobber(&self, from: &Path, to: &Path) -> Result<()> {
        (**self).move_no_clobber(from, to)
    }
}
