//! Non-clobbering moves and small directory helpers

use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::Path;

use walkdir::WalkDir;

use crate::{Error, Result};

/// Move `from` to the exact path `to`, refusing to replace anything at `to`.
///
/// Regular files are hard-linked into place and then unlinked, so an entry
/// that appears at `to` after the existence check is never replaced.
/// Directories and symlinks are renamed; a directory that appears at `to`
/// between the check and the rename can still be replaced if it is empty.
///
/// When source and destination live on different filesystems the entry is
/// copied (symlinks are recreated, not followed) and the source removed
/// afterwards. A failed copy removes the partial destination and leaves the
/// source untouched.
pub fn move_no_clobber(from: &Path, to: &Path) -> Result<()> {
    let Ok(metadata) = fs::symlink_metadata(from) else {
        return Err(Error::SourceMissing {
            path: from.to_path_buf(),
        });
    };
    if fs::symlink_metadata(to).is_ok() {
        return Err(Error::DestinationExists {
            path: to.to_path_buf(),
        });
    }

    if metadata.is_file() {
        link_then_unlink(from, to)
    } else {
        rename_or_copy(from, to)
    }
}

fn link_then_unlink(from: &Path, to: &Path) -> Result<()> {
    match fs::hard_link(from, to) {
        Ok(()) => match fs::remove_file(from) {
            Ok(()) => Ok(()),
            Err(e) => {
                if let Err(undo_err) = fs::remove_file(to) {
                    tracing::warn!(path = %to.display(), error = %undo_err, "failed to remove new link");
                }
                Err(Error::io(from, e))
            }
        },
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(Error::DestinationExists {
            path: to.to_path_buf(),
        }),
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            tracing::debug!(from = %from.display(), to = %to.display(), "link crosses devices, copying");
            copy_then_remove(from, to)
        }
        Err(e) => {
            // Filesystems without hard links
            tracing::debug!(path = %from.display(), error = %e, "hard link failed, renaming");
            rename_or_copy(from, to)
        }
    }
}

fn rename_or_copy(from: &Path, to: &Path) -> Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            tracing::debug!(from = %from.display(), to = %to.display(), "rename crosses devices, copying");
            copy_then_remove(from, to)
        }
        Err(e) => Err(Error::io(from, e)),
    }
}

fn copy_then_remove(from: &Path, to: &Path) -> Result<()> {
    if let Err(copy_err) = copy_tree(from, to) {
        if let Err(cleanup_err) = remove_any(to) {
            tracing::warn!(
                path = %to.display(),
                error = %cleanup_err,
                "failed to remove partial copy"
            );
        }
        return Err(copy_err);
    }
    remove_any(from)
}

/// Copy a file, symlink or directory tree from `from` to the exact path `to`.
///
/// A symlink at `from` is copied as a link. Nothing existing at `to` or
/// below it is overwritten.
fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    let metadata = fs::symlink_metadata(from).map_err(|e| Error::io(from, e))?;
    if !metadata.is_dir() {
        return copy_entry(from, to, metadata.file_type());
    }

    let walk = WalkDir::new(from)
        .follow_links(false)
        .follow_root_links(false);
    for entry in walk {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(from).to_path_buf();
            Error::io(path, e.into())
        })?;
        let dest = match entry.path().strip_prefix(from) {
            Ok(relative) if !relative.as_os_str().is_empty() => to.join(relative),
            _ => to.to_path_buf(),
        };
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir(&dest).map_err(|e| Error::io(&dest, e))?;
            let perms = entry
                .metadata()
                .map_err(|e| Error::io(entry.path(), e.into()))?
                .permissions();
            fs::set_permissions(&dest, perms).map_err(|e| Error::io(&dest, e))?;
        } else {
            copy_entry(entry.path(), &dest, file_type)?;
        }
    }
    Ok(())
}

/// Copy one non-directory entry.
fn copy_entry(from: &Path, to: &Path, file_type: fs::FileType) -> Result<()> {
    if file_type.is_symlink() {
        copy_symlink(from, to)
    } else {
        copy_file(from, to)
    }
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let mut source = File::open(from).map_err(|e| Error::io(from, e))?;
    let perms = source
        .metadata()
        .map_err(|e| Error::io(from, e))?
        .permissions();
    let mut dest = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(to)
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => Error::DestinationExists {
                path: to.to_path_buf(),
            },
            _ => Error::io(to, e),
        })?;
    std::io::copy(&mut source, &mut dest).map_err(|e| Error::io(to, e))?;
    fs::set_permissions(to, perms).map_err(|e| Error::io(to, e))
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> Result<()> {
    let target = fs::read_link(from).map_err(|e| Error::io(from, e))?;
    std::os::unix::fs::symlink(&target, to).map_err(|e| Error::io(to, e))
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> Result<()> {
    copy_file(from, to)
}

/// Remove a file, symlink or directory tree. A symlink is removed, never
/// its target.
fn remove_any(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(Error::io(path, e)),
    };
    if metadata.is_dir() {
        fs::remove_dir_all(path).map_err(|e| Error::io(path, e))
    } else {
        fs::remove_file(path).map_err(|e| Error::io(path, e))
    }
}

/// Create a directory and any missing parents. Existing directories are fine.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Check whether a directory has no entries at all.
pub fn is_empty_dir(path: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(path).map_err(|e| Error::io(path, e))?;
    match entries.next() {
        None => Ok(true),
        Some(Ok(_)) => Ok(false),
        Some(Err(e)) => Err(Error::io(path, e)),
    }
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
