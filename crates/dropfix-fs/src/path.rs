//! Path resolution and containment checks

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Expand a leading `~` to the current user's home directory.
///
/// Paths without a leading `~` component are returned unchanged, as is
/// everything when no home directory can be determined.
pub fn expand_home(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match dirs::home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Resolve a path to an absolute, canonical form even if it does not exist yet.
///
/// The longest existing ancestor is canonicalized (resolving symlinks), and
/// the missing tail is appended with `.` and `..` segments folded lexically.
pub fn resolve_lenient(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|e| Error::io(path, e))?;
        cwd.join(path)
    };

    let mut existing = absolute.as_path();
    let mut tail = Vec::new();
    loop {
        match dunce::canonicalize(existing) {
            Ok(canonical) => {
                let mut resolved = canonical;
                for segment in tail.iter().rev() {
                    match segment {
                        Component::ParentDir => {
                            resolved.pop();
                        }
                        Component::CurDir => {}
                        other => resolved.push(other.as_os_str()),
                    }
                }
                return Ok(resolved);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let Some(parent) = existing.parent() else {
                    return Err(Error::io(path, e));
                };
                if let Some(last) = existing.components().next_back() {
                    tail.push(last);
                }
                existing = parent;
            }
            Err(e) => return Err(Error::io(existing, e)),
        }
    }
}

/// Check whether `child` is `parent` itself or lies anywhere beneath it.
///
/// Both paths are resolved first so symlinks and relative segments cannot
/// hide the relationship. The comparison is component-wise: `/a/bc` is not
/// inside `/a/b`.
pub fn is_within(child: impl AsRef<Path>, parent: impl AsRef<Path>) -> Result<bool> {
    let child = resolve_lenient(child)?;
    let parent = resolve_lenient(parent)?;
    Ok(child.starts_with(&parent))
}

/// Validate that a configured name is a single, plain path component.
pub fn validate_entry_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if name == "." || name == ".." {
        return Err(invalid("relative segments are not names"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("names must not contain path separators"));
    }
    if name.contains('\0') {
        return Err(invalid("names must not contain NUL"));
    }
    Ok(())
}
