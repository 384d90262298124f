//! Directory helpers
//!
//! Every task touches the filesystem through these few functions so that
//! the rules are the same everywhere:
//!
//! - removing something that is already gone is success
//! - moving or copying from or into a missing location is an error
//! - any other I/O failure (permissions, busy files) is an error

use std::io;
use std::path::Path;

use crate::error::{Error, Result};

/// Remove a directory tree (or file); a missing target is not an error
pub fn ensure_absent(path: &Path) -> Result<()> {
    let result = match std::fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(path),
        Ok(_) => std::fs::remove_file(path),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            log::debug!("Removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(Error::RemoveDir {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Remove `path` and recreate it as an empty directory
pub fn ensure_fresh(path: &Path) -> Result<()> {
    ensure_absent(path)?;
    std::fs::create_dir_all(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Created {}", path.display());
    Ok(())
}

/// Move a file or directory tree to `to`
///
/// The parent of `to` must already exist. Only moves across filesystems fall
/// back to copy-then-remove; any other rename failure is returned as is.
pub fn relocate(from: &Path, to: &Path) -> Result<()> {
    let err = |source| Error::Relocate {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    let meta = std::fs::metadata(from).map_err(err)?;
    if let Some(parent) = to.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("destination directory {} does not exist", parent.display()),
            )));
        }
    }

    match std::fs::rename(from, to) {
        Ok(()) => {}
        Err(e) if is_cross_device(&e) => {
            log::debug!("Copying {} across filesystems", from.display());
            if meta.is_dir() {
                copy_dir(from, to).map_err(err)?;
                std::fs::remove_dir_all(from).map_err(err)?;
            } else {
                std::fs::copy(from, to).map_err(err)?;
                std::fs::remove_file(from).map_err(err)?;
            }
        }
        Err(e) => return Err(err(e)),
    }

    log::debug!("Moved {} to {}", from.display(), to.display());
    Ok(())
}

/// Whether a rename failed only because source and destination are on
/// different filesystems
fn is_cross_device(e: &io::Error) -> bool {
    // EXDEV on Unix, ERROR_NOT_SAME_DEVICE on Windows
    #[cfg(unix)]
    const CROSS_DEVICE: i32 = 18;
    #[cfg(windows)]
    const CROSS_DEVICE: i32 = 17;
    #[cfg(not(any(unix, windows)))]
    const CROSS_DEVICE: i32 = -1;

    e.raw_os_error() == Some(CROSS_DEVICE)
}

/// Recursively copy a directory tree; `to` must not exist yet
pub fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    let err = |source| Error::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    if !from.is_dir() {
        return Err(err(io::Error::new(
            io::ErrorKind::NotFound,
            "source directory does not exist",
        )));
    }
    if to.exists() {
        return Err(err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "destination already exists",
        )));
    }

    copy_dir(from, to).map_err(err)?;
    log::debug!("Copied {} to {}", from.display(), to.display());
    Ok(())
}

fn copy_dir(from: &Path, to: &Path) -> io::Result<()> {
    std::fs::create_dir_all(to)?;
    for entry in std::fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
