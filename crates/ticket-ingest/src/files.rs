//! Advisory availability checks for input and output files.
//!
//! Office applications keep an owner file (`~$<name>`) next to an open
//! workbook; its presence is treated as a lock. The check is advisory only and
//! does not prevent another process from opening the file afterwards.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ticket_model::{ReportError, Result};

/// Path of the owner file an Office application creates for `path`.
pub fn owner_file_path(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?.to_str()?;
    Some(path.with_file_name(format!("~${name}")))
}

fn is_held_open(path: &Path) -> bool {
    owner_file_path(path).is_some_and(|owner| owner.exists())
}

/// Check that an input exists and can be opened for reading.
pub fn ensure_available(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ReportError::ResourceNotFound {
            path: path.to_path_buf(),
        });
    }
    if is_held_open(path) {
        return Err(ReportError::ResourceLocked {
            path: path.to_path_buf(),
        });
    }
    match File::open(path) {
        Ok(_) => Ok(()),
        Err(error) => Err(open_error(path, &error)),
    }
}

/// Check that an output path can be (over)written. A missing file is fine.
pub fn ensure_writable(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    if is_held_open(path) {
        return Err(ReportError::ResourceLocked {
            path: path.to_path_buf(),
        });
    }
    match OpenOptions::new().append(true).open(path) {
        Ok(_) => Ok(()),
        Err(error) => Err(open_error(path, &error)),
    }
}

fn open_error(path: &Path, error: &std::io::Error) -> ReportError {
    match error.kind() {
        ErrorKind::PermissionDenied => ReportError::ResourceLocked {
            path: path.to_path_buf(),
        },
        ErrorKind::NotFound => ReportError::ResourceNotFound {
            path: path.to_path_buf(),
        },
        _ => ReportError::read(path, error),
    }
}
