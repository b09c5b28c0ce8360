use std::fs::{self, File, OpenOptions, TryLockError};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::ThumbnailerError;

/// Default lock file shared by every run on the host
pub const DEFAULT_LOCK_FILE: &str = "/tmp/thumbnail_maker.lock";

/// Exclusive single-instance lock, held for the guard's lifetime.
///
/// The lock is an OS advisory lock on the file, so the kernel releases it if
/// the process dies. A leftover file from a killed run therefore never blocks
/// the next one. Dropping the guard removes the file; interrupt handlers call
/// [`release`] on [`InstanceLock::path`] since they exit without unwinding.
#[derive(Debug)]
pub struct InstanceLock {
    path: PathBuf,
    file: File,
}

impl InstanceLock {
    pub fn acquire(path: &Path) -> Result<Self, ThumbnailerError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(|e| ThumbnailerError::Lock {
                path: path.to_path_buf(),
                source: e,
            })?;

        match file.try_lock() {
            Ok(()) => {}
            Err(TryLockError::WouldBlock) => {
                return Err(ThumbnailerError::LockHeld(path.to_path_buf()));
            }
            Err(TryLockError::Error(e)) => {
                return Err(ThumbnailerError::Lock {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        }

        debug!("Acquired lock {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Remove a lock file. A file that is already gone is not an error.
pub fn release(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed lock {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove lock file {}: {}", path.display(), e),
    }
}

impl Drop for InstanceLock {
    fn drop(&mut self) {
        release(&self.path);
        if let Err(e) = self.file.unlock() {
            warn!("Could not release lock {}: {}", self.path.display(), e);
        }
    }
}
