//! One cooperative advisory file lock per voter (spec.md §5): acquired at
//! the start of `cast_vote`, released on every exit path via `Drop`.

use std::fs::{File, OpenOptions};
use std::path::Path;

use fs2::FileExt;

use crate::errors::WorkflowError;

pub struct VoterLock {
    file: File,
}

impl VoterLock {
    /// Block until the exclusive lock on `lock_path` is acquired. The
    /// sidecar file is created if it does not already exist.
    pub fn acquire(lock_path: &Path) -> Result<Self, WorkflowError> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .open(lock_path)
            .map_err(vm_io::IoError::from)?;
        file.lock_exclusive().map_err(vm_io::IoError::from)?;
        Ok(Self { file })
    }
}

impl Drop for VoterLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}
