//! Crash-safe snapshot file writes
//!
//! Snapshots are written to a `.partial` sibling first and renamed over the
//! target only once fully synced, so a reader never sees a truncated file.

use onepush_core::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Staged write of one snapshot file.
pub struct SnapshotWriter {
    target: PathBuf,
    staging: PathBuf,
    file: File,
    committed: bool,
}

impl SnapshotWriter {
    /// Open a staging file next to `target`, creating parent directories.
    pub fn create(target: impl AsRef<Path>) -> Result<Self> {
        let target = target.as_ref().to_path_buf();
        if let Some(parent) = target.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let staging = staging_path(&target);
        let file = File::create(&staging)?;

        Ok(Self {
            target,
            staging,
            file,
            committed: false,
        })
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.file.write_all(data)?;
        Ok(())
    }

    /// Sync the staged data and move it over the target.
    pub fn commit(mut self) -> Result<()> {
        self.file.flush()?;
        self.file.sync_all()?;
        fs::rename(&self.staging, &self.target)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for SnapshotWriter {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.staging);
        }
    }
}

/// Replace `target` with `data` in one step.
pub fn write_snapshot(target: impl AsRef<Path>, data: &[u8]) -> Result<()> {
    let mut writer = SnapshotWriter::create(target)?;
    writer.write_all(data)?;
    writer.commit()
}

fn staging_path(target: &Path) -> PathBuf {
    let mut staging = target.as_os_str().to_owned();
    staging.push(".partial");
    PathBuf::from(staging)
}
