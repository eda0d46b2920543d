//! File-backed note storage
//!
//! One JSON document per ticket, `<ID>.json`, inside a folder chosen at
//! runtime. Writes go to a unique temporary sibling and are renamed into
//! place, so concurrent saves of the same ticket never leave a torn file.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::StoreError;
use crate::notes::ticket::TicketId;

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Default)]
pub struct FsNoteStore {
    dir: RwLock<Option<PathBuf>>,
}

impl FsNoteStore {
    pub fn new(dir: Option<PathBuf>) -> Self {
        Self {
            dir: RwLock::new(dir),
        }
    }

    /// The folder notes are read from and written to, if one is chosen.
    pub fn dir(&self) -> Option<PathBuf> {
        self.dir
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Points the store at another folder (or none).
    pub fn set_dir(&self, dir: Option<PathBuf>) {
        let mut guard = self
            .dir
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        tracing::info!(dir = ?dir, "Notes folder changed");
        *guard = dir;
    }

    /// Reads a note. Any failure, including no folder, reads as absent.
    pub fn load(&self, id: &TicketId) -> Option<Vec<u8>> {
        let path = self.dir()?.join(id.file_name());

        match fs::read(&path) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read note");
                None
            }
        }
    }

    /// Writes a note and returns the path it landed at.
    pub fn save(&self, id: &TicketId, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        let dir = self.dir().ok_or(StoreError::NotConfigured)?;

        fs::create_dir_all(&dir)?;
        // Notes folders are often symlinked into synced storage.
        let base = dir.canonicalize()?;
        let target = base.join(id.file_name());

        write_atomic(&base, &target, bytes)?;

        tracing::debug!(path = %target.display(), len = bytes.len(), "Note saved");
        Ok(target)
    }
}

fn write_atomic(dir: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = dir.join(format!(
        ".{}.{}-{}.tmp",
        target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        std::process::id(),
        TMP_COUNTER.fetch_add(1, Ordering::Relaxed),
    ));

    let result = write_and_rename(&tmp, target, bytes);
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }

    result
}

fn write_and_rename(tmp: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(tmp)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(tmp, target)
}
