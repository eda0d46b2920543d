//! Side effects the routes are allowed to perform
//!
//! The dispatcher never touches the filesystem or the folder picker
//! directly; it is handed a [`Capabilities`] implementation instead.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::error::StoreError;
use crate::notes::{FsNoteStore, TicketId};

pub trait Capabilities: Send + Sync {
    /// Stored note bytes for a ticket, or `None` when there are none.
    fn read_note(&self, id: &TicketId) -> Option<Vec<u8>>;

    /// Persists a note, returning where it was written.
    fn write_note(&self, id: &TicketId, bytes: &[u8]) -> Result<PathBuf, StoreError>;

    /// Asks whoever owns the notes folder to (re)choose it. Must not block.
    fn trigger_folder_picker(&self);

    fn health_check(&self) -> bool;
}

/// Capabilities backed by a folder on disk and a channel to the picker.
pub struct LocalCapabilities {
    store: Arc<FsNoteStore>,
    picker: UnboundedSender<()>,
}

impl LocalCapabilities {
    pub fn new(store: Arc<FsNoteStore>, picker: UnboundedSender<()>) -> Self {
        Self { store, picker }
    }
}

impl Capabilities for LocalCapabilities {
    fn read_note(&self, id: &TicketId) -> Option<Vec<u8>> {
        self.store.load(id)
    }

    fn write_note(&self, id: &TicketId, bytes: &[u8]) -> Result<PathBuf, StoreError> {
        self.store.save(id, bytes)
    }

    fn trigger_folder_picker(&self) {
        if self.picker.send(()).is_err() {
            tracing::warn!("Folder picker is not running, request dropped");
        }
    }

    fn health_check(&self) -> bool {
        true
    }
}
