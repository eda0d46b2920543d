//! Note persistence
//!
//! Ticket keys and the folder-backed store the routes read and write.

pub mod store;
pub mod ticket;

pub use store::FsNoteStore;
pub use ticket::TicketId;
