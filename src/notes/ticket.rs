use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;

const MAX_LEN: usize = 64;

/// A ticket key such as `ABC-123`, used as the note's file stem.
///
/// Only ASCII letters, digits and `-` are accepted, and the value is stored
/// uppercased, so a key always names a plain file inside the notes folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketId(String);

impl TicketId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of this ticket's note.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl FromStr for TicketId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid = !s.is_empty()
            && s.len() <= MAX_LEN
            && s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-');

        if !valid {
            return Err(StoreError::InvalidTicketId(s.to_string()));
        }

        Ok(Self(s.to_ascii_uppercase()))
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
