//! Core data types for the Jotbin note service.
//!
//! Three item families live in the store:
//!
//! - A `Notebook` is a named container owned by a user, keyed by
//!   `(userId, notebookId)`, carrying a cached count of its notes.
//! - A `Note` is a titled text item belonging to exactly one notebook,
//!   keyed by `(notebookId, noteId)`. The `notebookId` reference is not
//!   enforced by the store.
//! - A `PasteBin` is a standalone create/read item keyed by `pasteBinId`.
//!
//! All types derive `Debug`, `Clone`, `Serialize`, and `Deserialize`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a notebook.
///
/// Wraps a UUID v4, providing type safety to distinguish notebook IDs from
/// other UUID-based identifiers in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotebookId(pub Uuid);

impl NotebookId {
    /// Creates a new random NotebookId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a NotebookId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NotebookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotebookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NotebookId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a note within a notebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub Uuid);

impl NoteId {
    /// Creates a new random NoteId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a NoteId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a pastebin item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasteBinId(pub Uuid);

impl PasteBinId {
    /// Creates a new random PasteBinId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a PasteBinId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PasteBinId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PasteBinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PasteBinId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ============================================================================
// Stored Items
// ============================================================================

/// A notebook item as stored in the notebooks table.
///
/// Keyed by `(userId, notebookId)`. The `notesCount` field is a derived
/// aggregate: it starts at 0 and is adjusted by exactly one ±1 update per
/// successful note creation or deletion. Because that adjustment is a
/// separate store operation from the note write itself, the count can drift
/// from the true note population when one half of the pair fails. Drift is
/// an accepted consistency gap; nothing in the handlers patches it silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    /// Owning user. Partition key of the notebooks table.
    pub user_id: String,
    /// Sort key of the notebooks table.
    pub notebook_id: NotebookId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Display name; the only field `updateNotebook` may change.
    pub notebook_name: String,
    /// Cover pattern index, assigned once at creation and immutable.
    /// Always in `[0, PATTERN_COUNT)`.
    pub pattern: u8,
    /// Cached count of notes in this notebook. Signed so that drift in the
    /// over-correcting direction stays representable.
    pub notes_count: i64,
}

/// A note item as stored in the notes table.
///
/// Keyed by `(notebookId, noteId)`. `notebookId` references the parent
/// notebook but is not enforced: deleting a notebook leaves its notes in
/// place, still queryable by `notebookId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Owning user, denormalized onto every note.
    pub user_id: String,
    /// Parent notebook. Partition key of the notes table.
    pub notebook_id: NotebookId,
    /// Sort key of the notes table.
    pub note_id: NoteId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Title; mutable via `updateNote`.
    pub note_title: String,
    /// Body text; mutable via `updateNote`.
    pub note: String,
}

/// A pastebin item as stored in the pastebins table.
///
/// Single-attribute key, no relationship to notebooks or notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasteBin {
    /// Partition key of the pastebins table.
    pub paste_bin_id: PasteBinId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Pasted content.
    pub details: String,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notebook_id_roundtrip() {
        let id = NotebookId::new();
        let parsed: NotebookId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_notebook_ids_are_unique() {
        assert_ne!(NotebookId::new(), NotebookId::new());
    }

    #[test]
    fn test_notebook_serializes_camel_case() {
        let notebook = Notebook {
            user_id: "u1".to_string(),
            notebook_id: NotebookId::new(),
            created_at: Utc::now(),
            notebook_name: "Work".to_string(),
            pattern: 7,
            notes_count: 0,
        };
        let json = serde_json::to_value(&notebook).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["notebookName"], "Work");
        assert_eq!(json["notesCount"], 0);
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn test_note_wire_field_names() {
        let note = Note {
            user_id: "u1".to_string(),
            notebook_id: NotebookId::new(),
            note_id: NoteId::new(),
            created_at: Utc::now(),
            note_title: "T1".to_string(),
            note: "body".to_string(),
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["noteTitle"], "T1");
        assert_eq!(json["note"], "body");
        assert!(json["noteId"].is_string());
        assert!(json["notebookId"].is_string());
    }

    #[test]
    fn test_pastebin_roundtrip() {
        let paste = PasteBin {
            paste_bin_id: PasteBinId::new(),
            created_at: Utc::now(),
            details: "hello".to_string(),
        };
        let json = serde_json::to_string(&paste).unwrap();
        let back: PasteBin = serde_json::from_str(&json).unwrap();
        assert_eq!(paste, back);
    }
}
