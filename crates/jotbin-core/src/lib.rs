//! jotbin-core: Domain types for the Jotbin note service.
//!
//! This crate provides:
//! - Typed identifiers for notebooks, notes, and pastebins
//! - The domain item shapes stored in the key-value tables
//! - The identifier/timestamp provider used at item creation
//!
//! All stored types serialize with the exact camelCase attribute names the
//! service keeps in its tables (`userId`, `createdAt`, `notesCount`, ...),
//! so a struct serialized here is byte-compatible with what the handlers
//! write through the store adapter.

pub mod provider;
pub mod types;

pub use provider::{PATTERN_COUNT, random_pattern, timestamp};
pub use types::{Note, Notebook, NoteId, NotebookId, PasteBin, PasteBinId};
