//! Resource handlers, one module per resource family.

pub mod notebooks;
pub mod notes;
pub mod pastebin;
