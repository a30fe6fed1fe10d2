//! Note resource handlers.
//!
//! This module implements the note operations:
//! - POST /notebook/{notebookId}/note - Create a note
//! - GET /notebook/{notebookId}/note - List a notebook's notes, newest first
//! - PUT /notebook/{notebookId}/note/{noteId} - Update title and body
//! - DELETE /notebook/{notebookId}/note/{noteId}?userId= - Delete a note
//!
//! # The two-phase counter
//!
//! Creating or deleting a note issues two independent store operations:
//! the note write itself, then a ±1 adjustment of the parent notebook's
//! cached `notesCount`. There is no transaction spanning the pair. If the
//! second operation fails the note write stands and the counter is off by
//! one — permanently, unless an external reconciliation pass (comparing
//! true note counts per notebook against the stored `notesCount`) repairs
//! it. Nothing here detects, reports, or compensates the drift when it
//! happens; the failed second write surfaces as a failed invocation and
//! that is all.

use std::str::FromStr;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use jotbin_core::{Note, NoteId, NotebookId, provider};
use jotbin_store::{ItemKey, KeyCondition, UpdateAction, query_all};

use crate::envelope::Response;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for POST /notebook/{notebookId}/note.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteRequest {
    /// Owner; also names the partition of the parent notebook's key.
    pub user_id: String,
    pub note_title: String,
    pub note: String,
}

/// Response body for POST /notebook/{notebookId}/note.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteResponse {
    /// The created note's ID.
    pub note_id: NoteId,
}

/// Request body for PUT /notebook/{notebookId}/note/{noteId}.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteRequest {
    pub note_title: String,
    pub note: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /notebook/{notebookId}/note - Create a note.
///
/// Writes the note, then increments the parent notebook's `notesCount` in
/// a second, independent operation. No existence check is made on the
/// parent before the note write; a missing parent fails the increment, not
/// the note.
pub async fn create_note(
    state: &AppState,
    notebook_id: &str,
    request: CreateNoteRequest,
) -> ApiResult<Response> {
    let tables = state.tables();

    let note = Note {
        user_id: request.user_id.clone(),
        notebook_id: NotebookId::from_str(notebook_id).map_err(|source| {
            ApiError::InvalidPathParam {
                name: "notebookId",
                source,
            }
        })?,
        note_id: NoteId::new(),
        created_at: provider::timestamp(),
        note_title: request.note_title,
        note: request.note,
    };
    let note_id = note.note_id;

    state
        .store()
        .put(&tables.notes, serde_json::to_value(&note)?)
        .await?;

    // Second, independent write. If this fails, the note above stands and
    // the parent's count under-reports by one until reconciled externally.
    state
        .store()
        .update(
            &tables.notebooks,
            &ItemKey::new(request.user_id.as_str()).sort(notebook_id),
            &[UpdateAction::increment("notesCount", 1)],
        )
        .await?;

    tracing::info!(note_id = %note_id, notebook_id, "note created");

    Response::json(StatusCode::OK, &CreateNoteResponse { note_id })
}

/// GET /notebook/{notebookId}/note - List a notebook's notes.
///
/// Queries the full partition (looping the store's continuation token) and
/// sorts the extracted item sequence by `createdAt` descending — the same
/// sort the notebook listing applies.
pub async fn list_notes(state: &AppState, notebook_id: &str) -> ApiResult<Response> {
    let items = query_all(
        state.store(),
        &state.tables().notes,
        &KeyCondition::eq("notebookId", notebook_id),
    )
    .await?;

    let mut notes = items
        .into_iter()
        .map(serde_json::from_value::<Note>)
        .collect::<Result<Vec<_>, _>>()?;
    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    tracing::info!(notebook_id, count = notes.len(), "listed notes");

    Response::json(StatusCode::OK, &notes)
}

/// PUT /notebook/{notebookId}/note/{noteId} - Update a note.
///
/// Sets `noteTitle` and `note` and nothing else; `notesCount` is never
/// touched by an update. Replaying the same payload is idempotent.
pub async fn update_note(
    state: &AppState,
    notebook_id: &str,
    note_id: &str,
    request: UpdateNoteRequest,
) -> ApiResult<Response> {
    state
        .store()
        .update(
            &state.tables().notes,
            &ItemKey::new(notebook_id).sort(note_id),
            &[
                UpdateAction::set("noteTitle", json!(request.note_title)),
                UpdateAction::set("note", json!(request.note)),
            ],
        )
        .await?;

    tracing::info!(note_id, notebook_id, "note updated");

    Ok(Response::text(StatusCode::OK, "Note Updated Successfully"))
}

/// DELETE /notebook/{notebookId}/note/{noteId}?userId= - Delete a note.
///
/// Deletes the note, then decrements the parent's `notesCount` in a
/// second, independent operation — the same two-step non-atomicity as
/// creation, with the drift direction depending on which step fails.
pub async fn delete_note(
    state: &AppState,
    notebook_id: &str,
    note_id: &str,
    user_id: &str,
) -> ApiResult<Response> {
    let tables = state.tables();

    state
        .store()
        .delete(&tables.notes, &ItemKey::new(notebook_id).sort(note_id))
        .await?;

    state
        .store()
        .update(
            &tables.notebooks,
            &ItemKey::new(user_id).sort(notebook_id),
            &[UpdateAction::increment("notesCount", -1)],
        )
        .await?;

    tracing::info!(note_id, notebook_id, "note deleted");

    Ok(Response::text(
        StatusCode::NO_CONTENT,
        "Note Deleted Successfully",
    ))
}

// ============================================================================
// Tests
// ============================================================================
