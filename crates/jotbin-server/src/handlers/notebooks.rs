//! Notebook resource handlers.
//!
//! This module implements the notebook operations:
//! - POST /notebook - Create a notebook for a user
//! - GET /notebook?userId= - List a user's notebooks, newest first
//! - PUT /notebook/{notebookId} - Rename a notebook
//! - DELETE /notebook/{notebookId}?userId= - Delete a notebook (no cascade)
//!
//! Deleting a notebook never touches its notes: orphaned notes stay in the
//! notes table, still queryable by `notebookId`.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use jotbin_core::{Notebook, NotebookId, provider};
use jotbin_store::{ItemKey, KeyCondition, UpdateAction, query_all};

use crate::envelope::Response;
use crate::error::ApiResult;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for POST /notebook.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotebookRequest {
    /// Owner of the new notebook.
    pub user_id: String,
    /// Display name.
    pub notebook_name: String,
}

/// Response body for POST /notebook.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotebookResponse {
    /// The created notebook's ID.
    pub notebook_id: NotebookId,
}

/// Request body for PUT /notebook/{notebookId}.
///
/// The `userId` exists to reconstruct the composite key, not as an
/// ownership check.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotebookRequest {
    pub user_id: String,
    pub notebook_name: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /notebook - Create a notebook.
///
/// Assigns a fresh ID, a random cover pattern, and a `notesCount` of 0,
/// then issues one store write.
pub async fn create_notebook(
    state: &AppState,
    request: CreateNotebookRequest,
) -> ApiResult<Response> {
    let notebook = Notebook {
        user_id: request.user_id,
        notebook_id: NotebookId::new(),
        created_at: provider::timestamp(),
        notebook_name: request.notebook_name,
        pattern: provider::random_pattern(),
        notes_count: 0,
    };
    let notebook_id = notebook.notebook_id;

    state
        .store()
        .put(&state.tables().notebooks, serde_json::to_value(&notebook)?)
        .await?;

    tracing::info!(notebook_id = %notebook_id, "notebook created");

    Response::json(StatusCode::OK, &CreateNotebookResponse { notebook_id })
}

/// GET /notebook?userId= - List a user's notebooks.
///
/// Queries the full partition (looping the store's continuation token) and
/// sorts the extracted item sequence by `createdAt` descending. A user with
/// no notebooks gets an empty array, never an error.
pub async fn list_notebooks_for_user(state: &AppState, user_id: &str) -> ApiResult<Response> {
    let items = query_all(
        state.store(),
        &state.tables().notebooks,
        &KeyCondition::eq("userId", user_id),
    )
    .await?;

    let mut notebooks = items
        .into_iter()
        .map(serde_json::from_value::<Notebook>)
        .collect::<Result<Vec<_>, _>>()?;
    notebooks.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    tracing::info!(user_id, count = notebooks.len(), "listed notebooks");

    Response::json(StatusCode::OK, &notebooks)
}

/// PUT /notebook/{notebookId} - Rename a notebook.
///
/// Updates `notebookName` and nothing else; in particular it never touches
/// `pattern` or `notesCount`. Replaying the same payload is idempotent.
pub async fn update_notebook(
    state: &AppState,
    notebook_id: &str,
    request: UpdateNotebookRequest,
) -> ApiResult<Response> {
    state
        .store()
        .update(
            &state.tables().notebooks,
            &ItemKey::new(request.user_id).sort(notebook_id),
            &[UpdateAction::set(
                "notebookName",
                json!(request.notebook_name),
            )],
        )
        .await?;

    tracing::info!(notebook_id, "notebook updated");

    Ok(Response::text(
        StatusCode::OK,
        "Notebook Updated Successfully",
    ))
}

/// DELETE /notebook/{notebookId}?userId= - Delete a notebook.
///
/// One idempotent delete by composite key. Does not cascade: the
/// notebook's notes are left in place.
pub async fn delete_notebook(
    state: &AppState,
    notebook_id: &str,
    user_id: &str,
) -> ApiResult<Response> {
    state
        .store()
        .delete(
            &state.tables().notebooks,
            &ItemKey::new(user_id).sort(notebook_id),
        )
        .await?;

    tracing::info!(notebook_id, "notebook deleted");

    Ok(Response::text(
        StatusCode::NO_CONTENT,
        "Notebook Deleted Successfully",
    ))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use jotbin_core::PATTERN_COUNT;
    use jotbin_store::{MemoryStore, StoreAdapter, TableConfig};
    use serde_json::Value;

    fn test_state() -> AppState {
        AppState::new(Arc::new(MemoryStore::new()), TableConfig::default())
    }

    /// Create a notebook through the handler and return its ID.
    async fn create(state: &AppState, user_id: &str, name: &str) -> String {
        let response = create_notebook(
            state,
            CreateNotebookRequest {
                user_id: user_id.to_string(),
                notebook_name: name.to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(response.status, StatusCode::OK);
        let body: Value = serde_json::from_str(&response.body).unwrap();
        body["notebookId"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_create_assigns_pattern_in_range_and_zero_count() {
        let state = test_state();

        for _ in 0..20 {
            let id = create(&state, "u1", "Work").await;
            let stored = state
                .store()
                .get(&state.tables().notebooks, &ItemKey::new("u1").sort(&id))
                .await
                .unwrap()
                .unwrap();
            let pattern = stored["pattern"].as_u64().unwrap();
            assert!(pattern < u64::from(PATTERN_COUNT));
            assert_eq!(stored["notesCount"], 0);
            assert!(stored["createdAt"].is_string());
        }
    }

    #[tokio::test]
    async fn test_create_then_list_round_trip() {
        let state = test_state();

        let id = create(&state, "u1", "Work").await;

        let response = list_notebooks_for_user(&state, "u1").await.unwrap();
        let listed: Vec<Value> = serde_json::from_str(&response.body).unwrap();
        let found = listed
            .iter()
            .find(|n| n["notebookId"] == id.as_str())
            .unwrap();
        assert_eq!(found["notebookName"], "Work");
        assert_eq!(found["notesCount"], 0);
    }

    #[tokio::test]
    async fn test_list_empty_user_yields_empty_array() {
        let state = test_state();
        let response = list_notebooks_for_user(&state, "nobody").await.unwrap();
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "[]");
    }

    #[tokio::test]
    async fn test_list_sorts_by_created_at_descending() {
        let state = test_state();

        // Seed with explicit timestamps so the ordering is deterministic.
        for (id, day) in [("nb-a", 1), ("nb-b", 3), ("nb-c", 2)] {
            let notebook = json!({
                "userId": "u1",
                "notebookId": id,
                "createdAt": Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
                "notebookName": "n",
                "pattern": 0,
                "notesCount": 0,
            });
            state
                .store()
                .put(&state.tables().notebooks, notebook)
                .await
                .unwrap();
        }

        let response = list_notebooks_for_user(&state, "u1").await.unwrap();
        let listed: Vec<Value> = serde_json::from_str(&response.body).unwrap();
        let order: Vec<_> = listed
            .iter()
            .map(|n| n["notebookId"].as_str().unwrap())
            .collect();
        assert_eq!(order, ["nb-b", "nb-c", "nb-a"]);
    }

    #[tokio::test]
    async fn test_update_changes_name_only_and_is_idempotent() {
        let state = test_state();
        let id = create(&state, "u1", "Work").await;
        let key = ItemKey::new("u1").sort(&id);
        let before = state
            .store()
            .get(&state.tables().notebooks, &key)
            .await
            .unwrap()
            .unwrap();

        let request = || UpdateNotebookRequest {
            user_id: "u1".to_string(),
            notebook_name: "Home".to_string(),
        };
        update_notebook(&state, &id, request()).await.unwrap();
        let once = state
            .store()
            .get(&state.tables().notebooks, &key)
            .await
            .unwrap()
            .unwrap();
        update_notebook(&state, &id, request()).await.unwrap();
        let twice = state
            .store()
            .get(&state.tables().notebooks, &key)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(once["notebookName"], "Home");
        // Identical payload replayed: stored state unchanged.
        assert_eq!(once, twice);
        // Everything except the name is untouched.
        assert_eq!(once["pattern"], before["pattern"]);
        assert_eq!(once["notesCount"], before["notesCount"]);
        assert_eq!(once["createdAt"], before["createdAt"]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let state = test_state();
        let id = create(&state, "u1", "Work").await;

        let response = delete_notebook(&state, &id, "u1").await.unwrap();
        assert_eq!(response.status, StatusCode::NO_CONTENT);

        // Deleting the now-absent key still succeeds silently.
        delete_notebook(&state, &id, "u1").await.unwrap();

        let response = list_notebooks_for_user(&state, "u1").await.unwrap();
        assert_eq!(response.body, "[]");
    }
}
