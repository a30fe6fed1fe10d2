//! Pastebin resource handlers.
//!
//! Pastebins are standalone: no owner, no parent, no derived counters.
//! - POST /pasteBin - Create a pastebin
//! - GET /pasteBin/{pasteBinId} - Fetch a pastebin by ID

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use jotbin_core::{PasteBin, PasteBinId, provider};
use jotbin_store::ItemKey;

use crate::envelope::Response;
use crate::error::ApiResult;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for POST /pasteBin.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePasteBinRequest {
    /// Opaque pasted content.
    pub details: String,
}

/// Response body for POST /pasteBin.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePasteBinResponse {
    /// The created pastebin's ID, the only handle for retrieving it.
    pub paste_bin_id: PasteBinId,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /pasteBin - Create a pastebin.
///
/// Assigns a fresh ID and issues one store write. The returned ID is the
/// sole retrieval handle.
pub async fn create_paste_bin(
    state: &AppState,
    request: CreatePasteBinRequest,
) -> ApiResult<Response> {
    let paste_bin = PasteBin {
        paste_bin_id: PasteBinId::new(),
        created_at: provider::timestamp(),
        details: request.details,
    };
    let paste_bin_id = paste_bin.paste_bin_id;

    state
        .store()
        .put(&state.tables().pastebins, serde_json::to_value(&paste_bin)?)
        .await?;

    tracing::info!(paste_bin_id = %paste_bin_id, "pastebin created");

    Response::json(StatusCode::OK, &CreatePasteBinResponse { paste_bin_id })
}

/// GET /pasteBin/{pasteBinId} - Fetch a pastebin.
///
/// An unknown ID is not a failure: the response is a 404 whose JSON body is
/// literal `null`, distinguishing "looked up, not there" from an error.
pub async fn get_paste_bin(state: &AppState, paste_bin_id: &str) -> ApiResult<Response> {
    let item = state
        .store()
        .get(&state.tables().pastebins, &ItemKey::new(paste_bin_id))
        .await?;

    match item {
        Some(value) => Response::json(StatusCode::OK, &value),
        None => Response::json(StatusCode::NOT_FOUND, &Value::Null),
    }
}

// ============================================================================
// Tests
// ============================================================================
