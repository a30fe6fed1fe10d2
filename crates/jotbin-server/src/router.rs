//! Request router: `(method, path template)` → handler.
//!
//! Matching is exact-string on the templated resource path — no prefix or
//! wildcard matching. An unregistered pair is a distinct outcome
//! (`dispatch` returns `None`), not an error response; the transport layer
//! decides what to tell the caller.

use http::Method;

use crate::envelope::{RequestEvent, Response};
use crate::error::ApiResult;
use crate::handlers::{notebooks, notes, pastebin};
use crate::state::AppState;

/// Every operation the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    CreateNotebook,
    ListNotebooksForUser,
    UpdateNotebook,
    DeleteNotebook,
    CreateNote,
    ListNotes,
    UpdateNote,
    DeleteNote,
    CreatePasteBin,
    GetPasteBin,
}

/// The resource path templates the service registers, exactly as they
/// appear in the routing table. The transport uses this list to mount its
/// HTTP routes, so the two can never drift apart.
pub const RESOURCE_TEMPLATES: &[&str] = &[
    "/notebook",
    "/notebook/{notebookId}",
    "/notebook/{notebookId}/note",
    "/notebook/{notebookId}/note/{noteId}",
    "/pasteBin",
    "/pasteBin/{pasteBinId}",
];

/// The routing table: the unique handler registered for each
/// `(method, path template)` pair, or `None` when no pair matches.
pub fn match_route(method: &Method, resource: &str) -> Option<Route> {
    match (method.as_str(), resource) {
        ("POST", "/notebook") => Some(Route::CreateNotebook),
        ("GET", "/notebook") => Some(Route::ListNotebooksForUser),
        ("PUT", "/notebook/{notebookId}") => Some(Route::UpdateNotebook),
        ("DELETE", "/notebook/{notebookId}") => Some(Route::DeleteNotebook),
        ("POST", "/notebook/{notebookId}/note") => Some(Route::CreateNote),
        ("GET", "/notebook/{notebookId}/note") => Some(Route::ListNotes),
        ("PUT", "/notebook/{notebookId}/note/{noteId}") => Some(Route::UpdateNote),
        ("DELETE", "/notebook/{notebookId}/note/{noteId}") => Some(Route::DeleteNote),
        ("POST", "/pasteBin") => Some(Route::CreatePasteBin),
        ("GET", "/pasteBin/{pasteBinId}") => Some(Route::GetPasteBin),
        _ => None,
    }
}

/// Dispatch a request event to the unique handler registered for its
/// `(method, resource template)` pair.
///
/// Returns `None` when no pair matches. Handler failures are not caught
/// here; they come back in the `Some(Err(_))` arm and propagate as a failed
/// invocation.
pub async fn dispatch(state: &AppState, event: RequestEvent) -> Option<ApiResult<Response>> {
    let route = match_route(&event.method, &event.resource)?;

    if let Some(authorizer) = &event.authorizer {
        tracing::debug!(?authorizer, "authorizer context");
    }

    Some(run(state, route, event).await)
}

async fn run(state: &AppState, route: Route, event: RequestEvent) -> ApiResult<Response> {
    match route {
        Route::CreateNotebook => notebooks::create_notebook(state, event.body_as()?).await,
        Route::ListNotebooksForUser => {
            let user_id = event.query_param("userId")?;
            notebooks::list_notebooks_for_user(state, user_id).await
        }
        Route::UpdateNotebook => {
            let notebook_id = event.path_param("notebookId")?.to_string();
            notebooks::update_notebook(state, &notebook_id, event.body_as()?).await
        }
        Route::DeleteNotebook => {
            let notebook_id = event.path_param("notebookId")?;
            let user_id = event.query_param("userId")?;
            notebooks::delete_notebook(state, notebook_id, user_id).await
        }
        Route::CreateNote => {
            let notebook_id = event.path_param("notebookId")?.to_string();
            notes::create_note(state, &notebook_id, event.body_as()?).await
        }
        Route::ListNotes => {
            let notebook_id = event.path_param("notebookId")?;
            notes::list_notes(state, notebook_id).await
        }
        Route::UpdateNote => {
            let notebook_id = event.path_param("notebookId")?.to_string();
            let note_id = event.path_param("noteId")?.to_string();
            notes::update_note(state, &notebook_id, &note_id, event.body_as()?).await
        }
        Route::DeleteNote => {
            let notebook_id = event.path_param("notebookId")?;
            let note_id = event.path_param("noteId")?;
            let user_id = event.query_param("userId")?;
            notes::delete_note(state, notebook_id, note_id, user_id).await
        }
        Route::CreatePasteBin => pastebin::create_paste_bin(state, event.body_as()?).await,
        Route::GetPasteBin => {
            let paste_bin_id = event.path_param("pasteBinId")?;
            pastebin::get_paste_bin(state, paste_bin_id).await
        }
    }
}
