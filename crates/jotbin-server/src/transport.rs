//! HTTP transport glue.
//!
//! Mounts one Axum route per entry in [`router::RESOURCE_TEMPLATES`], all
//! methods, all funneled through a single entrypoint that builds the
//! canonical [`RequestEvent`] and hands it to [`router::dispatch`]. Axum's
//! matched-path value is the registered template string itself, so the
//! exact-match routing table sees the same keys the transport mounted.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{MatchedPath, Query, RawPathParams, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use serde_json::Value;

use crate::envelope::RequestEvent;
use crate::router::{self, RESOURCE_TEMPLATES};
use crate::state::AppState;

/// Build the HTTP router, one mount per registered resource template.
pub fn build_router(state: AppState) -> Router {
    let mut app = Router::new();
    for template in RESOURCE_TEMPLATES {
        app = app.route(template, any(entrypoint));
    }
    app.with_state(state)
}

/// Single transport entrypoint: envelope extraction, then dispatch.
async fn entrypoint(
    State(state): State<AppState>,
    method: Method,
    matched_path: MatchedPath,
    path_params: RawPathParams,
    Query(query_params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let body = if body.is_empty() {
        None
    } else {
        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => Some(value),
            Err(e) => {
                return (StatusCode::BAD_REQUEST, format!("invalid request body: {e}"))
                    .into_response();
            }
        }
    };

    let event = RequestEvent {
        method,
        resource: matched_path.as_str().to_string(),
        path_params: path_params
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect(),
        query_params,
        body,
        // Identity resolution happens upstream of this service; nothing to
        // pass through here.
        authorizer: None,
    };

    match router::dispatch(&state, event).await {
        Some(Ok(response)) => response.into_response(),
        Some(Err(e)) => {
            tracing::error!(error = %e, "invocation failed");
            e.into_response()
        }
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use jotbin_store::{MemoryStore, TableConfig};

    #[test]
    fn test_every_template_mounts() {
        // Axum panics at mount time on a malformed path template; building
        // the router is the whole assertion.
        let state = AppState::new(Arc::new(MemoryStore::new()), TableConfig::default());
        let _ = build_router(state);
    }
}
