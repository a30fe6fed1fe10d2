//! Canonical request and response envelopes.
//!
//! `RequestEvent` is what the transport hands the router after envelope
//! extraction: method, the *templated* resource path it matched, the
//! resolved path/query parameters, the parsed JSON body, and the opaque
//! authorizer context of the already-resolved identity. `Response` is what
//! every handler produces: a status code, the service's fixed CORS headers,
//! and a body that is either a JSON-encoded payload or a literal plain-text
//! confirmation.

use std::collections::HashMap;

use http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, HeaderMap,
    HeaderValue,
};
use http::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};

/// Canonical request descriptor consumed by the router.
#[derive(Debug, Clone)]
pub struct RequestEvent {
    /// HTTP method of the transport event.
    pub method: Method,
    /// Templated resource path, e.g. `/notebook/{notebookId}/note`.
    /// Matching against the routing table is exact-string on this value.
    pub resource: String,
    /// Resolved path parameters, keyed by template placeholder name.
    pub path_params: HashMap<String, String>,
    /// Query string parameters.
    pub query_params: HashMap<String, String>,
    /// Parsed JSON body, when the transport carried one.
    pub body: Option<Value>,
    /// Authorizer context of the already-resolved identity. Passed through
    /// opaque; the handlers never interpret it.
    pub authorizer: Option<Value>,
}

impl RequestEvent {
    /// Fetch a required path parameter.
    pub fn path_param(&self, name: &'static str) -> ApiResult<&str> {
        self.path_params
            .get(name)
            .map(String::as_str)
            .ok_or(ApiError::MissingPathParam(name))
    }

    /// Fetch a required query parameter.
    pub fn query_param(&self, name: &'static str) -> ApiResult<&str> {
        self.query_params
            .get(name)
            .map(String::as_str)
            .ok_or(ApiError::MissingQueryParam(name))
    }

    /// Decode the request body into a typed handler input.
    pub fn body_as<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let body = self.body.clone().ok_or(ApiError::MissingBody)?;
        Ok(serde_json::from_value(body)?)
    }
}

/// Response envelope produced by every handler.
#[derive(Debug, Clone)]
pub struct Response {
    /// Status code of the response.
    pub status: StatusCode,
    /// Fixed headers: CORS allow-origin `*`, allow-credentials `true`,
    /// plus the body's content type.
    pub headers: HeaderMap,
    /// JSON-encoded payload or a literal plain-text confirmation.
    pub body: String,
}

impl Response {
    /// Response carrying a JSON-encoded payload.
    pub fn json<T: Serialize>(status: StatusCode, payload: &T) -> ApiResult<Self> {
        Ok(Self {
            status,
            headers: base_headers(HeaderValue::from_static("application/json")),
            body: serde_json::to_string(payload)?,
        })
    }

    /// Response carrying a literal plain-text confirmation.
    pub fn text(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            headers: base_headers(HeaderValue::from_static("text/plain; charset=utf-8")),
            body: message.to_string(),
        }
    }
}

impl axum::response::IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.headers, self.body).into_response()
    }
}

/// The service's fixed response headers, emitted on every response.
fn base_headers(content_type: HeaderValue) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(3);
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static("true"),
    );
    headers.insert(CONTENT_TYPE, content_type);
    headers
}
