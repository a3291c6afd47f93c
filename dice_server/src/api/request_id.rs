//! Per-request correlation.
//!
//! A caller may tag a call with `x-request-id`; untagged calls are assigned a
//! UUID. The tag travels to handlers through [`RequestId`], comes back on the
//! response, and labels the access log lines. The same layer feeds the HTTP
//! metrics, since it already times every call.

use axum::{
    extract::{FromRequestParts, Request},
    http::{HeaderMap, HeaderValue, StatusCode, request::Parts},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use uuid::Uuid;

use crate::metrics;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation tag of the call being served
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

impl RequestId {
    /// The caller's tag, or a new UUID when it is absent or not printable.
    fn from_headers(headers: &HeaderMap) -> Self {
        let tag = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned);
        Self(tag.unwrap_or_else(|| Uuid::new_v4().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only missing when a route is mounted outside `track_request`.
        parts.extensions.get::<RequestId>().cloned().ok_or((
            StatusCode::INTERNAL_SERVER_ERROR,
            "request tracking layer is not installed",
        ))
    }
}

/// Tag, log, time and count one call.
///
/// ```no_run
/// use axum::{Router, middleware, routing::get};
/// use dice_server::api::request_id::track_request;
///
/// let app: Router = Router::new()
///     .route("/health", get(|| async { "ok" }))
///     .layer(middleware::from_fn(track_request));
/// ```
pub async fn track_request(mut request: Request, next: Next) -> Result<Response, StatusCode> {
    let id = RequestId::from_headers(request.headers());
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    tracing::info!(request_id = %id.as_str(), %method, uri = %request.uri(), "Request started");
    request.extensions_mut().insert(id.clone());

    let mut response = next.run(request).await;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    if let Ok(value) = HeaderValue::from_str(id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let status = response.status();
    tracing::info!(
        request_id = %id.as_str(),
        %status,
        duration_ms = elapsed_ms,
        "Request completed"
    );
    metrics::http_requests_total(method.as_str(), &path, status.as_u16());
    metrics::http_request_duration_ms(method.as_str(), &path, elapsed_ms);

    Ok(response)
}
