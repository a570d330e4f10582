use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::{ApiError, ErrorVerbosityProvider, MethodNotAllowedError};

/// Replaces axum's empty `405` response with an [`ApiError`] body, keeping the `Allow` header.
pub async fn method_not_allowed<S: ErrorVerbosityProvider>(
    State(state): State<S>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let resp = next.run(req).await;

    if resp.status() != StatusCode::METHOD_NOT_ALLOWED {
        return resp;
    }

    tracing::debug!(%method, "Method not allowed");

    let allow = resp.headers().get(header::ALLOW).cloned();
    let mut resp =
        ApiError::from(MethodNotAllowedError::new(state.error_verbosity())).into_response();

    if let Some(allow) = allow {
        resp.headers_mut().insert(header::ALLOW, allow);
    }

    resp
}
