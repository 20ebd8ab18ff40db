use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use crate::http::server::ActuatorState;

/// Require `Authorization: Bearer <api_key>` when an api key is configured.
pub async fn actuator_auth_middleware(
    State(state): State<ActuatorState>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(api_key) = state.management.api_key.as_deref() else {
        return Ok(next.run(request).await);
    };

    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    if let Some(token) = auth_header.and_then(|v| v.strip_prefix("Bearer ")) {
        if token == api_key {
            return Ok(next.run(request).await);
        }
    }

    tracing::warn!(path = %request.uri().path(), "Rejected unauthenticated actuator request");
    Err(StatusCode::UNAUTHORIZED)
}
