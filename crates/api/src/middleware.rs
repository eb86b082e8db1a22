use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use ballotgate_auth::{AuthError, SessionTokenCodec, extract_bearer};

use crate::app::errors::ApiError;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub codec: Arc<SessionTokenCodec>,
}

/// Validate the bearer token and attach the caller's [`PrincipalContext`].
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let principal = state.codec.decode(token).map_err(|e| {
        tracing::info!(reason = %e, path = %req.uri().path(), "rejected session token");
        e
    })?;

    req.extensions_mut().insert(PrincipalContext::new(principal));

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let header = match headers.get(axum::http::header::AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| AuthError::InvalidToken)?),
        None => None,
    };
    extract_bearer(header)
}
