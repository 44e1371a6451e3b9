use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use stash_core::{AppError, Store, User};

use crate::error::ApiError;
use crate::state::AppState;

/// The user resolved from the request's bearer token.
///
/// Inserted as a request extension by [`require_bearer`]; handlers behind the
/// guard take it as an extractor.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError(AppError::Unauthorized("missing credentials".to_string())))
    }
}

/// Pull the token out of `Authorization: Bearer <token>`. The scheme is case-insensitive.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| AppError::Unauthorized("missing credentials".to_string()))?
        .to_str()
        .map_err(|_| AppError::Unauthorized("malformed authorization header".to_string()))?;

    match value.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(AppError::Unauthorized(
            "malformed authorization header".to_string(),
        )),
    }
}

/// Middleware that verifies the bearer token and attaches the [`CurrentUser`].
pub async fn require_bearer<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .map(str::to_owned)
        .inspect_err(|e| {
            tracing::warn!(path = %request.uri().path(), reason = %e, "Rejected request");
        })?;

    let user = state.auth.authenticate(&token).await.inspect_err(|e| {
        if e.is_client_error() {
            tracing::warn!(path = %request.uri().path(), reason = %e, "Rejected request");
        }
    })?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}
