use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use stash_core::Store;

use crate::auth::{CurrentUser, require_bearer};
use crate::dto::{
    AuthRequest, BookmarkResponse, CreateBookmarkRequest, EditBookmarkRequest, EditUserRequest,
    HealthResponse, TokenResponse, UserResponse,
};
use crate::error::ApiError;
use crate::extract::{JsonBody, PathParam};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full router with all routes and middleware.
pub fn router<S: Store>(state: Arc<AppState<S>>) -> Router {
    let api = Router::new()
        .route("/users/me", get(get_me))
        .route("/users", patch(edit_user::<S>))
        .route(
            "/bookmarks",
            get(list_bookmarks::<S>).post(create_bookmark::<S>),
        )
        .route(
            "/bookmarks/{id}",
            get(get_bookmark::<S>)
                .patch(edit_bookmark::<S>)
                .delete(delete_bookmark::<S>),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer::<S>,
        ));

    let public = Router::new()
        .route("/auth/signup", post(signup::<S>))
        .route("/auth/signin", post(signin::<S>))
        .route("/health", get(health::<S>))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    public.merge(api).with_state(state)
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[utoipa::path(
    post,
    path = "/auth/signup",
    request_body = AuthRequest,
    responses(
        (status = 201, description = "Account created", body = TokenResponse),
        (status = 400, description = "Invalid email or password", body = crate::dto::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::dto::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn signup<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(body): JsonBody<AuthRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.auth.signup(&body.email, &body.password).await?;
    Ok((StatusCode::CREATED, axum::Json(TokenResponse::from(token))))
}

#[utoipa::path(
    post,
    path = "/auth/signin",
    request_body = AuthRequest,
    responses(
        (status = 200, description = "Signed in", body = TokenResponse),
        (status = 400, description = "Missing email or password", body = crate::dto::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::dto::ErrorResponse),
    ),
    tag = "auth"
)]
pub async fn signin<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    JsonBody(body): JsonBody<AuthRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let token = state.auth.signin(&body.email, &body.password).await?;
    Ok(axum::Json(TokenResponse::from(token)))
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> axum::Json<UserResponse> {
    axum::Json(UserResponse::from(user))
}

#[utoipa::path(
    patch,
    path = "/users",
    request_body = EditUserRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Invalid email", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
        (status = 409, description = "Email already registered", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn edit_user<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    JsonBody(body): JsonBody<EditUserRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state.users.edit(user.id, body.into()).await?;
    Ok(axum::Json(UserResponse::from(updated)))
}

// ---------------------------------------------------------------------------
// Bookmarks
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/bookmarks",
    responses(
        (status = 200, description = "Bookmarks owned by the caller", body = Vec<BookmarkResponse>),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "bookmarks"
)]
pub async fn list_bookmarks<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, ApiError> {
    let bookmarks = state.bookmarks.list(user.id).await?;
    let response: Vec<BookmarkResponse> = bookmarks.into_iter().map(Into::into).collect();
    Ok(axum::Json(response))
}

#[utoipa::path(
    post,
    path = "/bookmarks",
    request_body = CreateBookmarkRequest,
    responses(
        (status = 201, description = "Bookmark created", body = BookmarkResponse),
        (status = 400, description = "Invalid title or link", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "bookmarks"
)]
pub async fn create_bookmark<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    JsonBody(body): JsonBody<CreateBookmarkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let bookmark = state.bookmarks.create(user.id, body.into()).await?;
    Ok((
        StatusCode::CREATED,
        axum::Json(BookmarkResponse::from(bookmark)),
    ))
}

#[utoipa::path(
    get,
    path = "/bookmarks/{id}",
    params(("id" = Uuid, Path, description = "Bookmark ID")),
    responses(
        (status = 200, description = "Bookmark", body = BookmarkResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
        (status = 404, description = "Bookmark not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "bookmarks"
)]
pub async fn get_bookmark<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let bookmark = state.bookmarks.get(user.id, id).await?;
    Ok(axum::Json(BookmarkResponse::from(bookmark)))
}

#[utoipa::path(
    patch,
    path = "/bookmarks/{id}",
    params(("id" = Uuid, Path, description = "Bookmark ID")),
    request_body = EditBookmarkRequest,
    responses(
        (status = 200, description = "Updated bookmark", body = BookmarkResponse),
        (status = 400, description = "Invalid title or link", body = crate::dto::ErrorResponse),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
        (status = 404, description = "Bookmark not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "bookmarks"
)]
pub async fn edit_bookmark<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    PathParam(id): PathParam<Uuid>,
    JsonBody(body): JsonBody<EditBookmarkRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let bookmark = state.bookmarks.edit(user.id, id, body.into()).await?;
    Ok(axum::Json(BookmarkResponse::from(bookmark)))
}

#[utoipa::path(
    delete,
    path = "/bookmarks/{id}",
    params(("id" = Uuid, Path, description = "Bookmark ID")),
    responses(
        (status = 204, description = "Bookmark deleted"),
        (status = 401, description = "Unauthorized", body = crate::dto::ErrorResponse),
        (status = 404, description = "Bookmark not found", body = crate::dto::ErrorResponse),
    ),
    security(("bearer" = [])),
    tag = "bookmarks"
)]
pub async fn delete_bookmark<S: Store>(
    State(state): State<Arc<AppState<S>>>,
    CurrentUser(user): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.bookmarks.delete(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse),
    ),
    tag = "system"
)]
pub async fn health<S: Store>(State(state): State<Arc<AppState<S>>>) -> impl IntoResponse {
    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            axum::Json(HealthResponse {
                status: "healthy".to_string(),
                database: "ok".to_string(),
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                axum::Json(HealthResponse {
                    status: "unhealthy".to_string(),
                    database: "error".to_string(),
                }),
            )
        }
    }
}
