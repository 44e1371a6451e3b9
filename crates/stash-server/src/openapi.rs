use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stash API",
        version = "0.1.0",
        description = "Personal bookmarks behind JWT authentication."
    ),
    paths(
        crate::routes::signup,
        crate::routes::signin,
        crate::routes::get_me,
        crate::routes::edit_user,
        crate::routes::list_bookmarks,
        crate::routes::create_bookmark,
        crate::routes::get_bookmark,
        crate::routes::edit_bookmark,
        crate::routes::delete_bookmark,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::AuthRequest,
        crate::dto::TokenResponse,
        crate::dto::UserResponse,
        crate::dto::EditUserRequest,
        crate::dto::BookmarkResponse,
        crate::dto::CreateBookmarkRequest,
        crate::dto::EditBookmarkRequest,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Signup and signin"),
        (name = "users", description = "The authenticated user's profile"),
        (name = "bookmarks", description = "Bookmarks owned by the authenticated user"),
        (name = "system", description = "Health and system status"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Adds the Bearer token security scheme to the OpenAPI document.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token returned by /auth/signup or /auth/signin."))
                        .build(),
                ),
            );
        }
    }
}
