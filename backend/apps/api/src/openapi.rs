//! OpenAPI / Swagger UI Documentation
//!
//! - Swagger UI: `/api-docs`
//! - OpenAPI JSON: `/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::app::{API_VERSION, HealthResponse};

pub const SWAGGER_UI_PATH: &str = "/api-docs";
pub const OPENAPI_JSON_PATH: &str = "/openapi.json";

/// Access token in `Authorization: Bearer <token>`
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog API",
        description = "REST API with JWT authentication for users, posts and comments"
    ),
    paths(
        crate::app::health,
        auth::presentation::handlers::register,
        auth::presentation::handlers::login,
        auth::presentation::handlers::logout,
        auth::presentation::handlers::refresh,
        auth::presentation::handlers::list_users,
        auth::presentation::handlers::profile,
        auth::presentation::handlers::get_user,
        auth::presentation::handlers::update_user,
        auth::presentation::handlers::delete_user,
        blog::presentation::handlers::list_posts,
        blog::presentation::handlers::get_post,
        blog::presentation::handlers::create_post,
        blog::presentation::handlers::update_post,
        blog::presentation::handlers::delete_post,
        blog::presentation::handlers::list_comments,
        blog::presentation::handlers::list_comments_by_post,
        blog::presentation::handlers::get_comment,
        blog::presentation::handlers::create_comment,
        blog::presentation::handlers::update_comment,
        blog::presentation::handlers::delete_comment,
    ),
    components(schemas(HealthResponse)),
    modifiers(&BearerAuth),
    tags(
        (name = "Auth", description = "Registration, login and token lifecycle"),
        (name = "Users", description = "User accounts"),
        (name = "Posts", description = "Blog posts"),
        (name = "Comments", description = "Comments on posts"),
        (name = "System", description = "Health check")
    )
)]
pub struct ApiDoc;

/// Generated document, stamped with the running API version
pub fn api_doc() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.info.version = API_VERSION.to_string();
    doc
}
