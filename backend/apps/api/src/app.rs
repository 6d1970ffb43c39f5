//! Router Assembly

use std::sync::Arc;

use auth::router::{auth_router, auth_router_generic, user_router, user_router_generic};
use auth::{AuthConfig, MemoryAuthRepository, PgAuthRepository, UserRepository};
use axum::http::{HeaderValue, Method, header};
use axum::{Json, Router, routing::get};
use blog::presentation::router::{comment_router_generic, post_router_generic};
use blog::{
    BlogConfig, CommentRepository, MemoryCommentRepository, MemoryPostRepository,
    PgCommentRepository, PgPostRepository, PostRepository, comment_router, post_router,
};
use serde::Serialize;
use sqlx::PgPool;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use utoipa::ToSchema;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::{OPENAPI_JSON_PATH, SWAGGER_UI_PATH, api_doc};

pub const API_VERSION: &str = "2.0.0";

/// Where records live
pub enum Storage {
    Postgres(PgPool),
    /// Process-local; everything is lost on restart
    Memory,
}

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    message: String,
    version: String,
    /// Swagger UI location
    documentation: String,
}

/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = HealthResponse)),
    tag = "System"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Blog API is running".to_string(),
        version: API_VERSION.to_string(),
        documentation: SWAGGER_UI_PATH.to_string(),
    })
}

/// Build the full application router for the selected storage
pub fn build_router(
    storage: Storage,
    auth_config: Arc<AuthConfig>,
    blog_config: Arc<BlogConfig>,
) -> Router {
    match storage {
        Storage::Postgres(pool) => {
            let users = PgAuthRepository::new(pool.clone());
            let posts = PgPostRepository::new(pool.clone());
            let comments = PgCommentRepository::new(pool);

            compose(
                auth_router(users.clone(), auth_config.clone()),
                user_router(users.clone(), auth_config.clone()),
                post_router(
                    posts.clone(),
                    users.clone(),
                    auth_config.clone(),
                    blog_config.clone(),
                ),
                comment_router(comments, posts, users, auth_config, blog_config),
            )
        }
        Storage::Memory => generic_router(
            MemoryAuthRepository::new(),
            MemoryPostRepository::new(),
            MemoryCommentRepository::new(),
            auth_config,
            blog_config,
        ),
    }
}

/// Router over any repository implementations (in-memory at runtime)
pub fn generic_router<U, P, C>(
    users: U,
    posts: P,
    comments: C,
    auth_config: Arc<AuthConfig>,
    blog_config: Arc<BlogConfig>,
) -> Router
where
    U: UserRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    C: CommentRepository + Clone + Send + Sync + 'static,
{
    compose(
        auth_router_generic(users.clone(), auth_config.clone()),
        user_router_generic(users.clone(), auth_config.clone()),
        post_router_generic(
            posts.clone(),
            users.clone(),
            auth_config.clone(),
            blog_config.clone(),
        ),
        comment_router_generic(comments, posts, users, auth_config, blog_config),
    )
}

fn compose(auth: Router, user: Router, post: Router, comment: Router) -> Router {
    Router::new()
        .route("/", get(health))
        .nest("/auth", auth)
        .nest("/user", user)
        .nest("/post", post)
        .nest("/comment", comment)
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, api_doc()))
}

/// CORS for the configured frontend origins
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}
