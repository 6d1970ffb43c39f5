//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_auth};

/// Create the Auth router (`/register`, `/login`, `/logout`, `/refresh`)
/// with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: Arc<AuthConfig>) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        config,
    };

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/refresh", post(handlers::refresh::<R>))
        .with_state(state)
}

/// Create the User router with PostgreSQL repository
pub fn user_router(repo: PgAuthRepository, config: Arc<AuthConfig>) -> Router {
    user_router_generic(repo, config)
}

/// Create a generic User router (`/`, `/profile`, `/{id}`)
///
/// Profile, update and delete sit behind [`require_auth`].
pub fn user_router_generic<R>(repo: R, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let repo = Arc::new(repo);
    let gate = from_fn_with_state(
        AuthMiddlewareState {
            repo: repo.clone(),
            config: config.clone(),
        },
        require_auth::<R>,
    );
    let state = AuthAppState { repo, config };

    Router::new()
        .route("/", get(handlers::list_users::<R>))
        .route(
            "/profile",
            get(handlers::profile::<R>).route_layer(gate.clone()),
        )
        .route(
            "/{id}",
            get(handlers::get_user::<R>).merge(
                put(handlers::update_user::<R>)
                    .delete(handlers::delete_user::<R>)
                    .route_layer(gate),
            ),
        )
        .with_state(state)
}
