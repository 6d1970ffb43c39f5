//! Blog Routers
//!
//! Reads are public. Writes sit behind the auth gate, which resolves the
//! bearer token against the user store before the handler runs.

use auth::AuthConfig;
use auth::middleware::{AuthMiddlewareState, require_auth};
use auth::{PgAuthRepository, UserRepository};
use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::BlogConfig;
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::infra::postgres::{PgCommentRepository, PgPostRepository};
use crate::presentation::handlers::{self, CommentAppState, PostAppState};

/// Create the Post router with PostgreSQL repositories
pub fn post_router(
    posts: PgPostRepository,
    users: PgAuthRepository,
    auth_config: Arc<AuthConfig>,
    config: Arc<BlogConfig>,
) -> Router {
    post_router_generic(posts, users, auth_config, config)
}

/// Create a generic Post router (`/`, `/{id}`)
pub fn post_router_generic<P, U>(
    posts: P,
    users: U,
    auth_config: Arc<AuthConfig>,
    config: Arc<BlogConfig>,
) -> Router
where
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let users = Arc::new(users);
    let gate = from_fn_with_state(
        AuthMiddlewareState {
            repo: users.clone(),
            config: auth_config,
        },
        require_auth::<U>,
    );
    let state = PostAppState {
        posts: Arc::new(posts),
        users,
        config,
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_posts::<P, U>)
                .merge(post(handlers::create_post::<P, U>).route_layer(gate.clone())),
        )
        .route(
            "/{id}",
            get(handlers::get_post::<P, U>).merge(
                put(handlers::update_post::<P, U>)
                    .delete(handlers::delete_post::<P, U>)
                    .route_layer(gate),
            ),
        )
        .with_state(state)
}

/// Create the Comment router with PostgreSQL repositories
pub fn comment_router(
    comments: PgCommentRepository,
    posts: PgPostRepository,
    users: PgAuthRepository,
    auth_config: Arc<AuthConfig>,
    config: Arc<BlogConfig>,
) -> Router {
    comment_router_generic(comments, posts, users, auth_config, config)
}

/// Create a generic Comment router (`/`, `/posts/{post_id}`, `/{id}`)
pub fn comment_router_generic<C, P, U>(
    comments: C,
    posts: P,
    users: U,
    auth_config: Arc<AuthConfig>,
    config: Arc<BlogConfig>,
) -> Router
where
    C: CommentRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let users = Arc::new(users);
    let gate = from_fn_with_state(
        AuthMiddlewareState {
            repo: users.clone(),
            config: auth_config,
        },
        require_auth::<U>,
    );
    let state = CommentAppState {
        comments: Arc::new(comments),
        posts: Arc::new(posts),
        users,
        config,
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_comments::<C, P, U>)
                .merge(post(handlers::create_comment::<C, P, U>).route_layer(gate.clone())),
        )
        .route(
            "/posts/{post_id}",
            get(handlers::list_comments_by_post::<C, P, U>),
        )
        .route(
            "/{id}",
            get(handlers::get_comment::<C, P, U>).merge(
                put(handlers::update_comment::<C, P, U>)
                    .delete(handlers::delete_comment::<C, P, U>)
                    .route_layer(gate),
            ),
        )
        .with_state(state)
}
