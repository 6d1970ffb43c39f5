//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use auth::models::MessageResponse;
use auth::{AuthenticatedIdentity, UserRepository};
use kernel::extract::JsonBody;
use std::sync::Arc;

use crate::application::config::BlogConfig;
use crate::application::{
    CommentUseCase, CreateCommentInput, CreatePostInput, PostUseCase, UpdateCommentInput,
    UpdatePostInput,
};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::BlogResult;
use crate::presentation::dto::{
    CommentListQuery, CommentResponse, CreateCommentRequest, CreatePostRequest, PostListQuery,
    PostResponse, UpdateCommentRequest, UpdatePostRequest,
};

/// Shared state for post handlers
#[derive(Clone)]
pub struct PostAppState<P, U>
where
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    pub posts: Arc<P>,
    pub users: Arc<U>,
    pub config: Arc<BlogConfig>,
}

impl<P, U> PostAppState<P, U>
where
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    fn use_case(&self) -> PostUseCase<P, U> {
        PostUseCase::new(self.posts.clone(), self.users.clone(), self.config.clone())
    }
}

/// Shared state for comment handlers
#[derive(Clone)]
pub struct CommentAppState<C, P, U>
where
    C: CommentRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    pub comments: Arc<C>,
    pub posts: Arc<P>,
    pub users: Arc<U>,
    pub config: Arc<BlogConfig>,
}

impl<C, P, U> CommentAppState<C, P, U>
where
    C: CommentRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    fn use_case(&self) -> CommentUseCase<C, P, U> {
        CommentUseCase::new(
            self.comments.clone(),
            self.posts.clone(),
            self.users.clone(),
            self.config.clone(),
        )
    }
}

// ============================================================================
// Posts
// ============================================================================

/// GET /post
#[utoipa::path(
    get,
    path = "/post",
    params(PostListQuery),
    responses(
        (status = 200, description = "Posts with expanded sender", body = [PostResponse]),
        (status = 400, description = "Malformed sender id")
    ),
    tag = "Posts"
)]
pub async fn list_posts<P, U>(
    State(state): State<PostAppState<P, U>>,
    Query(query): Query<PostListQuery>,
) -> BlogResult<Json<Vec<PostResponse>>>
where
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let posts = state.use_case().list(query.sender).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// GET /post/{id}
#[utoipa::path(
    get,
    path = "/post/{id}",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post", body = PostResponse),
        (status = 404, description = "Post not found")
    ),
    tag = "Posts"
)]
pub async fn get_post<P, U>(
    State(state): State<PostAppState<P, U>>,
    Path(id): Path<String>,
) -> BlogResult<Json<PostResponse>>
where
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let post = state.use_case().get(&id).await?;
    Ok(Json(PostResponse::from(post)))
}

/// POST /post (protected)
#[utoipa::path(
    post,
    path = "/post",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created; sender is the caller", body = PostResponse),
        (status = 400, description = "Title missing"),
        (status = 401, description = "Missing or invalid access token")
    ),
    security(("bearerAuth" = [])),
    tag = "Posts"
)]
pub async fn create_post<P, U>(
    State(state): State<PostAppState<P, U>>,
    caller: AuthenticatedIdentity,
    JsonBody(req): JsonBody<CreatePostRequest>,
) -> BlogResult<impl IntoResponse>
where
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let post = state
        .use_case()
        .create(
            &caller,
            CreatePostInput {
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(post))))
}

/// PUT /post/{id} (protected)
#[utoipa::path(
    put,
    path = "/post/{id}",
    params(("id" = String, Path, description = "Post id")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Updated post", body = PostResponse),
        (status = 401, description = "Missing or invalid access token"),
        (status = 403, description = "Not the sender, when ownership is enforced"),
        (status = 404, description = "Post not found")
    ),
    security(("bearerAuth" = [])),
    tag = "Posts"
)]
pub async fn update_post<P, U>(
    State(state): State<PostAppState<P, U>>,
    caller: AuthenticatedIdentity,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdatePostRequest>,
) -> BlogResult<Json<PostResponse>>
where
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let post = state
        .use_case()
        .update(
            &caller,
            &id,
            UpdatePostInput {
                title: req.title,
                content: req.content,
            },
        )
        .await?;

    Ok(Json(PostResponse::from(post)))
}

/// DELETE /post/{id} (protected)
#[utoipa::path(
    delete,
    path = "/post/{id}",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid access token"),
        (status = 403, description = "Not the sender, when ownership is enforced"),
        (status = 404, description = "Post not found")
    ),
    security(("bearerAuth" = [])),
    tag = "Posts"
)]
pub async fn delete_post<P, U>(
    State(state): State<PostAppState<P, U>>,
    caller: AuthenticatedIdentity,
    Path(id): Path<String>,
) -> BlogResult<Json<MessageResponse>>
where
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let post_id = state.use_case().delete(&caller, &id).await?;
    Ok(Json(MessageResponse::new(format!(
        "Post with ID {} deleted successfully",
        post_id
    ))))
}

// ============================================================================
// Comments
// ============================================================================

/// GET /comment
#[utoipa::path(
    get,
    path = "/comment",
    params(CommentListQuery),
    responses((status = 200, description = "Comments with expanded post and sender", body = [CommentResponse])),
    tag = "Comments"
)]
pub async fn list_comments<C, P, U>(
    State(state): State<CommentAppState<C, P, U>>,
    Query(query): Query<CommentListQuery>,
) -> BlogResult<Json<Vec<CommentResponse>>>
where
    C: CommentRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let comments = state.use_case().list(query.post_id).await?;
    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// GET /comment/posts/{post_id}
#[utoipa::path(
    get,
    path = "/comment/posts/{post_id}",
    params(("post_id" = String, Path, description = "Post id")),
    responses((status = 200, description = "Comments on the post, possibly empty", body = [CommentResponse])),
    tag = "Comments"
)]
pub async fn list_comments_by_post<C, P, U>(
    State(state): State<CommentAppState<C, P, U>>,
    Path(post_id): Path<String>,
) -> BlogResult<Json<Vec<CommentResponse>>>
where
    C: CommentRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let comments = state.use_case().list_by_post(&post_id).await?;
    Ok(Json(comments.into_iter().map(CommentResponse::from).collect()))
}

/// GET /comment/{id}
#[utoipa::path(
    get,
    path = "/comment/{id}",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment", body = CommentResponse),
        (status = 404, description = "Comment not found")
    ),
    tag = "Comments"
)]
pub async fn get_comment<C, P, U>(
    State(state): State<CommentAppState<C, P, U>>,
    Path(id): Path<String>,
) -> BlogResult<Json<CommentResponse>>
where
    C: CommentRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let comment = state.use_case().get(&id).await?;
    Ok(Json(CommentResponse::from(comment)))
}

/// POST /comment (protected)
#[utoipa::path(
    post,
    path = "/comment",
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created; sender is the caller", body = CommentResponse),
        (status = 400, description = "postId or content missing"),
        (status = 401, description = "Missing or invalid access token")
    ),
    security(("bearerAuth" = [])),
    tag = "Comments"
)]
pub async fn create_comment<C, P, U>(
    State(state): State<CommentAppState<C, P, U>>,
    caller: AuthenticatedIdentity,
    JsonBody(req): JsonBody<CreateCommentRequest>,
) -> BlogResult<impl IntoResponse>
where
    C: CommentRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let comment = state
        .use_case()
        .create(
            &caller,
            CreateCommentInput {
                post_id: req.post_id,
                content: req.content,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

/// PUT /comment/{id} (protected)
#[utoipa::path(
    put,
    path = "/comment/{id}",
    params(("id" = String, Path, description = "Comment id")),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Updated comment", body = CommentResponse),
        (status = 400, description = "Content missing"),
        (status = 401, description = "Missing or invalid access token"),
        (status = 403, description = "Not the sender, when ownership is enforced"),
        (status = 404, description = "Comment not found")
    ),
    security(("bearerAuth" = [])),
    tag = "Comments"
)]
pub async fn update_comment<C, P, U>(
    State(state): State<CommentAppState<C, P, U>>,
    caller: AuthenticatedIdentity,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateCommentRequest>,
) -> BlogResult<Json<CommentResponse>>
where
    C: CommentRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    let comment = state
        .use_case()
        .update(&caller, &id, UpdateCommentInput { content: req.content })
        .await?;

    Ok(Json(CommentResponse::from(comment)))
}

/// DELETE /comment/{id} (protected)
#[utoipa::path(
    delete,
    path = "/comment/{id}",
    params(("id" = String, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid access token"),
        (status = 403, description = "Not the sender, when ownership is enforced"),
        (status = 404, description = "Comment not found")
    ),
    security(("bearerAuth" = [])),
    tag = "Comments"
)]
pub async fn delete_comment<C, P, U>(
    State(state): State<CommentAppState<C, P, U>>,
    caller: AuthenticatedIdentity,
    Path(id): Path<String>,
) -> BlogResult<Json<MessageResponse>>
where
    C: CommentRepository + Clone + Send + Sync + 'static,
    P: PostRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Clone + Send + Sync + 'static,
{
    state.use_case().delete(&caller, &id).await?;
    Ok(Json(MessageResponse::new("Comment deleted")))
}
