//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::extract::JsonBody;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, LogoutUseCase, RefreshTokenUseCase, RegisterInput, RegisterUseCase,
    UpdateUserInput, UserAccountUseCase,
};
use crate::domain::entity::identity::AuthenticatedIdentity;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AuthResponse, LoginRequest, MessageResponse, RefreshTokenRequest, RegisterRequest,
    TokenResponse, UpdateUserRequest, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /auth/register
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 409, description = "Email or username already taken")
    ),
    tag = "Auth"
)]
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            user_name: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse::from(&output.user),
            access_token: output.tokens.access_token,
            refresh_token: output.tokens.refresh_token,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing fields"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AuthResult<Json<AuthResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        user: UserResponse::from(&output.user),
        access_token: output.tokens.access_token,
        refresh_token: output.tokens.refresh_token,
    }))
}

// ============================================================================
// Logout / Refresh
// ============================================================================

/// POST /auth/logout
#[utoipa::path(
    post,
    path = "/auth/logout",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Refresh token revoked", body = MessageResponse),
        (status = 400, description = "Refresh token missing"),
        (status = 401, description = "Invalid refresh token")
    ),
    tag = "Auth"
)]
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<RefreshTokenRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = LogoutUseCase::new(state.repo.clone(), state.config.clone());
    use_case.execute(req.refresh_token).await?;

    Ok(Json(MessageResponse::new("Logout successful")))
}

/// POST /auth/refresh
#[utoipa::path(
    post,
    path = "/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "New token pair; the presented token is spent", body = TokenResponse),
        (status = 400, description = "Refresh token missing"),
        (status = 401, description = "Invalid or already used refresh token")
    ),
    tag = "Auth"
)]
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    JsonBody(req): JsonBody<RefreshTokenRequest>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = RefreshTokenUseCase::new(state.repo.clone(), state.config.clone());
    let tokens = use_case.execute(req.refresh_token).await?;

    Ok(Json(TokenResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}

// ============================================================================
// Users
// ============================================================================

/// GET /user
#[utoipa::path(
    get,
    path = "/user",
    responses((status = 200, description = "All users", body = [UserResponse])),
    tag = "Users"
)]
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
) -> AuthResult<Json<Vec<UserResponse>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let users = UserAccountUseCase::new(state.repo.clone()).list().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /user/profile (protected)
#[utoipa::path(
    get,
    path = "/user/profile",
    responses(
        (status = 200, description = "Caller's account", body = UserResponse),
        (status = 401, description = "Missing or invalid access token")
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn profile<R>(
    State(state): State<AuthAppState<R>>,
    caller: AuthenticatedIdentity,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = UserAccountUseCase::new(state.repo.clone())
        .profile(&caller)
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// GET /user/{id}
#[utoipa::path(
    get,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found")
    ),
    tag = "Users"
)]
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    Path(id): Path<String>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = UserAccountUseCase::new(state.repo.clone()).get(&id).await?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /user/{id} (protected, own account only)
#[utoipa::path(
    put,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User id; must be the caller's own")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 401, description = "Missing or invalid access token"),
        (status = 403, description = "Not the caller's account"),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email or username already taken")
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn update_user<R>(
    State(state): State<AuthAppState<R>>,
    caller: AuthenticatedIdentity,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateUserRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = UserAccountUseCase::new(state.repo.clone())
        .update(
            &caller,
            &id,
            UpdateUserInput {
                user_name: req.username,
                email: req.email,
            },
        )
        .await?;
    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /user/{id} (protected, own account only)
#[utoipa::path(
    delete,
    path = "/user/{id}",
    params(("id" = String, Path, description = "User id; must be the caller's own")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid access token"),
        (status = 403, description = "Not the caller's account"),
        (status = 404, description = "User not found")
    ),
    security(("bearerAuth" = [])),
    tag = "Users"
)]
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    caller: AuthenticatedIdentity,
    Path(id): Path<String>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    UserAccountUseCase::new(state.repo.clone())
        .delete(&caller, &id)
        .await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
