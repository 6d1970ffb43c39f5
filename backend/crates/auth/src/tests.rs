//! Unit tests for the auth crate
//! Use cases run against the in-memory repository.

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use crate::application::config::AuthConfig;
    use crate::application::{RegisterInput, RegisterOutput, RegisterUseCase};
    use crate::infra::memory::MemoryAuthRepository;

    pub fn config() -> Arc<AuthConfig> {
        Arc::new(AuthConfig::with_random_secrets())
    }

    pub fn input(user_name: &str, email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            user_name: Some(user_name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    pub async fn register(
        repo: &Arc<MemoryAuthRepository>,
        config: &Arc<AuthConfig>,
        user_name: &str,
        email: &str,
    ) -> RegisterOutput {
        RegisterUseCase::new(repo.clone(), config.clone())
            .execute(input(user_name, email, "secret"))
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod register_tests {
    use std::sync::Arc;

    use super::support::*;
    use crate::application::{RegisterInput, RegisterUseCase, TokenIssuer};
    use crate::domain::repository::UserRepository;
    use crate::error::AuthError;
    use crate::infra::memory::MemoryAuthRepository;

    #[tokio::test]
    async fn test_register_issues_and_persists_tokens() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = config();

        let output = register(&repo, &config, "alice", "Alice@Example.com").await;

        assert_eq!(output.user.email.as_str(), "alice@example.com");
        let stored = repo.find_by_id(&output.user.user_id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_tokens, vec![output.tokens.refresh_token.clone()]);

        let issuer = TokenIssuer::new(config);
        assert_eq!(
            issuer.verify_access(&output.tokens.access_token).unwrap(),
            output.user.user_id
        );
    }

    #[tokio::test]
    async fn test_duplicate_email_or_user_name_conflicts() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = config();
        register(&repo, &config, "alice", "alice@example.com").await;

        let use_case = RegisterUseCase::new(repo.clone(), config.clone());

        let same_email = use_case
            .execute(input("bob", "ALICE@example.com", "other-password"))
            .await;
        assert!(matches!(same_email, Err(AuthError::UserAlreadyExists)));

        let same_name = use_case
            .execute(input("alice", "bob@example.com", "other-password"))
            .await;
        assert!(matches!(same_name, Err(AuthError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let use_case = RegisterUseCase::new(repo.clone(), config());

        let missing = use_case
            .execute(RegisterInput {
                user_name: Some("alice".to_string()),
                email: None,
                password: Some("pw".to_string()),
            })
            .await;
        assert!(matches!(missing, Err(AuthError::Validation(ref m)) if m == "All fields are required"));

        let empty = use_case.execute(input("alice", "alice@example.com", "")).await;
        assert!(matches!(empty, Err(AuthError::Validation(_))));

        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_email_format() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let use_case = RegisterUseCase::new(repo, config());

        let result = use_case.execute(input("alice", "not-an-email", "pw")).await;
        assert!(matches!(result, Err(AuthError::Validation(_))));
    }
}

#[cfg(test)]
mod login_tests {
    use std::sync::Arc;

    use super::support::*;
    use crate::application::{LoginInput, LoginUseCase};
    use crate::domain::repository::UserRepository;
    use crate::error::AuthError;
    use crate::infra::memory::MemoryAuthRepository;

    fn login(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[tokio::test]
    async fn test_login_appends_refresh_token() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = config();
        let registered = register(&repo, &config, "alice", "alice@example.com").await;

        let output = LoginUseCase::new(repo.clone(), config)
            .execute(login("ALICE@example.com", "secret"))
            .await
            .unwrap();

        let stored = repo.find_by_id(&registered.user.user_id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_tokens.len(), 2);
        assert!(stored.has_refresh_token(&output.tokens.refresh_token));
        assert!(stored.has_refresh_token(&registered.tokens.refresh_token));
    }

    #[tokio::test]
    async fn test_unknown_user_and_wrong_password_are_indistinguishable() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = config();
        register(&repo, &config, "alice", "alice@example.com").await;

        let use_case = LoginUseCase::new(repo, config);

        let wrong_password = use_case
            .execute(login("alice@example.com", "nope"))
            .await
            .err()
            .unwrap();
        let unknown_user = use_case
            .execute(login("nobody@example.com", "secret"))
            .await
            .err()
            .unwrap();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(
            wrong_password.to_app_error().message(),
            unknown_user.to_app_error().message()
        );
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let use_case = LoginUseCase::new(Arc::new(MemoryAuthRepository::new()), config());

        let result = use_case
            .execute(LoginInput {
                email: Some("alice@example.com".to_string()),
                password: None,
            })
            .await;
        assert!(
            matches!(result, Err(AuthError::Validation(ref m)) if m == "Email and password are required")
        );
    }
}

#[cfg(test)]
mod token_lifecycle_tests {
    use std::sync::Arc;

    use super::support::*;
    use crate::application::{LogoutUseCase, RefreshTokenUseCase, TokenIssuer};
    use crate::domain::repository::UserRepository;
    use crate::error::AuthError;
    use crate::infra::memory::MemoryAuthRepository;

    #[tokio::test]
    async fn test_refresh_rotates_and_rejects_reuse() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = config();
        let registered = register(&repo, &config, "alice", "alice@example.com").await;
        let old = registered.tokens.refresh_token.clone();

        let use_case = RefreshTokenUseCase::new(repo.clone(), config);

        let rotated = use_case.execute(Some(old.clone())).await.unwrap();
        assert_ne!(rotated.refresh_token, old);

        let stored = repo.find_by_id(&registered.user.user_id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_tokens, vec![rotated.refresh_token.clone()]);

        let reused = use_case.execute(Some(old)).await;
        assert!(matches!(reused, Err(AuthError::RefreshTokenReused { .. })));

        // The new token still works
        assert!(use_case.execute(Some(rotated.refresh_token)).await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_then_refresh_fails() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = config();
        let registered = register(&repo, &config, "alice", "alice@example.com").await;
        let token = registered.tokens.refresh_token;

        LogoutUseCase::new(repo.clone(), config.clone())
            .execute(Some(token.clone()))
            .await
            .unwrap();

        let stored = repo.find_by_id(&registered.user.user_id).await.unwrap().unwrap();
        assert!(stored.refresh_tokens.is_empty());

        let result = RefreshTokenUseCase::new(repo.clone(), config.clone())
            .execute(Some(token.clone()))
            .await;
        assert!(matches!(result, Err(AuthError::RefreshTokenReused { .. })));

        // Logging out twice is harmless
        assert!(LogoutUseCase::new(repo, config).execute(Some(token)).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_and_invalid_tokens() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = config();
        let registered = register(&repo, &config, "alice", "alice@example.com").await;

        let refresh = RefreshTokenUseCase::new(repo.clone(), config.clone());
        let logout = LogoutUseCase::new(repo.clone(), config.clone());

        assert!(matches!(refresh.execute(None).await, Err(AuthError::Validation(_))));
        assert!(matches!(logout.execute(Some(String::new())).await, Err(AuthError::Validation(_))));

        assert!(matches!(
            refresh.execute(Some("garbage".to_string())).await,
            Err(AuthError::InvalidToken)
        ));

        // An access token is not a refresh token
        assert!(matches!(
            logout.execute(Some(registered.tokens.access_token)).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_refresh_for_deleted_user() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = config();
        let registered = register(&repo, &config, "alice", "alice@example.com").await;

        repo.delete(&registered.user.user_id).await.unwrap();

        let result = RefreshTokenUseCase::new(repo, config)
            .execute(Some(registered.tokens.refresh_token))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidRefreshToken)));
    }

    /// Two rotations that read the same record race; the later write wins
    /// and the token appended by the earlier one is silently lost.
    #[tokio::test]
    async fn test_concurrent_rotation_is_last_write_wins() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = config();
        let registered = register(&repo, &config, "alice", "alice@example.com").await;
        let user_id = registered.user.user_id;
        let shared = registered.tokens.refresh_token;
        let issuer = TokenIssuer::new(config.clone());

        let mut first = repo.find_by_id(&user_id).await.unwrap().unwrap();
        let mut second = repo.find_by_id(&user_id).await.unwrap().unwrap();

        let first_pair = issuer.issue_pair(&user_id).unwrap();
        let second_pair = issuer.issue_pair(&user_id).unwrap();

        first.rotate_refresh_token(&shared, first_pair.refresh_token.clone());
        second.rotate_refresh_token(&shared, second_pair.refresh_token.clone());

        assert!(repo.update(&first).await.unwrap());
        assert!(repo.update(&second).await.unwrap());

        let stored = repo.find_by_id(&user_id).await.unwrap().unwrap();
        assert_eq!(stored.refresh_tokens, vec![second_pair.refresh_token]);

        let lost = RefreshTokenUseCase::new(repo, config)
            .execute(Some(first_pair.refresh_token))
            .await;
        assert!(matches!(lost, Err(AuthError::RefreshTokenReused { .. })));
    }
}

#[cfg(test)]
mod authenticate_tests {
    use std::sync::Arc;

    use axum::http::{HeaderMap, HeaderValue, header};

    use super::support::*;
    use crate::application::AuthenticateUseCase;
    use crate::domain::repository::UserRepository;
    use crate::error::AuthError;
    use crate::infra::memory::MemoryAuthRepository;

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_valid_access_token_resolves_identity() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = config();
        let registered = register(&repo, &config, "alice", "alice@example.com").await;

        let identity = AuthenticateUseCase::new(repo, config)
            .execute(&bearer(&registered.tokens.access_token))
            .await
            .unwrap();

        assert_eq!(identity.user_id, registered.user.user_id);
        assert_eq!(identity.user_name.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_rejections() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = config();
        let registered = register(&repo, &config, "alice", "alice@example.com").await;
        let use_case = AuthenticateUseCase::new(repo.clone(), config);

        assert!(matches!(
            use_case.execute(&HeaderMap::new()).await,
            Err(AuthError::MissingToken)
        ));

        let mut basic = HeaderMap::new();
        basic.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(matches!(use_case.execute(&basic).await, Err(AuthError::MissingToken)));

        assert!(matches!(
            use_case.execute(&bearer("garbage")).await,
            Err(AuthError::InvalidToken)
        ));

        // Refresh tokens are signed with the other secret
        assert!(matches!(
            use_case.execute(&bearer(&registered.tokens.refresh_token)).await,
            Err(AuthError::InvalidToken)
        ));

        repo.delete(&registered.user.user_id).await.unwrap();
        assert!(matches!(
            use_case.execute(&bearer(&registered.tokens.access_token)).await,
            Err(AuthError::InvalidToken)
        ));
    }
}

#[cfg(test)]
mod user_account_tests {
    use std::sync::Arc;

    use super::support::*;
    use crate::application::{UpdateUserInput, UserAccountUseCase};
    use crate::error::AuthError;
    use crate::infra::memory::MemoryAuthRepository;

    #[tokio::test]
    async fn test_update_own_profile() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = config();
        let alice = register(&repo, &config, "alice", "alice@example.com").await;
        let use_case = UserAccountUseCase::new(repo);

        let updated = use_case
            .update(
                &alice.user.identity(),
                &alice.user.user_id.to_string(),
                UpdateUserInput {
                    user_name: Some("alice2".to_string()),
                    email: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.user_name.as_str(), "alice2");
        assert_eq!(updated.email.as_str(), "alice@example.com");
    }

    #[tokio::test]
    async fn test_cannot_touch_other_account() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = config();
        let alice = register(&repo, &config, "alice", "alice@example.com").await;
        let bob = register(&repo, &config, "bob", "bob@example.com").await;
        let use_case = UserAccountUseCase::new(repo);

        let update = use_case
            .update(
                &alice.user.identity(),
                &bob.user.user_id.to_string(),
                UpdateUserInput::default(),
            )
            .await;
        assert!(matches!(update, Err(AuthError::Forbidden(_))));

        let delete = use_case
            .delete(&alice.user.identity(), &bob.user.user_id.to_string())
            .await;
        assert!(matches!(delete, Err(AuthError::Forbidden(_))));

        let malformed = use_case.delete(&alice.user.identity(), "123").await;
        assert!(matches!(malformed, Err(AuthError::Forbidden(_))));

        assert!(use_case.get(&bob.user.user_id.to_string()).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = config();
        let alice = register(&repo, &config, "alice", "alice@example.com").await;
        register(&repo, &config, "bob", "bob@example.com").await;
        let use_case = UserAccountUseCase::new(repo);

        let result = use_case
            .update(
                &alice.user.identity(),
                &alice.user.user_id.to_string(),
                UpdateUserInput {
                    user_name: None,
                    email: Some("bob@example.com".to_string()),
                },
            )
            .await;
        assert!(matches!(result, Err(AuthError::UserAlreadyExists)));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let repo = Arc::new(MemoryAuthRepository::new());
        let config = config();
        let alice = register(&repo, &config, "alice", "alice@example.com").await;
        let use_case = UserAccountUseCase::new(repo);
        let id = alice.user.user_id.to_string();

        use_case.delete(&alice.user.identity(), &id).await.unwrap();

        assert!(matches!(use_case.get(&id).await, Err(AuthError::UserNotFound)));
        assert!(matches!(
            use_case.profile(&alice.user.identity()).await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(use_case.get("not-a-uuid").await, Err(AuthError::UserNotFound)));
    }
}

#[cfg(test)]
mod router_tests {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::config;
    use crate::infra::memory::MemoryAuthRepository;
    use crate::presentation::router::{auth_router_generic, user_router_generic};

    fn app() -> Router {
        let repo = MemoryAuthRepository::new();
        let config = config();
        Router::new()
            .nest("/auth", auth_router_generic(repo.clone(), config.clone()))
            .nest("/user", user_router_generic(repo, config))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_login_refresh_logout() {
        let app = app();

        let (status, body) = send(
            &app,
            post(
                "/auth/register",
                json!({"username": "alice", "email": "alice@example.com", "password": "pw"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User registered successfully");
        assert_eq!(body["user"]["username"], "alice");
        assert!(body["user"]["_id"].is_string());
        assert!(body["user"].get("password").is_none());

        let (status, body) = send(
            &app,
            post("/auth/login", json!({"email": "alice@example.com", "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Login successful");
        let refresh_token = body["refreshToken"].as_str().unwrap().to_string();

        let (status, body) =
            send(&app, post("/auth/refresh", json!({"refreshToken": refresh_token}))).await;
        assert_eq!(status, StatusCode::OK);
        let rotated = body["refreshToken"].as_str().unwrap().to_string();
        assert!(body["accessToken"].is_string());

        let (status, body) =
            send(&app, post("/auth/refresh", json!({"refreshToken": refresh_token}))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid refresh token");

        let (status, body) =
            send(&app, post("/auth/logout", json!({"refreshToken": rotated}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Logout successful");
    }

    #[tokio::test]
    async fn test_register_errors() {
        let app = app();

        let (status, body) = send(&app, post("/auth/register", json!({"username": "alice"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "All fields are required");

        let user = json!({"username": "alice", "email": "alice@example.com", "password": "pw"});
        send(&app, post("/auth/register", user.clone())).await;
        let (status, body) = send(&app, post("/auth/register", user)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "User with this email or username already exists");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = app();
        let request = Request::post("/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].is_string());
    }

    #[tokio::test]
    async fn test_profile_requires_bearer() {
        let app = app();

        let (status, body) = send(
            &app,
            Request::get("/user/profile").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "No token provided");

        let (status, body) = send(
            &app,
            Request::get("/user/profile")
                .header(header::AUTHORIZATION, "Bearer nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid token");
    }

    #[tokio::test]
    async fn test_user_routes() {
        let app = app();

        let (_, alice) = send(
            &app,
            post(
                "/auth/register",
                json!({"username": "alice", "email": "alice@example.com", "password": "pw"}),
            ),
        )
        .await;
        let (_, bob) = send(
            &app,
            post(
                "/auth/register",
                json!({"username": "bob", "email": "bob@example.com", "password": "pw"}),
            ),
        )
        .await;
        let alice_token = format!("Bearer {}", alice["accessToken"].as_str().unwrap());
        let alice_id = alice["user"]["_id"].as_str().unwrap();
        let bob_id = bob["user"]["_id"].as_str().unwrap();

        let (status, body) =
            send(&app, Request::get("/user").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (status, body) = send(
            &app,
            Request::get("/user/profile")
                .header(header::AUTHORIZATION, &alice_token)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["_id"], alice_id);

        let (status, body) = send(
            &app,
            Request::put(format!("/user/{}", bob_id))
                .header(header::AUTHORIZATION, &alice_token)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"username": "mallory"}).to_string()))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "You can only update your own profile");

        let (status, body) = send(
            &app,
            Request::put(format!("/user/{}", alice_id))
                .header(header::AUTHORIZATION, &alice_token)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({"username": "alice2"}).to_string()))
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["username"], "alice2");

        let (status, _) = send(
            &app,
            Request::get("/user/not-a-uuid").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(
            &app,
            Request::delete(format!("/user/{}", alice_id))
                .header(header::AUTHORIZATION, &alice_token)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User deleted successfully");

        let (status, _) = send(
            &app,
            Request::get(format!("/user/{}", alice_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
