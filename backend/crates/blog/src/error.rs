//! Blog Error Types
//!
//! Blog-specific error variants that render through `kernel::error::AppError`.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Blog-specific error variants
#[derive(Debug, Error)]
pub enum BlogError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    #[error("Post not found")]
    PostNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    /// Unparsable id on a comment route (reported as a server error)
    #[error("Cast to identifier failed for value \"{0}\"")]
    MalformedId(String),

    /// Caller is not the sender (only when ownership is enforced)
    #[error("{0}")]
    Forbidden(&'static str),

    /// Failure while expanding a sender through the user store
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::Validation(_) => ErrorKind::BadRequest,
            BlogError::PostNotFound | BlogError::CommentNotFound => ErrorKind::NotFound,
            BlogError::Forbidden(_) => ErrorKind::Forbidden,
            BlogError::Auth(e) => e.kind(),
            BlogError::MalformedId(_)
            | BlogError::Database(_)
            | BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            BlogError::Auth(e) => e.to_app_error(),
            BlogError::Database(_) | BlogError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            BlogError::Auth(e) if e.kind().is_server_error() => {
                tracing::error!(error = %e, "User lookup failed");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for BlogError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => BlogError::Validation(err.message().to_string()),
            _ => BlogError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(BlogError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(BlogError::PostNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(BlogError::CommentNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            BlogError::MalformedId("123".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(BlogError::Forbidden("no").status_code(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_malformed_comment_id_keeps_its_message() {
        let app = BlogError::MalformedId("abc".into()).to_app_error();
        assert_eq!(app.status_code(), 500);
        assert!(app.message().contains("abc"));
    }

    #[test]
    fn test_store_failures_are_generic() {
        let app = BlogError::Auth(AuthError::Internal("pool closed".into())).to_app_error();
        assert_eq!(app.message(), "Internal server error");

        let app = BlogError::Internal("pool closed".into()).to_app_error();
        assert_eq!(app.message(), "Internal server error");
    }

    mod logging {
        use std::sync::{Arc, Mutex};

        use tracing::{Level, Subscriber};
        use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

        use super::*;

        #[derive(Clone, Default)]
        struct LevelCapture(Arc<Mutex<Vec<Level>>>);

        impl<S: Subscriber> Layer<S> for LevelCapture {
            fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                if let Ok(mut levels) = self.0.lock() {
                    levels.push(*event.metadata().level());
                }
            }
        }

        fn levels_logged_by(err: BlogError) -> Vec<Level> {
            let capture = LevelCapture::default();
            let subscriber = tracing_subscriber::registry().with(capture.clone());
            tracing::subscriber::with_default(subscriber, || err.log());
            let levels = capture.0.lock().unwrap().clone();
            levels
        }

        #[test]
        fn test_client_side_auth_errors_are_not_logged_as_errors() {
            assert_eq!(
                levels_logged_by(BlogError::Auth(AuthError::UserNotFound)),
                vec![Level::DEBUG]
            );
            assert_eq!(
                levels_logged_by(BlogError::Auth(AuthError::InvalidToken)),
                vec![Level::DEBUG]
            );
        }

        #[test]
        fn test_auth_store_failures_are_logged_as_errors() {
            assert_eq!(
                levels_logged_by(BlogError::Auth(AuthError::Internal("pool closed".into()))),
                vec![Level::ERROR]
            );
        }
    }
}
