//! JSON 抽出器
//!
//! axum の `Json` 拒否（Content-Type 不一致・構文エラー・型不一致）を
//! [`AppError`] の 400 に変換し、エラーボディの形式を統一します。

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::app_error::AppError;

/// `Json<T>` と同等だが、拒否時に [`AppError`] を返す抽出器
///
/// ## Examples
/// ```rust,ignore
/// async fn handler(JsonBody(req): JsonBody<LoginRequest>) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(rejection_to_error(rejection)),
        }
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    let message = rejection.body_text();
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::bad_request(message).with_action("Send the body as application/json")
        }
        _ => AppError::bad_request(message),
    }
}
