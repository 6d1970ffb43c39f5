//! User Name Value Object
//!
//! ユーザー名はユーザーを識別する公開ハンドル。
//! 一意性はストア側（unique 制約 / 登録前の存在確認）で保証する。
//!
//! ## 不変条件
//! - 前後の空白は除去される
//! - 長さ: 1〜64文字（除去後、Unicode コードポイント数）
//! - 制御文字を含まない
//! - 大文字小文字は区別する（正規化しない）

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use kernel::error::app_error::AppError;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserNameError {
    #[error("Username cannot be empty")]
    Empty,

    #[error("Username must be at most {max} characters (got {length})")]
    TooLong { length: usize, max: usize },

    #[error("Username contains invalid control characters")]
    ControlCharacter,
}

impl From<UserNameError> for AppError {
    fn from(err: UserNameError) -> Self {
        AppError::bad_request(err.to_string())
    }
}

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserNameError> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = trimmed.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(UserNameError::ControlCharacter);
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        let name = UserName::new("  alice  ").unwrap();
        assert_eq!(name.as_str(), "alice");
    }

    #[test]
    fn test_case_is_preserved() {
        let name = UserName::new("Alice").unwrap();
        assert_eq!(name.to_string(), "Alice");
    }

    #[test]
    fn test_empty() {
        assert_eq!(UserName::new(""), Err(UserNameError::Empty));
        assert_eq!(UserName::new("   "), Err(UserNameError::Empty));
    }

    #[test]
    fn test_too_long() {
        let long = "x".repeat(USER_NAME_MAX_LENGTH + 1);
        assert!(matches!(
            UserName::new(long),
            Err(UserNameError::TooLong { .. })
        ));
        assert!(UserName::new("x".repeat(USER_NAME_MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_control_character() {
        assert_eq!(
            UserName::new("ali\u{0000}ce"),
            Err(UserNameError::ControlCharacter)
        );
    }

    #[test]
    fn test_unicode_allowed() {
        assert!(UserName::new("山田太郎").is_ok());
    }
}
