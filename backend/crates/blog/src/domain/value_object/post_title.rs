//! Post Title Value Object

use derive_more::Display;
use serde::{Deserialize, Serialize};

use kernel::error::app_error::{AppError, AppResult};

/// Non-empty post title, trimmed
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
pub struct PostTitle(String);

impl PostTitle {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(AppError::bad_request("Title is required"));
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
