//! Comment Content Value Object

use derive_more::Display;
use serde::{Deserialize, Serialize};

use kernel::error::app_error::{AppError, AppResult};

/// Non-empty comment body
///
/// Surrounding whitespace is dropped; inner formatting is kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
pub struct CommentContent(String);

impl CommentContent {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let trimmed = raw.as_ref().trim();

        if trimmed.is_empty() {
            return Err(AppError::bad_request("Content is required"));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_keeps_inner_lines() {
        let content = CommentContent::new("\n first\n\nsecond \n").unwrap();
        assert_eq!(content.as_str(), "first\n\nsecond");
    }

    #[test]
    fn test_empty_content_rejected() {
        assert!(CommentContent::new("").is_err());
        assert!(CommentContent::new(" \t").is_err());
    }
}
