//! Post Entity

use auth::UserId;
use chrono::{DateTime, Utc};
use kernel::id::PostId;

use crate::domain::value_object::post_title::PostTitle;

/// A post written by one user
///
/// `sender_id` is a plain reference: the user may have been deleted since.
#[derive(Debug, Clone)]
pub struct Post {
    pub post_id: PostId,
    pub title: PostTitle,
    /// Optional body
    pub content: Option<String>,
    /// Author; set once at creation
    pub sender_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn new(title: PostTitle, content: Option<String>, sender_id: UserId) -> Self {
        let now = Utc::now();

        Self {
            post_id: PostId::new(),
            title,
            content,
            sender_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial edit; `None` leaves the field unchanged
    pub fn edit(&mut self, title: Option<PostTitle>, content: Option<String>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = content {
            self.content = Some(content);
        }
        self.updated_at = Utc::now();
    }

    pub fn is_sent_by(&self, user_id: &UserId) -> bool {
        &self.sender_id == user_id
    }
}
