//! Comment Entity

use auth::UserId;
use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId};

use crate::domain::value_object::comment_content::CommentContent;

/// A comment on a post
///
/// The post is not required to exist when the comment is written, and
/// deleting a post leaves its comments in place.
#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: CommentId,
    pub post_id: PostId,
    pub sender_id: UserId,
    pub content: CommentContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: PostId, sender_id: UserId, content: CommentContent) -> Self {
        let now = Utc::now();

        Self {
            comment_id: CommentId::new(),
            post_id,
            sender_id,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn edit(&mut self, content: Option<CommentContent>) {
        if let Some(content) = content {
            self.content = content;
        }
        self.updated_at = Utc::now();
    }

    pub fn is_sent_by(&self, user_id: &UserId) -> bool {
        &self.sender_id == user_id
    }
}
