//! Data Transfer Objects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::expand::{CommentView, PostSummary, PostView, SenderSummary};

// ============================================================================
// Embedded references
// ============================================================================

/// Expanded `sender`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SenderResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

impl From<SenderSummary> for SenderResponse {
    fn from(sender: SenderSummary) -> Self {
        Self {
            id: sender.user_id.into_uuid(),
            username: sender.user_name,
            email: sender.email,
        }
    }
}

/// Expanded `postId`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PostRefResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
}

impl From<PostSummary> for PostRefResponse {
    fn from(post: PostSummary) -> Self {
        Self {
            id: post.post_id.into_uuid(),
            title: post.title,
        }
    }
}

// ============================================================================
// Posts
// ============================================================================

/// `?sender=<user id>`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostListQuery {
    pub sender: Option<String>,
}

/// Create post request; any `sender` in the body is ignored
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    /// `null` when the sender no longer exists
    pub sender: Option<SenderResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostView> for PostResponse {
    fn from(view: PostView) -> Self {
        let PostView { post, sender } = view;
        Self {
            id: post.post_id.into_uuid(),
            title: post.title.to_string(),
            content: post.content,
            sender: sender.map(SenderResponse::from),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

// ============================================================================
// Comments
// ============================================================================

/// `?postId=<post id>`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct CommentListQuery {
    pub post_id: Option<String>,
}

/// Create comment request; any `sender` in the body is ignored
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub post_id: Option<String>,
    pub content: Option<String>,
}

/// Only `content` can change
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateCommentRequest {
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// Expanded post, `null` when the post no longer exists
    pub post_id: Option<PostRefResponse>,
    pub sender: Option<SenderResponse>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CommentView> for CommentResponse {
    fn from(view: CommentView) -> Self {
        let CommentView {
            comment,
            post,
            sender,
        } = view;
        Self {
            id: comment.comment_id.into_uuid(),
            post_id: post.map(PostRefResponse::from),
            sender: sender.map(SenderResponse::from),
            content: comment.content.to_string(),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use auth::UserId;
    use kernel::id::PostId;

    use super::*;
    use crate::domain::entity::comment::Comment;
    use crate::domain::value_object::comment_content::CommentContent;

    #[test]
    fn test_dangling_references_serialize_as_null() {
        let comment = Comment::new(
            PostId::new(),
            UserId::new(),
            CommentContent::new("hi").unwrap(),
        );
        let response = CommentResponse::from(CommentView {
            comment,
            post: None,
            sender: None,
        });

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["postId"].is_null());
        assert!(json["sender"].is_null());
        assert_eq!(json["content"], "hi");
        assert!(json["_id"].is_string());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_create_request_ignores_sender() {
        let req: CreateCommentRequest = serde_json::from_value(serde_json::json!({
            "postId": "abc",
            "content": "hello",
            "sender": "someone-else"
        }))
        .unwrap();
        assert_eq!(req.post_id.as_deref(), Some("abc"));
        assert_eq!(req.content.as_deref(), Some("hello"));
    }
}
