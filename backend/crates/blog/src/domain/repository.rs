//! Repository Traits
//!
//! Storage interfaces for posts and comments. References to users and
//! posts are resolved separately by the expand step.

use auth::UserId;
use kernel::id::{CommentId, PostId};

use crate::domain::entity::{comment::Comment, post::Post};
use crate::error::BlogResult;

/// Post query; `None` fields match everything
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub sender_id: Option<UserId>,
}

/// Comment query; `None` fields match everything
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub post_id: Option<PostId>,
}

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    async fn insert(&self, post: &Post) -> BlogResult<()>;

    async fn find_by_id(&self, post_id: &PostId) -> BlogResult<Option<Post>>;

    /// Every post whose ID is in `post_ids` (order unspecified)
    async fn find_by_ids(&self, post_ids: &[PostId]) -> BlogResult<Vec<Post>>;

    /// Matching posts, oldest first
    async fn find_by_filter(&self, filter: &PostFilter) -> BlogResult<Vec<Post>>;

    /// Overwrite a post; returns `false` if it no longer exists
    async fn update(&self, post: &Post) -> BlogResult<bool>;

    /// Returns `false` if the post did not exist
    async fn delete(&self, post_id: &PostId) -> BlogResult<bool>;
}

/// Comment repository trait
#[trait_variant::make(CommentRepository: Send)]
pub trait LocalCommentRepository {
    async fn insert(&self, comment: &Comment) -> BlogResult<()>;

    async fn find_by_id(&self, comment_id: &CommentId) -> BlogResult<Option<Comment>>;

    /// Matching comments, oldest first
    async fn find_by_filter(&self, filter: &CommentFilter) -> BlogResult<Vec<Comment>>;

    /// Overwrite a comment; returns `false` if it no longer exists
    async fn update(&self, comment: &Comment) -> BlogResult<bool>;

    /// Returns `false` if the comment did not exist
    async fn delete(&self, comment_id: &CommentId) -> BlogResult<bool>;
}
