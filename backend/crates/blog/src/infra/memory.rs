//! In-Memory Repository Implementations
//!
//! Used by tests and when no database is configured.

use std::sync::Arc;

use tokio::sync::RwLock;

use kernel::id::{CommentId, PostId};

use crate::domain::entity::{comment::Comment, post::Post};
use crate::domain::repository::{CommentFilter, CommentRepository, PostFilter, PostRepository};
use crate::error::BlogResult;

/// In-memory post repository; clones share the same store
#[derive(Clone, Default)]
pub struct MemoryPostRepository {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl MemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// In-memory comment repository; clones share the same store
#[derive(Clone, Default)]
pub struct MemoryCommentRepository {
    comments: Arc<RwLock<Vec<Comment>>>,
}

impl MemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PostRepository for MemoryPostRepository {
    async fn insert(&self, post: &Post) -> BlogResult<()> {
        self.posts.write().await.push(post.clone());
        Ok(())
    }

    async fn find_by_id(&self, post_id: &PostId) -> BlogResult<Option<Post>> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| &p.post_id == post_id).cloned())
    }

    async fn find_by_ids(&self, post_ids: &[PostId]) -> BlogResult<Vec<Post>> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .filter(|p| post_ids.contains(&p.post_id))
            .cloned()
            .collect())
    }

    async fn find_by_filter(&self, filter: &PostFilter) -> BlogResult<Vec<Post>> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .filter(|p| filter.sender_id.is_none_or(|s| p.sender_id == s))
            .cloned()
            .collect())
    }

    async fn update(&self, post: &Post) -> BlogResult<bool> {
        let mut posts = self.posts.write().await;
        match posts.iter_mut().find(|p| p.post_id == post.post_id) {
            Some(slot) => {
                *slot = post.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, post_id: &PostId) -> BlogResult<bool> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| &p.post_id != post_id);
        Ok(posts.len() != before)
    }
}

impl CommentRepository for MemoryCommentRepository {
    async fn insert(&self, comment: &Comment) -> BlogResult<()> {
        self.comments.write().await.push(comment.clone());
        Ok(())
    }

    async fn find_by_id(&self, comment_id: &CommentId) -> BlogResult<Option<Comment>> {
        let comments = self.comments.read().await;
        Ok(comments
            .iter()
            .find(|c| &c.comment_id == comment_id)
            .cloned())
    }

    async fn find_by_filter(&self, filter: &CommentFilter) -> BlogResult<Vec<Comment>> {
        let comments = self.comments.read().await;
        Ok(comments
            .iter()
            .filter(|c| filter.post_id.is_none_or(|p| c.post_id == p))
            .cloned()
            .collect())
    }

    async fn update(&self, comment: &Comment) -> BlogResult<bool> {
        let mut comments = self.comments.write().await;
        match comments
            .iter_mut()
            .find(|c| c.comment_id == comment.comment_id)
        {
            Some(slot) => {
                *slot = comment.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, comment_id: &CommentId) -> BlogResult<bool> {
        let mut comments = self.comments.write().await;
        let before = comments.len();
        comments.retain(|c| &c.comment_id != comment_id);
        Ok(comments.len() != before)
    }
}
