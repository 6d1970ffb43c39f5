//! Comment Use Case
//!
//! Unparsable ids on reads and deletes are server errors here, unlike
//! posts and users where they are simply not found.

use std::sync::Arc;

use auth::{AuthenticatedIdentity, UserRepository};
use kernel::id::{CommentId, PostId};

use crate::application::config::BlogConfig;
use crate::application::expand::{CommentView, expand_comments};
use crate::application::present;
use crate::domain::entity::comment::Comment;
use crate::domain::repository::{CommentFilter, CommentRepository, PostRepository};
use crate::domain::value_object::comment_content::CommentContent;
use crate::error::{BlogError, BlogResult};

pub struct CreateCommentInput {
    pub post_id: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Default)]
pub struct UpdateCommentInput {
    pub content: Option<String>,
}

/// Comment use case
pub struct CommentUseCase<C, P, U>
where
    C: CommentRepository,
    P: PostRepository,
    U: UserRepository,
{
    comments: Arc<C>,
    posts: Arc<P>,
    users: Arc<U>,
    config: Arc<BlogConfig>,
}

impl<C, P, U> CommentUseCase<C, P, U>
where
    C: CommentRepository,
    P: PostRepository,
    U: UserRepository,
{
    pub fn new(comments: Arc<C>, posts: Arc<P>, users: Arc<U>, config: Arc<BlogConfig>) -> Self {
        Self {
            comments,
            posts,
            users,
            config,
        }
    }

    /// All comments, or only those on `post_id`
    pub async fn list(&self, post_id: Option<String>) -> BlogResult<Vec<CommentView>> {
        let post_id = present(post_id).map(|raw| parse_post_id(&raw)).transpose()?;
        self.find(CommentFilter { post_id }).await
    }

    /// Comments on one post; empty when there are none
    pub async fn list_by_post(&self, raw_post_id: &str) -> BlogResult<Vec<CommentView>> {
        let post_id = parse_post_id(raw_post_id)?;
        self.find(CommentFilter {
            post_id: Some(post_id),
        })
        .await
    }

    pub async fn get(&self, raw_id: &str) -> BlogResult<CommentView> {
        let comment_id = parse_comment_id(raw_id)?;

        let comment = self
            .comments
            .find_by_id(&comment_id)
            .await?
            .ok_or(BlogError::CommentNotFound)?;

        self.expand(comment).await
    }

    /// The post is not required to exist
    pub async fn create(
        &self,
        caller: &AuthenticatedIdentity,
        input: CreateCommentInput,
    ) -> BlogResult<CommentView> {
        let raw_post_id = present(input.post_id)
            .ok_or_else(|| BlogError::Validation("Post ID is required".to_string()))?;
        let post_id = PostId::parse_str(&raw_post_id).map_err(|_| {
            BlogError::Validation(format!("Invalid post id \"{}\"", raw_post_id))
        })?;
        let content = CommentContent::new(input.content.unwrap_or_default())?;

        let comment = Comment::new(post_id, caller.user_id, content);
        self.comments.insert(&comment).await?;

        tracing::info!(
            comment_id = %comment.comment_id,
            post_id = %post_id,
            sender_id = %caller.user_id,
            "Comment created"
        );

        self.expand(comment).await
    }

    /// A malformed id is a 400 on this route
    pub async fn update(
        &self,
        caller: &AuthenticatedIdentity,
        raw_id: &str,
        input: UpdateCommentInput,
    ) -> BlogResult<CommentView> {
        let comment_id = CommentId::parse_str(raw_id)
            .map_err(|_| BlogError::Validation(format!("Invalid comment id \"{}\"", raw_id)))?;
        let content = input.content.map(CommentContent::new).transpose()?;

        let mut comment = self
            .comments
            .find_by_id(&comment_id)
            .await?
            .ok_or(BlogError::CommentNotFound)?;
        self.ensure_sender(&comment, caller)?;

        comment.edit(content);

        if !self.comments.update(&comment).await? {
            return Err(BlogError::CommentNotFound);
        }

        self.expand(comment).await
    }

    pub async fn delete(&self, caller: &AuthenticatedIdentity, raw_id: &str) -> BlogResult<()> {
        let comment_id = parse_comment_id(raw_id)?;

        if self.config.enforce_ownership {
            let comment = self
                .comments
                .find_by_id(&comment_id)
                .await?
                .ok_or(BlogError::CommentNotFound)?;
            self.ensure_sender(&comment, caller)?;
        }

        if !self.comments.delete(&comment_id).await? {
            return Err(BlogError::CommentNotFound);
        }

        tracing::info!(comment_id = %comment_id, deleted_by = %caller.user_id, "Comment deleted");
        Ok(())
    }

    async fn find(&self, filter: CommentFilter) -> BlogResult<Vec<CommentView>> {
        let comments = self.comments.find_by_filter(&filter).await?;
        expand_comments(self.posts.as_ref(), self.users.as_ref(), comments).await
    }

    fn ensure_sender(&self, comment: &Comment, caller: &AuthenticatedIdentity) -> BlogResult<()> {
        if self.config.enforce_ownership && !comment.is_sent_by(&caller.user_id) {
            return Err(BlogError::Forbidden("You can only modify your own comments"));
        }
        Ok(())
    }

    async fn expand(&self, comment: Comment) -> BlogResult<CommentView> {
        expand_comments(self.posts.as_ref(), self.users.as_ref(), vec![comment])
            .await?
            .pop()
            .ok_or_else(|| BlogError::Internal("Expanded comment missing".to_string()))
    }
}

fn parse_comment_id(raw: &str) -> BlogResult<CommentId> {
    CommentId::parse_str(raw).map_err(|_| BlogError::MalformedId(raw.to_string()))
}

fn parse_post_id(raw: &str) -> BlogResult<PostId> {
    PostId::parse_str(raw).map_err(|_| BlogError::MalformedId(raw.to_string()))
}
