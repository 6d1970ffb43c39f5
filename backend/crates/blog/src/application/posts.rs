//! Post Use Case

use std::sync::Arc;

use auth::{AuthenticatedIdentity, UserId, UserRepository};
use kernel::id::PostId;

use crate::application::config::BlogConfig;
use crate::application::expand::{PostView, SenderSummary, expand_posts};
use crate::application::present;
use crate::domain::entity::post::Post;
use crate::domain::repository::{PostFilter, PostRepository};
use crate::domain::value_object::post_title::PostTitle;
use crate::error::{BlogError, BlogResult};

pub struct CreatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Partial edit; `None` leaves the field unchanged
#[derive(Debug, Default)]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Post use case
pub struct PostUseCase<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    posts: Arc<P>,
    users: Arc<U>,
    config: Arc<BlogConfig>,
}

impl<P, U> PostUseCase<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    pub fn new(posts: Arc<P>, users: Arc<U>, config: Arc<BlogConfig>) -> Self {
        Self {
            posts,
            users,
            config,
        }
    }

    /// All posts, or only those by `sender`; a malformed sender id is a 400
    pub async fn list(&self, sender: Option<String>) -> BlogResult<Vec<PostView>> {
        let sender_id = match present(sender) {
            Some(raw) => Some(
                UserId::parse_str(&raw)
                    .map_err(|_| BlogError::Validation(format!("Invalid sender id \"{}\"", raw)))?,
            ),
            None => None,
        };

        let posts = self
            .posts
            .find_by_filter(&PostFilter { sender_id })
            .await?;

        expand_posts(self.users.as_ref(), posts).await
    }

    pub async fn get(&self, raw_id: &str) -> BlogResult<PostView> {
        let post = self.load(raw_id).await?;
        self.expand(post).await
    }

    pub async fn create(
        &self,
        caller: &AuthenticatedIdentity,
        input: CreatePostInput,
    ) -> BlogResult<PostView> {
        let title = PostTitle::new(input.title.unwrap_or_default())?;
        let post = Post::new(title, input.content, caller.user_id);

        self.posts.insert(&post).await?;

        tracing::info!(post_id = %post.post_id, sender_id = %caller.user_id, "Post created");

        Ok(PostView {
            sender: Some(SenderSummary::from(caller)),
            post,
        })
    }

    pub async fn update(
        &self,
        caller: &AuthenticatedIdentity,
        raw_id: &str,
        input: UpdatePostInput,
    ) -> BlogResult<PostView> {
        let title = input.title.map(PostTitle::new).transpose()?;

        let mut post = self.load(raw_id).await?;
        self.ensure_sender(&post, caller)?;

        post.edit(title, input.content);

        if !self.posts.update(&post).await? {
            return Err(BlogError::PostNotFound);
        }

        self.expand(post).await
    }

    /// Returns the id of the deleted post
    pub async fn delete(&self, caller: &AuthenticatedIdentity, raw_id: &str) -> BlogResult<PostId> {
        let post_id = PostId::parse_str(raw_id).map_err(|_| BlogError::PostNotFound)?;

        if self.config.enforce_ownership {
            let post = self.load(raw_id).await?;
            self.ensure_sender(&post, caller)?;
        }

        if !self.posts.delete(&post_id).await? {
            return Err(BlogError::PostNotFound);
        }

        tracing::info!(post_id = %post_id, deleted_by = %caller.user_id, "Post deleted");
        Ok(post_id)
    }

    /// Malformed and unknown ids are both not found
    async fn load(&self, raw_id: &str) -> BlogResult<Post> {
        let post_id = PostId::parse_str(raw_id).map_err(|_| BlogError::PostNotFound)?;

        self.posts
            .find_by_id(&post_id)
            .await?
            .ok_or(BlogError::PostNotFound)
    }

    fn ensure_sender(&self, post: &Post, caller: &AuthenticatedIdentity) -> BlogResult<()> {
        if self.config.enforce_ownership && !post.is_sent_by(&caller.user_id) {
            return Err(BlogError::Forbidden("You can only modify your own posts"));
        }
        Ok(())
    }

    async fn expand(&self, post: Post) -> BlogResult<PostView> {
        expand_posts(self.users.as_ref(), vec![post])
            .await?
            .pop()
            .ok_or_else(|| BlogError::Internal("Expanded post missing".to_string()))
    }
}
