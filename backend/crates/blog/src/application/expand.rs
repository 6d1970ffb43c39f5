//! Expand Step
//!
//! Resolves `sender` and `postId` references into the small embedded
//! objects returned to clients. A reference whose target no longer exists
//! expands to `None`.

use std::collections::{HashMap, HashSet};

use auth::domain::User;
use auth::{AuthenticatedIdentity, UserId, UserRepository};
use kernel::id::PostId;

use crate::domain::entity::{comment::Comment, post::Post};
use crate::domain::repository::PostRepository;
use crate::error::BlogResult;

/// Public fields of the sender
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderSummary {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
}

impl From<&User> for SenderSummary {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            user_name: user.user_name.to_string(),
            email: user.email.to_string(),
        }
    }
}

impl From<&AuthenticatedIdentity> for SenderSummary {
    fn from(identity: &AuthenticatedIdentity) -> Self {
        Self {
            user_id: identity.user_id,
            user_name: identity.user_name.to_string(),
            email: identity.email.to_string(),
        }
    }
}

/// Id and title of the commented post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSummary {
    pub post_id: PostId,
    pub title: String,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            post_id: post.post_id,
            title: post.title.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PostView {
    pub post: Post,
    pub sender: Option<SenderSummary>,
}

#[derive(Debug, Clone)]
pub struct CommentView {
    pub comment: Comment,
    pub post: Option<PostSummary>,
    pub sender: Option<SenderSummary>,
}

/// Look up each distinct sender once
async fn senders<U>(
    users: &U,
    ids: impl Iterator<Item = UserId>,
) -> BlogResult<HashMap<UserId, SenderSummary>>
where
    U: UserRepository,
{
    let ids: Vec<UserId> = ids.collect::<HashSet<_>>().into_iter().collect();

    Ok(users
        .find_by_ids(&ids)
        .await?
        .iter()
        .map(|user| (user.user_id, SenderSummary::from(user)))
        .collect())
}

pub async fn expand_posts<U>(users: &U, posts: Vec<Post>) -> BlogResult<Vec<PostView>>
where
    U: UserRepository,
{
    let senders = senders(users, posts.iter().map(|p| p.sender_id)).await?;

    Ok(posts
        .into_iter()
        .map(|post| PostView {
            sender: senders.get(&post.sender_id).cloned(),
            post,
        })
        .collect())
}

pub async fn expand_comments<P, U>(
    posts: &P,
    users: &U,
    comments: Vec<Comment>,
) -> BlogResult<Vec<CommentView>>
where
    P: PostRepository,
    U: UserRepository,
{
    let senders = senders(users, comments.iter().map(|c| c.sender_id)).await?;

    let post_ids: Vec<PostId> = comments
        .iter()
        .map(|c| c.post_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let summaries: HashMap<PostId, PostSummary> = posts
        .find_by_ids(&post_ids)
        .await?
        .iter()
        .map(|post| (post.post_id, PostSummary::from(post)))
        .collect();

    Ok(comments
        .into_iter()
        .map(|comment| CommentView {
            post: summaries.get(&comment.post_id).cloned(),
            sender: senders.get(&comment.sender_id).cloned(),
            comment,
        })
        .collect())
}
