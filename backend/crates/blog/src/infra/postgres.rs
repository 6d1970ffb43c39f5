//! PostgreSQL Repository Implementations
//!
//! `sender_id` and `post_id` are stored as plain references without
//! foreign keys, so deleting a user or post leaves dangling ids behind.

use auth::UserId;
use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{comment::Comment, post::Post};
use crate::domain::repository::{CommentFilter, CommentRepository, PostFilter, PostRepository};
use crate::domain::value_object::{comment_content::CommentContent, post_title::PostTitle};
use crate::error::BlogResult;

const POST_COLUMNS: &str = r#"
    post_id,
    title,
    content,
    sender_id,
    created_at,
    updated_at
"#;

const COMMENT_COLUMNS: &str = r#"
    comment_id,
    post_id,
    sender_id,
    content,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed post repository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// PostgreSQL-backed comment repository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgPostRepository {
    async fn insert(&self, post: &Post) -> BlogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                post_id,
                title,
                content,
                sender_id,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.title.as_str())
        .bind(post.content.as_deref())
        .bind(post.sender_id.as_uuid())
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, post_id: &PostId) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE post_id = $1"
        ))
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn find_by_ids(&self, post_ids: &[PostId]) -> BlogResult<Vec<Post>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = post_ids.iter().map(|id| id.into_uuid()).collect();

        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE post_id = ANY($1)"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn find_by_filter(&self, filter: &PostFilter) -> BlogResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            SELECT {POST_COLUMNS} FROM posts
            WHERE ($1::uuid IS NULL OR sender_id = $1)
            ORDER BY created_at, post_id
            "#
        ))
        .bind(filter.sender_id.map(UserId::into_uuid))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn update(&self, post: &Post) -> BlogResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE posts SET
                title = $2,
                content = $3,
                updated_at = $4
            WHERE post_id = $1
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.title.as_str())
        .bind(post.content.as_deref())
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, post_id: &PostId) -> BlogResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgCommentRepository {
    async fn insert(&self, comment: &Comment) -> BlogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (
                comment_id,
                post_id,
                sender_id,
                content,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.post_id.as_uuid())
        .bind(comment.sender_id.as_uuid())
        .bind(comment.content.as_str())
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, comment_id: &CommentId) -> BlogResult<Option<Comment>> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE comment_id = $1"
        ))
        .bind(comment_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn find_by_filter(&self, filter: &CommentFilter) -> BlogResult<Vec<Comment>> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            r#"
            SELECT {COMMENT_COLUMNS} FROM comments
            WHERE ($1::uuid IS NULL OR post_id = $1)
            ORDER BY created_at, comment_id
            "#
        ))
        .bind(filter.post_id.map(PostId::into_uuid))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn update(&self, comment: &Comment) -> BlogResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE comments SET
                content = $2,
                updated_at = $3
            WHERE comment_id = $1
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.content.as_str())
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, comment_id: &CommentId) -> BlogResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    title: String,
    content: Option<String>,
    sender_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::from_uuid(self.post_id),
            title: PostTitle::from_db(self.title),
            content: self.content,
            sender_id: UserId::from_uuid(self.sender_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    post_id: Uuid,
    sender_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            comment_id: CommentId::from_uuid(self.comment_id),
            post_id: PostId::from_uuid(self.post_id),
            sender_id: UserId::from_uuid(self.sender_id),
            content: CommentContent::from_db(self.content),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
