//! Application Layer
//!
//! Use cases for posts and comments plus the expand step that resolves
//! sender and post references for responses.

pub mod comments;
pub mod config;
pub mod expand;
pub mod posts;

// Re-exports
pub use comments::{CommentUseCase, CreateCommentInput, UpdateCommentInput};
pub use config::BlogConfig;
pub use expand::{CommentView, PostSummary, PostView, SenderSummary};
pub use posts::{CreatePostInput, PostUseCase, UpdatePostInput};

/// Treat absent and empty strings alike
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
