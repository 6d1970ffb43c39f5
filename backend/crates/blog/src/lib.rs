//! Blog Crate
//!
//! Posts and comments. Reads are public; writes go through the auth gate
//! and are stamped with the caller as `sender`.
//!
//! ## Layers
//! - `domain`: entities, value objects, repository traits
//! - `application`: use cases and the expand (join) step
//! - `infra`: PostgreSQL and in-memory repositories
//! - `presentation`: DTOs, handlers, routers

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports
pub use application::config::BlogConfig;
pub use domain::repository::{CommentRepository, PostRepository};
pub use error::{BlogError, BlogResult};
pub use infra::{
    memory::{MemoryCommentRepository, MemoryPostRepository},
    postgres::{PgCommentRepository, PgPostRepository},
};
pub use presentation::router::{comment_router, post_router};
