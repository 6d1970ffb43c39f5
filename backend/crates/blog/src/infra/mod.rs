//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::{MemoryCommentRepository, MemoryPostRepository};
pub use postgres::{PgCommentRepository, PgPostRepository};
