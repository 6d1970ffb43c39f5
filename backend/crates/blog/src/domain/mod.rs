//! Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::{comment::Comment, post::Post};
pub use repository::{CommentFilter, CommentRepository, PostFilter, PostRepository};
