//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::{CommentAppState, PostAppState};
pub use router::{comment_router, comment_router_generic, post_router, post_router_generic};
