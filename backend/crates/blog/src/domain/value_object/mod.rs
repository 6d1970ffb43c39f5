pub mod comment_content;
pub mod post_title;
