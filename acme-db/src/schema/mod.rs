//! Schema definitions with validation at construction
//!
//! All client input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod post;
pub mod validation;

pub use post::{
    parse_post_id, CreatePostSchema, DeleteInput, NewPost, Post, PostContent, PostIdInput,
    PostTitle, MAX_CONTENT_LEN, MAX_TITLE_LEN,
};
pub use validation::ValidationError;

/// Table holding posts
pub const POST_TABLE: &str = "post";
