/// HTTP request handlers
pub mod posts;

pub use posts::{create_post, delete_post, like_post, list_posts};
