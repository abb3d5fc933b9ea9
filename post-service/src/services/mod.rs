pub mod posts;

pub use posts::{PostFilter, PostService, PAGE_SIZE};
