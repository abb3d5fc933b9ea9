use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author reference embedded in post representations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub id: i64,
    pub username: String,
}

/// Flat row shape returned by post queries (post columns + joined author)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    pub id: i64,
    pub content: String,
    pub author_id: i64,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub likes: i32,
}

/// Post representation served to API clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: i64,
    pub content: String,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
    pub likes: i32,
}

impl From<PostRow> for PostDetail {
    fn from(row: PostRow) -> Self {
        PostDetail {
            id: row.id,
            content: row.content,
            author: Author {
                id: row.author_id,
                username: row.author_username,
            },
            created_at: row.created_at,
            tags: row.tags,
            likes: row.likes,
        }
    }
}
