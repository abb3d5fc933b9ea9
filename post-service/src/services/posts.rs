/// Post store - persistence and the two read projections over posts
use crate::error::{AppError, Result};
use crate::models::{PostDetail, PostRow};
use sqlx::PgPool;

/// Fixed page size for post listings
pub const PAGE_SIZE: i64 = 5;

/// Listing order for posts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    /// Most recent first (default)
    Newest,
    /// Most liked first
    Popular,
}

impl PostFilter {
    /// Parse the `filter` query parameter. Anything other than `popular`,
    /// including an absent parameter, means newest.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("popular") => PostFilter::Popular,
            _ => PostFilter::Newest,
        }
    }

    /// Canonical query-parameter value for this filter
    pub fn as_str(self) -> &'static str {
        match self {
            PostFilter::Newest => "newest",
            PostFilter::Popular => "popular",
        }
    }
}

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new post
    ///
    /// `author_id` always comes from the authenticated caller; the row is
    /// returned with the author resolved in the same statement.
    pub async fn create_post(
        &self,
        author_id: i64,
        content: &str,
        tags: &[String],
    ) -> Result<PostDetail> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH inserted AS (
                INSERT INTO posts (content, author_id, tags)
                VALUES ($1, $2, $3)
                RETURNING id, content, author_id, created_at, tags, likes
            )
            SELECT i.id, i.content, i.author_id, u.username AS author_username,
                   i.created_at, i.tags, i.likes
            FROM inserted i
            JOIN users u ON u.id = i.author_id
            "#,
        )
        .bind(content)
        .bind(author_id)
        .bind(tags)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// List posts, newest or most-liked first, with offset pagination
    ///
    /// Returns the requested page together with the total row count. Both
    /// orderings carry a deterministic tiebreak so a stable data set never
    /// duplicates or drops rows across page boundaries.
    pub async fn list_posts(
        &self,
        filter: PostFilter,
        page: i64,
    ) -> Result<(Vec<PostDetail>, i64)> {
        if page < 1 {
            return Err(AppError::NotFound("Invalid page".to_string()));
        }

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await?;

        if page > total_pages(total) {
            return Err(AppError::NotFound("Invalid page".to_string()));
        }

        let order_by = match filter {
            PostFilter::Newest => "p.created_at DESC, p.id DESC",
            PostFilter::Popular => "p.likes DESC, p.created_at DESC",
        };

        let query = format!(
            r#"
            SELECT p.id, p.content, p.author_id, u.username AS author_username,
                   p.created_at, p.tags, p.likes
            FROM posts p
            JOIN users u ON u.id = p.author_id
            ORDER BY {order_by}
            LIMIT $1 OFFSET $2
            "#,
        );

        let rows = sqlx::query_as::<_, PostRow>(&query)
            .bind(PAGE_SIZE)
            .bind((page - 1) * PAGE_SIZE)
            .fetch_all(&self.pool)
            .await?;

        Ok((rows.into_iter().map(PostDetail::from).collect(), total))
    }

    /// Get a post by id
    pub async fn get_post(&self, post_id: i64) -> Result<Option<PostDetail>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT p.id, p.content, p.author_id, u.username AS author_username,
                   p.created_at, p.tags, p.likes
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostDetail::from))
    }

    /// Like or unlike a post
    ///
    /// The counter mutation is a single UPDATE expression evaluated by the
    /// database, so concurrent requests serialize on the row and no update
    /// is lost. The decrement floors at zero.
    pub async fn like_post(&self, post_id: i64, unlike: bool) -> Result<PostDetail> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH updated AS (
                UPDATE posts
                SET likes = CASE WHEN $2 THEN GREATEST(likes - 1, 0) ELSE likes + 1 END
                WHERE id = $1
                RETURNING id, content, author_id, created_at, tags, likes
            )
            SELECT p.id, p.content, p.author_id, u.username AS author_username,
                   p.created_at, p.tags, p.likes
            FROM updated p
            JOIN users u ON u.id = p.author_id
            "#,
        )
        .bind(post_id)
        .bind(unlike)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PostDetail::from)
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }

    /// Delete a post owned by the caller
    ///
    /// Hard delete: no tombstone survives. Fails with `NotFound` when the
    /// id does not exist and `Forbidden` when the caller is not the author.
    pub async fn delete_post(&self, post_id: i64, caller_id: i64) -> Result<()> {
        let author_id: Option<i64> =
            sqlx::query_scalar("SELECT author_id FROM posts WHERE id = $1")
                .bind(post_id)
                .fetch_optional(&self.pool)
                .await?;

        let author_id =
            author_id.ok_or_else(|| AppError::NotFound("Post not found".to_string()))?;

        if author_id != caller_id {
            return Err(AppError::Forbidden(
                "Not authorized to delete this post".to_string(),
            ));
        }

        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            // Deleted concurrently between the ownership check and here.
            return Err(AppError::NotFound("Post not found".to_string()));
        }

        Ok(())
    }
}

/// Number of pages a listing of `total` rows occupies; an empty listing
/// still has one (empty) page.
pub fn total_pages(total: i64) -> i64 {
    if total <= 0 {
        1
    } else {
        (total + PAGE_SIZE - 1) / PAGE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_posts_occupy_three_pages() {
        assert_eq!(total_pages(12), 3);
    }

    #[test]
    fn page_boundaries_are_exact() {
        assert_eq!(total_pages(0), 1);
        assert_eq!(total_pages(1), 1);
        assert_eq!(total_pages(5), 1);
        assert_eq!(total_pages(6), 2);
        assert_eq!(total_pages(10), 2);
        assert_eq!(total_pages(11), 3);
    }

    #[test]
    fn filter_parsing_defaults_to_newest() {
        assert_eq!(PostFilter::from_query(Some("popular")), PostFilter::Popular);
        assert_eq!(PostFilter::from_query(Some("newest")), PostFilter::Newest);
        assert_eq!(PostFilter::from_query(Some("trending")), PostFilter::Newest);
        assert_eq!(PostFilter::from_query(None), PostFilter::Newest);
    }
}
