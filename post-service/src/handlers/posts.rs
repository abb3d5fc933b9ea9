/// Post handlers - HTTP endpoints for post operations
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::models::PostDetail;
use crate::services::{posts::total_pages, PostFilter, PostService};
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LikePostRequest {
    #[serde(default)]
    pub unlike: bool,
}

/// Listing query parameters
#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub filter: Option<String>,
    pub page: Option<i64>,
}

/// Paginated listing envelope
#[derive(Debug, Serialize)]
pub struct PageEnvelope {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<PostDetail>,
}

/// List posts, newest or most-liked first
pub async fn list_posts(
    pool: web::Data<PgPool>,
    req: HttpRequest,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse> {
    let filter = PostFilter::from_query(query.filter.as_deref());
    let page = query.page.unwrap_or(1);

    let service = PostService::new((**pool).clone());
    let (results, count) = service.list_posts(filter, page).await?;

    // The `filter` param is echoed into page links only when the caller
    // sent one, normalized to its canonical value.
    let filter_echo = query.filter.as_deref().map(|_| filter.as_str());
    let pages = total_pages(count);
    let next = (page < pages).then(|| page_link(req.path(), filter_echo, page + 1));
    let previous = (page > 1).then(|| page_link(req.path(), filter_echo, page - 1));

    Ok(HttpResponse::Ok().json(PageEnvelope {
        count,
        next,
        previous,
        results,
    }))
}

/// Create a new post
///
/// The author is always the authenticated caller; any `author` or `likes`
/// field in the body is ignored.
pub async fn create_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    req.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(user_id.0, &req.content, &req.tags)
        .await?;

    Ok(HttpResponse::Created().json(post))
}

/// Like or unlike a post
///
/// An absent or empty body counts as a like. Repeat likes from the same
/// caller are allowed.
pub async fn like_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<i64>,
    req: Option<web::Json<LikePostRequest>>,
) -> Result<HttpResponse> {
    let unlike = req.map(|r| r.unlike).unwrap_or(false);

    let service = PostService::new((**pool).clone());
    let post = service.like_post(*post_id, unlike).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post owned by the caller
pub async fn delete_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    post_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    service.delete_post(*post_id, user_id.0).await?;

    Ok(HttpResponse::NoContent().finish())
}

fn page_link(path: &str, filter: Option<&str>, page: i64) -> String {
    match filter {
        Some(filter) => format!("{path}?filter={filter}&page={page}"),
        None => format!("{path}?page={page}"),
    }
}
