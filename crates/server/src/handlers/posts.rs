//! Post CRUD.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use newsroom_core::{
    Article, ArticlePatch, ArticleQuery, ArticleStatus, NewArticle, PostType, SeoFields, SeoMetadata,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{ok, present};
use crate::error::{ApiError, ApiJson, ApiResult};
use crate::state::AppState;

const MAX_PAGE: usize = 100;

#[derive(Debug, Serialize)]
pub struct PostWithSeo {
    #[serde(flatten)]
    post: Article,
    seo_metadata: Option<SeoMetadata>,
}

#[derive(Debug, Serialize)]
struct Pagination {
    total: u64,
    limit: usize,
    offset: usize,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    id: Option<String>,
    status: Option<String>,
    category_id: Option<Uuid>,
    limit: Option<usize>,
    offset: Option<usize>,
}

fn parse_id(raw: Option<&str>) -> ApiResult<Uuid> {
    let raw = raw.ok_or_else(|| ApiError::BadRequest("Post ID is required".to_string()))?;
    raw.parse().map_err(|_| ApiError::BadRequest(format!("Invalid post ID: {raw}")))
}

async fn load(state: &AppState, id: Uuid) -> ApiResult<PostWithSeo> {
    let post = state.store.article_by_id(id).await?.ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;
    let seo_metadata = state.store.seo_for(id).await?;
    Ok(PostWithSeo { post, seo_metadata })
}

/// One post with its metadata when `?id=` is given, otherwise a page of posts.
pub async fn get_posts(State(state): State<AppState>, Query(params): Query<ListParams>) -> ApiResult<impl IntoResponse> {
    if params.id.is_some() {
        let id = parse_id(present(&params.id))?;
        return Ok(ok(load(&state, id).await?).into_response());
    }

    let mut query = ArticleQuery { category_id: params.category_id, ..Default::default() };
    if let Some(status) = present(&params.status) {
        query.status = Some(status.parse::<ArticleStatus>().map_err(ApiError::BadRequest)?);
    }
    if let Some(limit) = params.limit {
        query.limit = limit.clamp(1, MAX_PAGE);
    }
    query.offset = params.offset.unwrap_or_default();

    let page = state.store.list_articles(&query).await?;
    Ok(Json(json!({
        "success": true,
        "data": page.items,
        "pagination": Pagination { total: page.total, limit: query.limit, offset: query.offset },
    }))
    .into_response())
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    title: Option<String>,
    slug: Option<String>,
    content: Option<String>,
    excerpt: Option<String>,
    featured_image: Option<String>,
    category_id: Option<Uuid>,
    #[serde(default)]
    status: ArticleStatus,
    #[serde(default)]
    post_type: PostType,
    #[serde(default)]
    seo_score: i32,
    author_name: Option<String>,
    author_email: Option<String>,
    original_source: Option<String>,
    seo_metadata: Option<SeoFields>,
}

pub async fn create_post(
    State(state): State<AppState>, ApiJson(body): ApiJson<CreatePostRequest>,
) -> ApiResult<impl IntoResponse> {
    let (Some(title), Some(slug), Some(content)) = (present(&body.title), present(&body.slug), present(&body.content))
    else {
        return Err(ApiError::BadRequest("Missing required fields: title, slug, content".to_string()));
    };

    let now = OffsetDateTime::now_utc();
    let new = NewArticle {
        title: title.to_string(),
        slug: slug.to_string(),
        content: content.to_string(),
        excerpt: body.excerpt,
        featured_image: body.featured_image,
        category_id: body.category_id,
        status: body.status,
        post_type: body.post_type,
        seo_score: body.seo_score,
        author_name: body.author_name,
        author_email: body.author_email,
        original_source: body.original_source,
        published_at: None,
    };
    let post = Article::from_new(new, now);
    state.store.insert_article(&post).await?;
    tracing::info!(id = %post.id, slug = %post.slug, status = %post.status, "post created");

    let seo_metadata = match body.seo_metadata {
        Some(mut fields) => {
            if fields.canonical_url.is_none() {
                fields.canonical_url = Some(state.importer.config().canonical_url(&post.slug));
            }
            let meta = SeoMetadata::from_fields(post.id, fields, now);
            match state.store.upsert_seo(&meta).await {
                Ok(()) => Some(meta),
                Err(e) => {
                    tracing::warn!(id = %post.id, error = %e, "post saved without SEO metadata");
                    None
                }
            }
        }
        None => None,
    };

    Ok((StatusCode::CREATED, ok(PostWithSeo { post, seo_metadata })))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    id: Option<Uuid>,
    seo_metadata: Option<SeoFields>,
    #[serde(flatten)]
    patch: ArticlePatch,
}

/// Applies a partial edit; SEO metadata is merged into the stored row or
/// created.
pub async fn update_post(
    State(state): State<AppState>, ApiJson(body): ApiJson<UpdatePostRequest>,
) -> ApiResult<impl IntoResponse> {
    let id = body.id.ok_or_else(|| ApiError::BadRequest("Post ID is required".to_string()))?;
    let mut post = state.store.article_by_id(id).await?.ok_or_else(|| ApiError::NotFound("Post not found".to_string()))?;

    let now = OffsetDateTime::now_utc();
    post.apply(body.patch, now);
    state.store.update_article(&post).await?;

    let mut seo_metadata = state.store.seo_for(id).await?;
    if let Some(fields) = body.seo_metadata {
        let meta = match seo_metadata.take() {
            Some(mut existing) => {
                existing.merge(fields, now);
                existing
            }
            None => SeoMetadata::from_fields(id, fields, now),
        };
        state.store.upsert_seo(&meta).await?;
        seo_metadata = Some(meta);
    }

    tracing::info!(%id, status = %post.status, "post updated");
    Ok(ok(PostWithSeo { post, seo_metadata }))
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    id: Option<String>,
}

pub async fn delete_post(
    State(state): State<AppState>, Query(params): Query<DeleteParams>,
) -> ApiResult<impl IntoResponse> {
    let id = parse_id(present(&params.id))?;
    if !state.store.delete_article(id).await? {
        return Err(ApiError::NotFound("Post not found".to_string()));
    }
    tracing::info!(%id, "post deleted");
    Ok(Json(json!({ "success": true, "message": "Post deleted" })))
}
