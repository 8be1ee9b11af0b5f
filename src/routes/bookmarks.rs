use crate::{
    error::Result,
    state::AppState,
    utils::middleware::RequestContext,
};
use axum::{
    extract::{Path, State},
    response::Json,
    routing::{post, put},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/:article_id",
            put(add_bookmark).delete(remove_bookmark).get(get_bookmark),
        )
        .route("/:article_id/toggle", post(toggle_bookmark))
}

/// Bookmark an article
/// PUT /api/blog/bookmarks/:article_id
async fn add_bookmark(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(article_id): Path<String>,
) -> Result<Json<Value>> {
    let user_id = ctx.require_user()?;
    debug!("Creating bookmark for article: {} by user: {}", article_id, user_id);

    let bookmark = state.bookmark_service.add_bookmark(user_id, &article_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": bookmark
    })))
}

/// Remove a bookmark
/// DELETE /api/blog/bookmarks/:article_id
async fn remove_bookmark(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(article_id): Path<String>,
) -> Result<Json<Value>> {
    let user_id = ctx.require_user()?;
    debug!("Deleting bookmark for article: {} by user: {}", article_id, user_id);

    let bookmark = state.bookmark_service.remove_bookmark(user_id, &article_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": bookmark
    })))
}

/// Flip the bookmark state
/// POST /api/blog/bookmarks/:article_id/toggle
async fn toggle_bookmark(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(article_id): Path<String>,
) -> Result<Json<Value>> {
    let user_id = ctx.require_user()?;
    debug!("Toggling bookmark for article: {} by user: {}", article_id, user_id);

    let bookmark = state.bookmark_service.toggle_bookmark(user_id, &article_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": bookmark
    })))
}

/// Check bookmark status
/// GET /api/blog/bookmarks/:article_id
async fn get_bookmark(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(article_id): Path<String>,
) -> Result<Json<Value>> {
    let bookmark = state
        .bookmark_service
        .get_state(ctx.user_id.as_deref(), &article_id)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": bookmark
    })))
}
