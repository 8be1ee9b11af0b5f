use crate::{
    error::Result,
    models::clap::AddClapRequest,
    state::AppState,
    utils::middleware::RequestContext,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::Json,
    routing::post,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/:article_id/claps",
        post(add_clap).delete(remove_clap).get(get_claps),
    )
}

/// 为文章鼓掌
/// POST /api/blog/articles/:article_id/claps
async fn add_clap(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(article_id): Path<String>,
    payload: std::result::Result<Json<AddClapRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let user_id = ctx.require_user()?;
    let Json(request) = payload?;
    debug!("[{}] Clap request on article {} by user {}", ctx.request_id, article_id, user_id);

    request.validate()?;

    let response = state
        .clap_service
        .add_clap(user_id, &article_id, request.count)
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": response
    })))
}

/// 撤销鼓掌
/// DELETE /api/blog/articles/:article_id/claps
async fn remove_clap(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(article_id): Path<String>,
) -> Result<Json<Value>> {
    let user_id = ctx.require_user()?;
    debug!("[{}] Removing claps on article {} by user {}", ctx.request_id, article_id, user_id);

    let response = state.clap_service.remove_clap(user_id, &article_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": response,
        "message": "Claps removed successfully"
    })))
}

/// 获取文章鼓掌概况
/// GET /api/blog/articles/:article_id/claps
async fn get_claps(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(article_id): Path<String>,
) -> Result<Json<Value>> {
    let summary = state
        .clap_service
        .get_article_summary(&article_id, ctx.user_id.as_deref())
        .await?;

    Ok(Json(json!({
        "success": true,
        "data": summary
    })))
}
