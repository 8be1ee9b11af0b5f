use crate::{
    error::Result,
    models::article::NormalizeArticleRequest,
    state::AppState,
    utils::middleware::RequestContext,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::post,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/normalize", post(normalize_article))
}

/// 计算文章的 slug、SEO 描述和阅读时间
/// POST /api/blog/articles/normalize
async fn normalize_article(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    payload: std::result::Result<Json<NormalizeArticleRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(request) = payload?;
    debug!("[{}] Normalizing article titled {:?}", ctx.request_id, request.title);

    let normalized = state.article_service.normalize_article(&request)?;

    Ok(Json(json!({
        "success": true,
        "data": normalized
    })))
}
