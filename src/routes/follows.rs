use crate::{
    error::Result,
    state::AppState,
    utils::middleware::RequestContext,
};
use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/:user_id", put(follow_user).delete(unfollow_user))
        .route("/:user_id/toggle", post(toggle_follow))
        .route("/:user_id/stats", get(get_follow_stats))
}

/// 关注用户
/// PUT /api/blog/follows/:user_id
async fn follow_user(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(following_id): Path<String>,
) -> Result<Json<Value>> {
    let follower_id = ctx.require_user()?;
    debug!("User {} following user {}", follower_id, following_id);

    let follow = state.follow_service.follow_user(follower_id, &following_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": follow
    })))
}

/// 取消关注
/// DELETE /api/blog/follows/:user_id
async fn unfollow_user(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(following_id): Path<String>,
) -> Result<Json<Value>> {
    let follower_id = ctx.require_user()?;
    debug!("User {} unfollowing user {}", follower_id, following_id);

    let follow = state.follow_service.unfollow_user(follower_id, &following_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": follow
    })))
}

/// POST /api/blog/follows/:user_id/toggle
async fn toggle_follow(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Path(following_id): Path<String>,
) -> Result<Json<Value>> {
    let follower_id = ctx.require_user()?;

    let follow = state.follow_service.toggle_follow(follower_id, &following_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": follow
    })))
}

/// 获取关注统计
/// GET /api/blog/follows/:user_id/stats
async fn get_follow_stats(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Value>> {
    let stats = state.follow_service.get_follow_stats(&user_id).await?;

    Ok(Json(json!({
        "success": true,
        "data": stats
    })))
}
