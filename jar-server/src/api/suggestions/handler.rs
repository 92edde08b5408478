//! Suggestion API Handlers
//!
//! 调用方通过 `member_id` 查询参数声明身份（无会话层，身份即成员 ID）。

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::suggestions::registry;
use crate::utils::AppResult;
use shared::models::{Suggestion, SuggestionCreate, SuggestionUpdate};

#[derive(serde::Deserialize)]
pub struct MemberQuery {
    pub member_id: String,
}

/// POST /api/suggestions/:jar_id/suggest?member_id=xxx - 创建建议
pub async fn create(
    State(state): State<ServerState>,
    Path(jar_id): Path<String>,
    Query(query): Query<MemberQuery>,
    Json(payload): Json<SuggestionCreate>,
) -> AppResult<Json<Suggestion>> {
    let suggestion = registry::create_suggestion(
        &state.pool,
        &state.config,
        &jar_id,
        &query.member_id,
        payload,
    )
    .await?;
    Ok(Json(suggestion))
}

/// GET /api/suggestions/:jar_id/suggestions - 活动建议列表（匿名）
pub async fn list(
    State(state): State<ServerState>,
    Path(jar_id): Path<String>,
) -> AppResult<Json<Vec<Suggestion>>> {
    let suggestions = registry::list_suggestions(&state.pool, &jar_id).await?;
    Ok(Json(suggestions))
}

/// GET /api/suggestions/suggestion/:id - 获取单个建议
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(suggestion_id): Path<String>,
) -> AppResult<Json<Suggestion>> {
    let suggestion = registry::get_suggestion(&state.pool, &suggestion_id).await?;
    Ok(Json(suggestion))
}

/// PATCH /api/suggestions/suggestion/:id?member_id=xxx - 更新建议（仅限所有者）
pub async fn update(
    State(state): State<ServerState>,
    Path(suggestion_id): Path<String>,
    Query(query): Query<MemberQuery>,
    Json(payload): Json<SuggestionUpdate>,
) -> AppResult<Json<Suggestion>> {
    let suggestion = registry::update_suggestion(
        &state.pool,
        &state.config,
        &suggestion_id,
        &query.member_id,
        payload,
    )
    .await?;
    Ok(Json(suggestion))
}

/// DELETE /api/suggestions/suggestion/:id?member_id=xxx - 软删除建议（仅限所有者）
pub async fn delete(
    State(state): State<ServerState>,
    Path(suggestion_id): Path<String>,
    Query(query): Query<MemberQuery>,
) -> AppResult<Json<bool>> {
    registry::delete_suggestion(&state.pool, &suggestion_id, &query.member_id).await?;
    Ok(Json(true))
}
