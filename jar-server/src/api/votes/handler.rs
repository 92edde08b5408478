//! Vote API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::AppResult;
use crate::votes::engine;
use shared::models::{SuggestionVotes, VoteBatch, VoteSummary};

#[derive(serde::Deserialize)]
pub struct MemberQuery {
    pub member_id: String,
}

/// POST /api/votes/:jar_id/vote?member_id=xxx - 提交完整分配（整体替换）
pub async fn submit(
    State(state): State<ServerState>,
    Path(jar_id): Path<String>,
    Query(query): Query<MemberQuery>,
    Json(payload): Json<VoteBatch>,
) -> AppResult<Json<VoteSummary>> {
    let summary = engine::submit_votes(&state.pool, &jar_id, &query.member_id, payload).await?;
    Ok(Json(summary))
}

/// GET /api/votes/:jar_id/votes/:member_id - 成员当前分配
pub async fn member_votes(
    State(state): State<ServerState>,
    Path((jar_id, member_id)): Path<(String, String)>,
) -> AppResult<Json<VoteSummary>> {
    let summary = engine::get_member_votes(&state.pool, &jar_id, &member_id).await?;
    Ok(Json(summary))
}

#[derive(Serialize)]
pub struct ClearResponse {
    pub deleted: u64,
}

/// DELETE /api/votes/:jar_id/votes/:member_id - 清空成员投票
pub async fn clear(
    State(state): State<ServerState>,
    Path((jar_id, member_id)): Path<(String, String)>,
) -> AppResult<Json<ClearResponse>> {
    let deleted = engine::clear_votes(&state.pool, &jar_id, &member_id).await?;
    Ok(Json(ClearResponse { deleted }))
}

/// GET /api/votes/:jar_id/suggestion/:suggestion_id/votes - 单个建议的投票统计
pub async fn suggestion_votes(
    State(state): State<ServerState>,
    Path((jar_id, suggestion_id)): Path<(String, String)>,
) -> AppResult<Json<SuggestionVotes>> {
    let votes = engine::get_suggestion_votes(
        &state.pool,
        state.notifier.as_ref(),
        &jar_id,
        &suggestion_id,
    )
    .await?;
    Ok(Json(votes))
}
