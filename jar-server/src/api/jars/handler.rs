//! Jar API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::jars::{lifecycle, manager, stats};
use crate::utils::AppResult;
use crate::votes::results;
use shared::models::{Jar, JarCreate, JarDetail, JarResults, JarStats, JarUpdate};

/// POST /api/jars - 创建 jar
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<JarCreate>,
) -> AppResult<Json<Jar>> {
    let jar = manager::create_jar(&state.pool, &state.config, payload).await?;
    Ok(Json(jar))
}

/// GET /api/jars/:id - 获取 jar 详情（触发惰性截止检查）
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<JarDetail>> {
    let detail = manager::get_jar_detail(&state.pool, state.notifier.as_ref(), &id).await?;
    Ok(Json(detail))
}

/// PATCH /api/jars/:id - 部分更新
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<JarUpdate>,
) -> AppResult<Json<Jar>> {
    let jar = manager::update_jar(&state.pool, &id, payload).await?;
    Ok(Json(jar))
}

/// DELETE /api/jars/:id - 软删除（取消）
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Jar>> {
    let jar = manager::delete_jar(&state.pool, state.notifier.as_ref(), &id).await?;
    Ok(Json(jar))
}

/// POST /api/jars/:id/start-suggesting
pub async fn start_suggesting(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Jar>> {
    let jar = lifecycle::start_suggesting(&state.pool, state.notifier.as_ref(), &id).await?;
    Ok(Json(jar))
}

/// POST /api/jars/:id/start-voting - 进入投票阶段并推导点数预算
pub async fn start_voting(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Jar>> {
    let jar = lifecycle::start_voting(&state.pool, state.notifier.as_ref(), &id).await?;
    Ok(Json(jar))
}

/// POST /api/jars/:id/complete
pub async fn complete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Jar>> {
    let jar = lifecycle::complete(&state.pool, state.notifier.as_ref(), &id).await?;
    Ok(Json(jar))
}

/// POST /api/jars/:id/revert-to-setup
pub async fn revert_to_setup(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Jar>> {
    let jar = lifecycle::revert_to_setup(&state.pool, state.notifier.as_ref(), &id).await?;
    Ok(Json(jar))
}

/// POST /api/jars/:id/revert-to-suggesting
pub async fn revert_to_suggesting(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Jar>> {
    let jar = lifecycle::revert_to_suggesting(&state.pool, state.notifier.as_ref(), &id).await?;
    Ok(Json(jar))
}

/// POST /api/jars/:id/revert-to-voting
pub async fn revert_to_voting(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Jar>> {
    let jar = lifecycle::revert_to_voting(&state.pool, state.notifier.as_ref(), &id).await?;
    Ok(Json(jar))
}

/// GET /api/jars/:id/stats - 参与统计
pub async fn stats(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<JarStats>> {
    let stats = stats::get_stats(&state.pool, &id).await?;
    Ok(Json(stats))
}

/// GET /api/jars/:id/results - 排名结果（触发惰性截止检查）
pub async fn results(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<JarResults>> {
    let results = results::get_results(&state.pool, state.notifier.as_ref(), &id).await?;
    Ok(Json(results))
}
