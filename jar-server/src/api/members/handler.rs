//! Member API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::member;
use crate::jars::lifecycle;
use crate::utils::validation::{MAX_NAME_LEN, normalize_contact, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Member, MemberJoin, MemberStatus};
use shared::util::{new_id, now_millis};

/// POST /api/members/:jar_id/join - 加入 jar
///
/// 同一号码重复加入返回既有成员（刷新 last_active_at，可更新昵称）。
pub async fn join(
    State(state): State<ServerState>,
    Path(jar_id): Path<String>,
    Json(payload): Json<MemberJoin>,
) -> AppResult<Json<Member>> {
    let contact = normalize_contact(&payload.contact_number)?;
    validate_optional_text(&payload.display_name, "display_name", MAX_NAME_LEN)?;

    let jar = lifecycle::load(&state.pool, &jar_id).await?;
    if !jar.is_active {
        return Err(AppError::new(ErrorCode::JarInactive));
    }

    let now = now_millis();
    if let Some(existing) = member::find_by_contact(&state.pool, &jar_id, &contact).await? {
        if let Some(name) = payload.display_name {
            let updated = member::set_display_name(&state.pool, &existing.id, &name, now).await?;
            return Ok(Json(updated));
        }
        member::touch_last_active(&state.pool, &existing.id, now).await?;
        let refreshed = member::find_by_id(&state.pool, &existing.id)
            .await?
            .unwrap_or(existing);
        return Ok(Json(refreshed));
    }

    let new_member = Member {
        id: new_id(),
        jar_id: jar_id.clone(),
        contact_number: contact,
        display_name: payload.display_name,
        has_suggested: false,
        has_voted: false,
        is_active: true,
        joined_at: now,
        last_active_at: now,
    };
    member::insert(&state.pool, &new_member).await?;

    tracing::info!(jar_id = %jar_id, member_id = %new_member.id, "Member joined");
    Ok(Json(new_member))
}

/// GET /api/members/:jar_id/members - 匿名成员列表（参与状态，不含联系方式）
pub async fn list(
    State(state): State<ServerState>,
    Path(jar_id): Path<String>,
) -> AppResult<Json<Vec<MemberStatus>>> {
    lifecycle::load(&state.pool, &jar_id).await?;

    let members = member::find_all_active(&state.pool, &jar_id).await?;
    let statuses = members
        .into_iter()
        .map(|m| MemberStatus {
            display_name: Some(m.display_name.unwrap_or_else(|| "Anonymous".to_string())),
            has_suggested: m.has_suggested,
            has_voted: m.has_voted,
            joined_at: m.joined_at,
        })
        .collect();
    Ok(Json(statuses))
}

/// GET /api/members/member/:member_id - 获取单个成员
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(member_id): Path<String>,
) -> AppResult<Json<Member>> {
    let member = member::find_by_id(&state.pool, &member_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::MemberNotFound,
                format!("Member with id {member_id} not found"),
            )
        })?;
    Ok(Json(member))
}

/// GET /api/members/:jar_id/member-by-contact/:contact - 按号码查成员
///
/// 会话恢复用：号码先归一化再查询。
pub async fn get_by_contact(
    State(state): State<ServerState>,
    Path((jar_id, contact)): Path<(String, String)>,
) -> AppResult<Json<Member>> {
    let contact = normalize_contact(&contact)?;

    let member = member::find_by_contact(&state.pool, &jar_id, &contact)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::MemberNotFound,
                format!("Member with contact {contact} not found in this jar"),
            )
        })?;

    member::touch_last_active(&state.pool, &member.id, now_millis()).await?;
    Ok(Json(member))
}

#[derive(serde::Deserialize)]
pub struct DisplayNameUpdate {
    pub display_name: String,
}

/// PATCH /api/members/member/:member_id/display-name - 更新昵称
pub async fn update_display_name(
    State(state): State<ServerState>,
    Path(member_id): Path<String>,
    Json(payload): Json<DisplayNameUpdate>,
) -> AppResult<Json<Member>> {
    validate_optional_text(
        &Some(payload.display_name.clone()),
        "display_name",
        MAX_NAME_LEN,
    )?;
    let member =
        member::set_display_name(&state.pool, &member_id, &payload.display_name, now_millis())
            .await?;
    Ok(Json(member))
}

/// DELETE /api/members/member/:member_id - 退出 jar（软删除）
pub async fn leave(
    State(state): State<ServerState>,
    Path(member_id): Path<String>,
) -> AppResult<Json<bool>> {
    member::find_by_id(&state.pool, &member_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::MemberNotFound,
                format!("Member with id {member_id} not found"),
            )
        })?;

    let removed = member::deactivate(&state.pool, &member_id, now_millis()).await?;
    Ok(Json(removed))
}
