//! Jar CRUD
//!
//! Creation, detail reads (with the lazy deadline sweep), partial updates
//! and soft delete. Phase transitions live in [`super::lifecycle`].

use super::{lifecycle, sweep};
use crate::core::Config;
use crate::db::repository::{jar as jar_repo, member as member_repo, suggestion as suggestion_repo};
use crate::services::notify::Notifier;
use crate::utils::validation::{
    MAX_TEXT_LEN, MAX_TITLE_LEN, normalize_contact, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Jar, JarCreate, JarDetail, JarStatus, JarUpdate, Member};
use shared::util::{new_id, now_millis, short_id};
use sqlx::SqlitePool;

/// Create a jar in `setup`.
///
/// When a creator contact is given, the creator auto-joins as the first
/// member ("Host"); otherwise members join later via the join endpoint.
pub async fn create_jar(pool: &SqlitePool, config: &Config, data: JarCreate) -> AppResult<Jar> {
    validate_required_text(&data.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&data.description, "description", MAX_TEXT_LEN)?;

    let creator_contact = match &data.creator_contact {
        Some(raw) => Some(normalize_contact(raw)?),
        None => None,
    };

    let points_per_voter = data.points_per_voter.unwrap_or(config.default_points_per_voter);
    if points_per_voter < 0 {
        return Err(AppError::validation("points_per_voter must not be negative"));
    }
    let max_suggestions = data
        .max_suggestions_per_member
        .unwrap_or(config.default_max_suggestions);
    if max_suggestions < 1 {
        return Err(AppError::validation("max_suggestions_per_member must be at least 1"));
    }

    let now = now_millis();
    let jar = Jar {
        id: short_id(),
        title: data.title,
        description: data.description,
        points_per_voter,
        max_suggestions_per_member: max_suggestions,
        suggestion_deadline: data.suggestion_deadline,
        voting_deadline: data.voting_deadline,
        hangout_time: data.hangout_time,
        status: JarStatus::Setup,
        is_active: true,
        created_at: now,
        updated_at: now,
        creator_contact: creator_contact.clone(),
    };
    jar_repo::insert(pool, &jar).await?;

    if let Some(contact) = creator_contact {
        let host = Member {
            id: new_id(),
            jar_id: jar.id.clone(),
            contact_number: contact,
            display_name: Some("Host".to_string()),
            has_suggested: false,
            has_voted: false,
            is_active: true,
            joined_at: now,
            last_active_at: now,
        };
        member_repo::insert(pool, &host).await?;
    }

    tracing::info!(jar_id = %jar.id, title = %jar.title, "Jar created");
    Ok(jar)
}

/// Jar detail with participation counts. Runs the lazy deadline sweep first
/// so the returned status is never stale.
pub async fn get_jar_detail(
    pool: &SqlitePool,
    notifier: &dyn Notifier,
    jar_id: &str,
) -> AppResult<JarDetail> {
    let jar = sweep::sweep_and_load(pool, notifier, jar_id).await?;

    let members = member_repo::find_all_active(pool, jar_id).await?;
    let suggestion_count = suggestion_repo::count_active(pool, jar_id).await?;
    let members_who_suggested = members.iter().filter(|m| m.has_suggested).count() as i64;
    let members_who_voted = members.iter().filter(|m| m.has_voted).count() as i64;

    Ok(JarDetail {
        jar,
        member_count: members.len() as i64,
        suggestion_count,
        members_who_suggested,
        members_who_voted,
    })
}

/// Partial update — applies only the provided fields. A cancelled jar is
/// terminal and rejects all updates.
pub async fn update_jar(pool: &SqlitePool, jar_id: &str, data: JarUpdate) -> AppResult<Jar> {
    if let Some(title) = &data.title {
        validate_required_text(title, "title", MAX_TITLE_LEN)?;
    }
    validate_optional_text(&data.description, "description", MAX_TEXT_LEN)?;

    let jar = lifecycle::load(pool, jar_id).await?;
    if jar.status == JarStatus::Cancelled {
        return Err(AppError::invalid_phase(jar.status.as_str(), "setup|suggesting|voting|completed"));
    }

    let jar = jar_repo::update_fields(pool, jar_id, &data, now_millis()).await?;
    Ok(jar)
}

/// Soft delete (cancel) a jar.
pub async fn delete_jar(pool: &SqlitePool, notifier: &dyn Notifier, jar_id: &str) -> AppResult<Jar> {
    lifecycle::cancel(pool, notifier, jar_id).await
}
