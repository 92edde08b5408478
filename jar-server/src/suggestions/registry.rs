//! Suggestion registry
//!
//! Enforces the per-member quota, the suggestion mutability window
//! (setup/suggesting only) and ownership. Deletion is a soft flag flip;
//! a member whose last active suggestion disappears gets `has_suggested`
//! reset so the quota frees up.

use super::location;
use crate::core::Config;
use crate::db::repository::{
    member as member_repo, suggestion as suggestion_repo,
};
use crate::jars::lifecycle;
use crate::utils::validation::{
    MAX_TEXT_LEN, MAX_TITLE_LEN, validate_cost_tier, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Jar, Member, Suggestion, SuggestionCreate, SuggestionUpdate};
use shared::util::{new_id, now_millis};
use sqlx::SqlitePool;

fn validate_texts_create(data: &SuggestionCreate) -> AppResult<()> {
    validate_required_text(&data.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&data.description, "description", MAX_TEXT_LEN)?;
    validate_optional_text(&data.location, "location", MAX_TEXT_LEN)?;
    validate_cost_tier(&data.cost_tier)?;
    Ok(())
}

fn validate_texts_update(data: &SuggestionUpdate) -> AppResult<()> {
    if let Some(title) = &data.title {
        validate_required_text(title, "title", MAX_TITLE_LEN)?;
    }
    validate_optional_text(&data.description, "description", MAX_TEXT_LEN)?;
    validate_optional_text(&data.location, "location", MAX_TEXT_LEN)?;
    validate_cost_tier(&data.cost_tier)?;
    Ok(())
}

fn require_suggestion_window(jar: &Jar) -> AppResult<()> {
    if !jar.status.accepts_suggestions() {
        return Err(AppError::invalid_phase(jar.status.as_str(), "setup|suggesting"));
    }
    Ok(())
}

async fn require_member(pool: &SqlitePool, jar_id: &str, member_id: &str) -> AppResult<Member> {
    member_repo::find_in_jar(pool, jar_id, member_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::MemberNotFound, "Member not found in this jar")
        })
}

/// Create a suggestion for a jar.
pub async fn create_suggestion(
    pool: &SqlitePool,
    config: &Config,
    jar_id: &str,
    member_id: &str,
    data: SuggestionCreate,
) -> AppResult<Suggestion> {
    // fail fast, before any write
    validate_texts_create(&data)?;
    location::validate_create(&data, config.enable_structured_location)?;

    let jar = lifecycle::load(pool, jar_id).await?;
    require_suggestion_window(&jar)?;
    let member = require_member(pool, jar_id, member_id).await?;

    let existing = suggestion_repo::count_active_by_member(pool, jar_id, member_id).await?;
    if existing >= jar.max_suggestions_per_member {
        return Err(AppError::suggestion_quota(
            jar.max_suggestions_per_member,
            existing + 1,
        ));
    }

    let now = now_millis();
    let suggestion = Suggestion {
        id: new_id(),
        jar_id: jar_id.to_string(),
        member_id: member.id.clone(),
        title: data.title,
        description: data.description,
        location: data.location,
        cost_tier: data.cost_tier,
        latitude: data.latitude,
        longitude: data.longitude,
        map_bounds: data.map_bounds,
        geo_source: data.geo_source,
        location_confidence: data.location_confidence,
        location_verified_at: data.location_verified_at,
        is_active: true,
        created_at: now,
        updated_at: now,
    };

    // insert + member flag commit together
    let mut tx = pool.begin().await.map_err(|e| AppError::database(e.to_string()))?;
    suggestion_repo::insert(&mut *tx, &suggestion).await?;
    member_repo::set_has_suggested(&mut *tx, &member.id, true, now).await?;
    tx.commit().await.map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(jar_id = %jar_id, suggestion_id = %suggestion.id, "Suggestion created");
    Ok(suggestion)
}

/// All active suggestions of a jar (anonymous view — no member fields are
/// part of the Suggestion listing beyond the owning id).
pub async fn list_suggestions(pool: &SqlitePool, jar_id: &str) -> AppResult<Vec<Suggestion>> {
    lifecycle::load(pool, jar_id).await?;
    Ok(suggestion_repo::find_all_active(pool, jar_id).await?)
}

/// One active suggestion by id.
pub async fn get_suggestion(pool: &SqlitePool, suggestion_id: &str) -> AppResult<Suggestion> {
    suggestion_repo::find_active_by_id(pool, suggestion_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::SuggestionNotFound,
                format!("Suggestion with id {suggestion_id} not found"),
            )
        })
}

/// Update a suggestion. Owner only, and only while the jar still accepts
/// suggestions.
pub async fn update_suggestion(
    pool: &SqlitePool,
    config: &Config,
    suggestion_id: &str,
    member_id: &str,
    data: SuggestionUpdate,
) -> AppResult<Suggestion> {
    validate_texts_update(&data)?;
    location::validate_update(&data, config.enable_structured_location)?;

    let suggestion = get_suggestion(pool, suggestion_id).await?;
    if suggestion.member_id != member_id {
        return Err(AppError::new(ErrorCode::NotSuggestionOwner));
    }

    let jar = lifecycle::load(pool, &suggestion.jar_id).await?;
    require_suggestion_window(&jar)?;

    let updated = suggestion_repo::update_fields(pool, suggestion_id, &data, now_millis()).await?;
    Ok(updated)
}

/// Soft-delete a suggestion. Owner only, suggestion window only. When this
/// was the member's last active suggestion, has_suggested flips back.
pub async fn delete_suggestion(
    pool: &SqlitePool,
    suggestion_id: &str,
    member_id: &str,
) -> AppResult<()> {
    let suggestion = get_suggestion(pool, suggestion_id).await?;
    if suggestion.member_id != member_id {
        return Err(AppError::new(ErrorCode::NotSuggestionOwner));
    }

    let jar = lifecycle::load(pool, &suggestion.jar_id).await?;
    require_suggestion_window(&jar)?;

    let now = now_millis();
    let mut tx = pool.begin().await.map_err(|e| AppError::database(e.to_string()))?;
    suggestion_repo::soft_delete(&mut *tx, suggestion_id, now).await?;
    let remaining =
        suggestion_repo::count_active_by_member(&mut *tx, &suggestion.jar_id, member_id).await?;
    if remaining == 0 {
        member_repo::set_has_suggested(&mut *tx, member_id, false, now).await?;
    }
    tx.commit().await.map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(jar_id = %suggestion.jar_id, suggestion_id = %suggestion_id, "Suggestion deleted");
    Ok(())
}
