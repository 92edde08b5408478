//! Jar lifecycle state machine
//!
//! Forward path: setup → suggesting → voting → completed, each step also
//! reversible one step back for operator correction. Transitions are
//! compare-and-swap updates so a manual call racing the deadline sweep loses
//! cleanly instead of double-applying the points derivation.

use crate::db::repository::{jar as jar_repo, suggestion as suggestion_repo};
use crate::services::notify::Notifier;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Jar, JarStatus};
use shared::util::now_millis;
use sqlx::SqlitePool;

/// Points budget derived when voting opens: one fewer than the number of
/// options, floored at 1. (The lazy fallback in the voting engine derives
/// from member count instead; the two formulas are intentionally separate.)
pub fn points_from_suggestions(count: i64) -> i64 {
    (count - 1).max(1)
}

/// Load a jar or fail with JarNotFound.
pub async fn load(pool: &SqlitePool, jar_id: &str) -> AppResult<Jar> {
    jar_repo::find_by_id(pool, jar_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::JarNotFound, format!("Jar with id {jar_id} not found"))
        })
}

/// Shared CAS transition: require `required`, move to `to`.
async fn apply_transition(
    pool: &SqlitePool,
    notifier: &dyn Notifier,
    jar_id: &str,
    required: JarStatus,
    to: JarStatus,
    points_per_voter: Option<i64>,
) -> AppResult<Jar> {
    let jar = load(pool, jar_id).await?;
    if jar.status != required {
        return Err(AppError::invalid_phase(jar.status.as_str(), required.as_str()));
    }

    let now = now_millis();
    if !jar_repo::transition_cas(pool, jar_id, required, to, points_per_voter, now).await? {
        // Lost a race against the sweeper or another operator; report the
        // now-current state.
        let current = load(pool, jar_id).await?;
        return Err(AppError::invalid_phase(current.status.as_str(), required.as_str()));
    }

    let jar = load(pool, jar_id).await?;
    tracing::info!(jar_id = %jar.id, from = %required, to = %to, "Jar phase transition");
    notifier.phase_changed(&jar, to).await;
    Ok(jar)
}

/// setup → suggesting
pub async fn start_suggesting(
    pool: &SqlitePool,
    notifier: &dyn Notifier,
    jar_id: &str,
) -> AppResult<Jar> {
    apply_transition(pool, notifier, jar_id, JarStatus::Setup, JarStatus::Suggesting, None).await
}

/// suggesting → voting
///
/// Requires at least one active suggestion and recomputes the points budget
/// from the active suggestion count, overriding any configured value.
pub async fn start_voting(
    pool: &SqlitePool,
    notifier: &dyn Notifier,
    jar_id: &str,
) -> AppResult<Jar> {
    let jar = load(pool, jar_id).await?;
    if jar.status != JarStatus::Suggesting {
        return Err(AppError::invalid_phase(jar.status.as_str(), JarStatus::Suggesting.as_str()));
    }

    let suggestion_count = suggestion_repo::count_active(pool, jar_id).await?;
    if suggestion_count == 0 {
        return Err(AppError::new(ErrorCode::NoActiveSuggestions));
    }

    let points = points_from_suggestions(suggestion_count);
    let jar = apply_transition(
        pool,
        notifier,
        jar_id,
        JarStatus::Suggesting,
        JarStatus::Voting,
        Some(points),
    )
    .await?;
    tracing::info!(
        jar_id = %jar.id,
        suggestion_count,
        points_per_voter = points,
        "Voting opened"
    );
    Ok(jar)
}

/// voting → completed
pub async fn complete(pool: &SqlitePool, notifier: &dyn Notifier, jar_id: &str) -> AppResult<Jar> {
    apply_transition(pool, notifier, jar_id, JarStatus::Voting, JarStatus::Completed, None).await
}

/// suggesting → setup
pub async fn revert_to_setup(
    pool: &SqlitePool,
    notifier: &dyn Notifier,
    jar_id: &str,
) -> AppResult<Jar> {
    apply_transition(pool, notifier, jar_id, JarStatus::Suggesting, JarStatus::Setup, None).await
}

/// voting → suggesting
pub async fn revert_to_suggesting(
    pool: &SqlitePool,
    notifier: &dyn Notifier,
    jar_id: &str,
) -> AppResult<Jar> {
    apply_transition(pool, notifier, jar_id, JarStatus::Voting, JarStatus::Suggesting, None).await
}

/// completed → voting
pub async fn revert_to_voting(
    pool: &SqlitePool,
    notifier: &dyn Notifier,
    jar_id: &str,
) -> AppResult<Jar> {
    apply_transition(pool, notifier, jar_id, JarStatus::Completed, JarStatus::Voting, None).await
}

/// Soft delete: any phase before completion → cancelled, jar deactivated.
pub async fn cancel(pool: &SqlitePool, notifier: &dyn Notifier, jar_id: &str) -> AppResult<Jar> {
    let jar = load(pool, jar_id).await?;
    if !jar_repo::cancel(pool, jar_id, now_millis()).await? {
        return Err(AppError::invalid_phase(jar.status.as_str(), "setup|suggesting|voting"));
    }
    let jar = load(pool, jar_id).await?;
    tracing::info!(jar_id = %jar.id, "Jar cancelled");
    notifier.phase_changed(&jar, JarStatus::Cancelled).await;
    Ok(jar)
}
