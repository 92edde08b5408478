//! Lazy deadline sweep
//!
//! Runs on every jar read and results read, and periodically from the
//! background sweeper. Idempotent: re-checking an already-transitioned jar
//! changes nothing, and CAS updates make concurrent sweeps safe.

use super::lifecycle::{self, points_from_suggestions};
use crate::db::repository::{jar as jar_repo, suggestion as suggestion_repo};
use crate::services::notify::Notifier;
use crate::utils::AppResult;
use crate::utils::time::is_past;
use shared::models::{Jar, JarStatus};
use sqlx::SqlitePool;

/// Check deadlines for one jar and advance its phase where due.
/// Returns the (possibly updated) jar.
pub async fn sweep_jar(
    pool: &SqlitePool,
    notifier: &dyn Notifier,
    mut jar: Jar,
    now: i64,
) -> AppResult<Jar> {
    // suggesting → voting, only when something can actually be voted on.
    // With zero suggestions the jar stays in suggesting past its deadline —
    // a voting phase without options would be unrunnable.
    if jar.status == JarStatus::Suggesting && is_past(jar.suggestion_deadline, now) {
        let suggestion_count = suggestion_repo::count_active(pool, &jar.id).await?;
        if suggestion_count > 0 {
            let points = points_from_suggestions(suggestion_count);
            if jar_repo::transition_cas(
                pool,
                &jar.id,
                JarStatus::Suggesting,
                JarStatus::Voting,
                Some(points),
                now,
            )
            .await?
            {
                jar = lifecycle::load(pool, &jar.id).await?;
                tracing::info!(
                    jar_id = %jar.id,
                    suggestion_count,
                    points_per_voter = points,
                    "Suggestion deadline passed, advanced to voting"
                );
                notifier.phase_changed(&jar, JarStatus::Voting).await;
            } else {
                // Someone else moved the jar first; pick up their state.
                jar = lifecycle::load(pool, &jar.id).await?;
            }
        } else {
            tracing::debug!(jar_id = %jar.id, "Suggestion deadline passed with no suggestions");
        }
    }

    // voting → completed. Checked even when the jar just entered voting in
    // this same sweep.
    if jar.status == JarStatus::Voting && is_past(jar.voting_deadline, now) {
        if jar_repo::transition_cas(pool, &jar.id, JarStatus::Voting, JarStatus::Completed, None, now)
            .await?
        {
            jar = lifecycle::load(pool, &jar.id).await?;
            tracing::info!(jar_id = %jar.id, "Voting deadline passed, jar completed");
            notifier.phase_changed(&jar, JarStatus::Completed).await;
        } else {
            jar = lifecycle::load(pool, &jar.id).await?;
        }
    }

    Ok(jar)
}

/// Load a jar and run the deadline sweep on it — the entry point for all
/// freshness-sensitive reads.
pub async fn sweep_and_load(
    pool: &SqlitePool,
    notifier: &dyn Notifier,
    jar_id: &str,
) -> AppResult<Jar> {
    let jar = lifecycle::load(pool, jar_id).await?;
    sweep_jar(pool, notifier, jar, shared::util::now_millis()).await
}
