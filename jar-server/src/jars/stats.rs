//! Jar participation statistics

use super::lifecycle;
use crate::db::repository::{member as member_repo, suggestion as suggestion_repo, vote as vote_repo};
use crate::utils::AppResult;
use shared::models::JarStats;
use sqlx::SqlitePool;

/// Assemble participation counts for one jar. Counts cover active members
/// and active suggestions only.
pub async fn get_stats(pool: &SqlitePool, jar_id: &str) -> AppResult<JarStats> {
    let jar = lifecycle::load(pool, jar_id).await?;

    let members = member_repo::find_all_active(pool, jar_id).await?;
    let total_suggestions = suggestion_repo::count_active(pool, jar_id).await?;
    let total_votes_cast = vote_repo::count_for_jar(pool, jar_id).await?;

    let members_suggested = members.iter().filter(|m| m.has_suggested).count() as i64;
    let members_voted = members.iter().filter(|m| m.has_voted).count() as i64;

    Ok(JarStats {
        jar_id: jar.id,
        total_members: members.len() as i64,
        total_suggestions,
        members_suggested,
        members_voted,
        total_votes_cast,
        status: jar.status,
    })
}
