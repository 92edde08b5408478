//! Jar Repository

use super::{RepoError, RepoResult};
use shared::models::{Jar, JarStatus, JarUpdate};
use sqlx::SqlitePool;

const JAR_SELECT: &str = "SELECT id, title, description, points_per_voter, max_suggestions_per_member, suggestion_deadline, voting_deadline, hangout_time, status, is_active, created_at, updated_at, creator_contact FROM jar";

pub async fn insert(pool: &SqlitePool, jar: &Jar) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO jar (id, title, description, points_per_voter, max_suggestions_per_member, suggestion_deadline, voting_deadline, hangout_time, status, is_active, created_at, updated_at, creator_contact) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
    )
    .bind(&jar.id)
    .bind(&jar.title)
    .bind(&jar.description)
    .bind(jar.points_per_voter)
    .bind(jar.max_suggestions_per_member)
    .bind(jar.suggestion_deadline)
    .bind(jar.voting_deadline)
    .bind(jar.hangout_time)
    .bind(jar.status)
    .bind(jar.is_active)
    .bind(jar.created_at)
    .bind(jar.updated_at)
    .bind(&jar.creator_contact)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Jar>> {
    let sql = format!("{JAR_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Jar>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Apply the provided fields only; absent fields keep their value.
pub async fn update_fields(
    pool: &SqlitePool,
    id: &str,
    data: &JarUpdate,
    now: i64,
) -> RepoResult<Jar> {
    let rows = sqlx::query(
        "UPDATE jar SET title = COALESCE(?1, title), description = COALESCE(?2, description), suggestion_deadline = COALESCE(?3, suggestion_deadline), voting_deadline = COALESCE(?4, voting_deadline), hangout_time = COALESCE(?5, hangout_time), updated_at = ?6 WHERE id = ?7",
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.suggestion_deadline)
    .bind(data.voting_deadline)
    .bind(data.hangout_time)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Jar {id}")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Jar {id}")))
}

/// Compare-and-swap status transition.
///
/// Returns false when the jar was not in `from` anymore — the caller lost a
/// race (or was called out of order) and must re-read to report the actual
/// state. When `points_per_voter` is provided it is written in the same
/// statement, so derivation and transition commit atomically.
pub async fn transition_cas(
    pool: &SqlitePool,
    id: &str,
    from: JarStatus,
    to: JarStatus,
    points_per_voter: Option<i64>,
    now: i64,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE jar SET status = ?1, points_per_voter = COALESCE(?2, points_per_voter), updated_at = ?3 WHERE id = ?4 AND status = ?5",
    )
    .bind(to)
    .bind(points_per_voter)
    .bind(now)
    .bind(id)
    .bind(from)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Persist a derived points budget.
pub async fn set_points_per_voter(
    pool: &SqlitePool,
    id: &str,
    points: i64,
    now: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE jar SET points_per_voter = ?, updated_at = ? WHERE id = ?")
        .bind(points)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Soft delete: deactivate and mark cancelled. Completed/cancelled jars are
/// left untouched (returns false).
pub async fn cancel(pool: &SqlitePool, id: &str, now: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE jar SET is_active = 0, status = 'cancelled', updated_at = ? WHERE id = ? AND status NOT IN ('completed', 'cancelled')",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Jars whose deadline has passed and that may need a phase advance —
/// the sweeper's work list.
pub async fn find_past_deadline(pool: &SqlitePool, now: i64) -> RepoResult<Vec<Jar>> {
    let sql = format!(
        "{JAR_SELECT} WHERE is_active = 1 AND ((status = 'suggesting' AND suggestion_deadline IS NOT NULL AND suggestion_deadline < ?1) OR (status = 'voting' AND voting_deadline IS NOT NULL AND voting_deadline < ?1))"
    );
    let rows = sqlx::query_as::<_, Jar>(&sql)
        .bind(now)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}
