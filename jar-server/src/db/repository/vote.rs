//! Vote Repository
//!
//! Vote writes always happen inside the voting engine's replace transaction,
//! so the mutating functions take a generic executor.

use super::RepoResult;
use shared::models::Vote;
use sqlx::SqlitePool;

const VOTE_SELECT: &str =
    "SELECT id, member_id, suggestion_id, jar_id, points, created_at, updated_at FROM vote";

pub async fn insert<'e, E>(db: E, vote: &Vote) -> RepoResult<()>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query(
        "INSERT INTO vote (id, member_id, suggestion_id, jar_id, points, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(&vote.id)
    .bind(&vote.member_id)
    .bind(&vote.suggestion_id)
    .bind(&vote.jar_id)
    .bind(vote.points)
    .bind(vote.created_at)
    .bind(vote.updated_at)
    .execute(db)
    .await?;
    Ok(())
}

/// Delete all of a member's votes for a jar; returns the removed row count.
pub async fn delete_by_member<'e, E>(db: E, jar_id: &str, member_id: &str) -> RepoResult<u64>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let rows = sqlx::query("DELETE FROM vote WHERE jar_id = ? AND member_id = ?")
        .bind(jar_id)
        .bind(member_id)
        .execute(db)
        .await?;
    Ok(rows.rows_affected())
}

pub async fn find_by_member(
    pool: &SqlitePool,
    jar_id: &str,
    member_id: &str,
) -> RepoResult<Vec<Vote>> {
    let sql = format!("{VOTE_SELECT} WHERE jar_id = ? AND member_id = ? ORDER BY created_at ASC");
    let rows = sqlx::query_as::<_, Vote>(&sql)
        .bind(jar_id)
        .bind(member_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_suggestion(pool: &SqlitePool, suggestion_id: &str) -> RepoResult<Vec<Vote>> {
    let sql = format!("{VOTE_SELECT} WHERE suggestion_id = ? ORDER BY created_at ASC");
    let rows = sqlx::query_as::<_, Vote>(&sql)
        .bind(suggestion_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Total vote rows cast in a jar.
pub async fn count_for_jar(pool: &SqlitePool, jar_id: &str) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM vote WHERE jar_id = ?")
        .bind(jar_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Per-suggestion totals for a jar: (suggestion_id, total_points, vote_count).
pub async fn totals_by_suggestion(
    pool: &SqlitePool,
    jar_id: &str,
) -> RepoResult<Vec<(String, i64, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64, i64)>(
        "SELECT suggestion_id, COALESCE(SUM(points), 0), COUNT(*) FROM vote WHERE jar_id = ? GROUP BY suggestion_id",
    )
    .bind(jar_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
