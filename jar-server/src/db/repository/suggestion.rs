//! Suggestion Repository

use super::{RepoError, RepoResult};
use shared::models::{Suggestion, SuggestionUpdate};
use sqlx::SqlitePool;

const SUGGESTION_SELECT: &str = "SELECT id, jar_id, member_id, title, description, location, cost_tier, latitude, longitude, map_bounds, geo_source, location_confidence, location_verified_at, is_active, created_at, updated_at FROM suggestion";

pub async fn insert<'e, E>(db: E, s: &Suggestion) -> RepoResult<()>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query(
        "INSERT INTO suggestion (id, jar_id, member_id, title, description, location, cost_tier, latitude, longitude, map_bounds, geo_source, location_confidence, location_verified_at, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
    )
    .bind(&s.id)
    .bind(&s.jar_id)
    .bind(&s.member_id)
    .bind(&s.title)
    .bind(&s.description)
    .bind(&s.location)
    .bind(&s.cost_tier)
    .bind(s.latitude)
    .bind(s.longitude)
    .bind(&s.map_bounds)
    .bind(&s.geo_source)
    .bind(s.location_confidence)
    .bind(s.location_verified_at)
    .bind(s.is_active)
    .bind(s.created_at)
    .bind(s.updated_at)
    .execute(db)
    .await?;
    Ok(())
}

/// Active suggestion by id (soft-deleted rows are invisible here).
pub async fn find_active_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Suggestion>> {
    let sql = format!("{SUGGESTION_SELECT} WHERE id = ? AND is_active = 1");
    let row = sqlx::query_as::<_, Suggestion>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Active suggestion by id, scoped to a jar — used for vote batch validation.
pub async fn find_active_in_jar(
    pool: &SqlitePool,
    jar_id: &str,
    id: &str,
) -> RepoResult<Option<Suggestion>> {
    let sql = format!("{SUGGESTION_SELECT} WHERE id = ? AND jar_id = ? AND is_active = 1");
    let row = sqlx::query_as::<_, Suggestion>(&sql)
        .bind(id)
        .bind(jar_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// All active suggestions of a jar, in creation order.
///
/// 结果排序依赖这里的 created_at ASC（先到先得的稳定平局规则）。
pub async fn find_all_active(pool: &SqlitePool, jar_id: &str) -> RepoResult<Vec<Suggestion>> {
    let sql =
        format!("{SUGGESTION_SELECT} WHERE jar_id = ? AND is_active = 1 ORDER BY created_at ASC, rowid ASC");
    let rows = sqlx::query_as::<_, Suggestion>(&sql)
        .bind(jar_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn count_active(pool: &SqlitePool, jar_id: &str) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM suggestion WHERE jar_id = ? AND is_active = 1",
    )
    .bind(jar_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Active suggestion count for one member; executor-generic so the delete
/// path can count inside its own transaction.
pub async fn count_active_by_member<'e, E>(db: E, jar_id: &str, member_id: &str) -> RepoResult<i64>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM suggestion WHERE jar_id = ? AND member_id = ? AND is_active = 1",
    )
    .bind(jar_id)
    .bind(member_id)
    .fetch_one(db)
    .await?;
    Ok(count)
}

/// Apply the provided fields only; absent fields keep their value.
pub async fn update_fields(
    pool: &SqlitePool,
    id: &str,
    data: &SuggestionUpdate,
    now: i64,
) -> RepoResult<Suggestion> {
    let rows = sqlx::query(
        "UPDATE suggestion SET title = COALESCE(?1, title), description = COALESCE(?2, description), location = COALESCE(?3, location), cost_tier = COALESCE(?4, cost_tier), latitude = COALESCE(?5, latitude), longitude = COALESCE(?6, longitude), map_bounds = COALESCE(?7, map_bounds), geo_source = COALESCE(?8, geo_source), location_confidence = COALESCE(?9, location_confidence), location_verified_at = COALESCE(?10, location_verified_at), updated_at = ?11 WHERE id = ?12 AND is_active = 1",
    )
    .bind(&data.title)
    .bind(&data.description)
    .bind(&data.location)
    .bind(&data.cost_tier)
    .bind(data.latitude)
    .bind(data.longitude)
    .bind(&data.map_bounds)
    .bind(&data.geo_source)
    .bind(data.location_confidence)
    .bind(data.location_verified_at)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Suggestion {id}")));
    }
    find_active_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Suggestion {id}")))
}

/// Soft delete; runs on the caller's executor so the has_suggested rollback
/// can share the transaction.
pub async fn soft_delete<'e, E>(db: E, id: &str, now: i64) -> RepoResult<bool>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let rows =
        sqlx::query("UPDATE suggestion SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1")
            .bind(now)
            .bind(id)
            .execute(db)
            .await?;
    Ok(rows.rows_affected() > 0)
}
