//! Member Repository

use super::{RepoError, RepoResult};
use shared::models::Member;
use sqlx::SqlitePool;

const MEMBER_SELECT: &str = "SELECT id, jar_id, contact_number, display_name, has_suggested, has_voted, is_active, joined_at, last_active_at FROM member";

pub async fn insert(pool: &SqlitePool, member: &Member) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO member (id, jar_id, contact_number, display_name, has_suggested, has_voted, is_active, joined_at, last_active_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(&member.id)
    .bind(&member.jar_id)
    .bind(&member.contact_number)
    .bind(&member.display_name)
    .bind(member.has_suggested)
    .bind(member.has_voted)
    .bind(member.is_active)
    .bind(member.joined_at)
    .bind(member.last_active_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: &str) -> RepoResult<Option<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Active member of a specific jar — membership check for acting members.
pub async fn find_in_jar(
    pool: &SqlitePool,
    jar_id: &str,
    member_id: &str,
) -> RepoResult<Option<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE id = ? AND jar_id = ? AND is_active = 1");
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(member_id)
        .bind(jar_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_contact(
    pool: &SqlitePool,
    jar_id: &str,
    contact: &str,
) -> RepoResult<Option<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE jar_id = ? AND contact_number = ? AND is_active = 1");
    let row = sqlx::query_as::<_, Member>(&sql)
        .bind(jar_id)
        .bind(contact)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_all_active(pool: &SqlitePool, jar_id: &str) -> RepoResult<Vec<Member>> {
    let sql = format!("{MEMBER_SELECT} WHERE jar_id = ? AND is_active = 1 ORDER BY joined_at ASC");
    let rows = sqlx::query_as::<_, Member>(&sql)
        .bind(jar_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn count_active(pool: &SqlitePool, jar_id: &str) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM member WHERE jar_id = ? AND is_active = 1",
    )
    .bind(jar_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn touch_last_active(pool: &SqlitePool, id: &str, now: i64) -> RepoResult<()> {
    sqlx::query("UPDATE member SET last_active_at = ? WHERE id = ?")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn set_display_name(
    pool: &SqlitePool,
    id: &str,
    display_name: &str,
    now: i64,
) -> RepoResult<Member> {
    let rows = sqlx::query("UPDATE member SET display_name = ?, last_active_at = ? WHERE id = ?")
        .bind(display_name)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Member {id}")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Member {id}")))
}

/// Flip the has_suggested flag; runs on the caller's executor so it can join
/// a suggestion write transaction.
pub async fn set_has_suggested<'e, E>(db: E, id: &str, value: bool, now: i64) -> RepoResult<()>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query("UPDATE member SET has_suggested = ?, last_active_at = ? WHERE id = ?")
        .bind(value)
        .bind(now)
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

/// Flip the has_voted flag; runs on the caller's executor so it can join the
/// vote replace transaction.
pub async fn set_has_voted<'e, E>(db: E, id: &str, value: bool, now: i64) -> RepoResult<()>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    sqlx::query("UPDATE member SET has_voted = ?, last_active_at = ? WHERE id = ?")
        .bind(value)
        .bind(now)
        .bind(id)
        .execute(db)
        .await?;
    Ok(())
}

/// Soft delete (leave jar). History referencing the member stays intact.
pub async fn deactivate(pool: &SqlitePool, id: &str, now: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE member SET is_active = 0, last_active_at = ? WHERE id = ? AND is_active = 1",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
