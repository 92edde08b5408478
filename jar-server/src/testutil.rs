//! Test fixtures: scratch database + seed helpers.

use crate::db::DbService;
use crate::db::repository::{jar as jar_repo, member as member_repo, suggestion as suggestion_repo};
use shared::models::{Jar, JarStatus, Member, Suggestion};
use shared::util::{new_id, now_millis, short_id};
use sqlx::SqlitePool;
use tempfile::TempDir;

/// Fresh migrated SQLite database in a temp dir.
///
/// The TempDir must be kept alive for the duration of the test.
pub async fn test_pool() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("test.db");
    let db = DbService::new(path.to_str().unwrap())
        .await
        .expect("open test database");
    (dir, db.pool)
}

pub async fn seed_jar(pool: &SqlitePool, status: JarStatus) -> Jar {
    seed_jar_with(pool, status, 1, None, None).await
}

pub async fn seed_jar_with(
    pool: &SqlitePool,
    status: JarStatus,
    max_suggestions: i64,
    suggestion_deadline: Option<i64>,
    voting_deadline: Option<i64>,
) -> Jar {
    let now = now_millis();
    let jar = Jar {
        id: short_id(),
        title: "Friday hangout".to_string(),
        description: None,
        points_per_voter: 0,
        max_suggestions_per_member: max_suggestions,
        suggestion_deadline,
        voting_deadline,
        hangout_time: None,
        status,
        is_active: true,
        created_at: now,
        updated_at: now,
        creator_contact: None,
    };
    jar_repo::insert(pool, &jar).await.expect("seed jar");
    jar
}

pub async fn seed_member(pool: &SqlitePool, jar_id: &str, contact: &str) -> Member {
    let now = now_millis();
    let member = Member {
        id: new_id(),
        jar_id: jar_id.to_string(),
        contact_number: contact.to_string(),
        display_name: None,
        has_suggested: false,
        has_voted: false,
        is_active: true,
        joined_at: now,
        last_active_at: now,
    };
    member_repo::insert(pool, &member).await.expect("seed member");
    member
}

pub async fn seed_suggestion(
    pool: &SqlitePool,
    jar_id: &str,
    member_id: &str,
    title: &str,
) -> Suggestion {
    let now = now_millis();
    let suggestion = Suggestion {
        id: new_id(),
        jar_id: jar_id.to_string(),
        member_id: member_id.to_string(),
        title: title.to_string(),
        description: None,
        location: None,
        cost_tier: None,
        latitude: None,
        longitude: None,
        map_bounds: None,
        geo_source: None,
        location_confidence: None,
        location_verified_at: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    };
    suggestion_repo::insert(pool, &suggestion)
        .await
        .expect("seed suggestion");
    suggestion
}
