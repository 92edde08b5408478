//! End-to-end walk through a jar's life: create, suggest, vote, complete.

use jar_server::core::Config;
use jar_server::db::DbService;
use jar_server::db::repository::member as member_repo;
use jar_server::jars::{lifecycle, manager};
use jar_server::services::notify::LogNotifier;
use jar_server::suggestions::registry;
use jar_server::votes::{engine, results};
use shared::models::{
    JarCreate, JarStatus, Member, SuggestionCreate, VoteBatch, VoteEntry,
};
use shared::util::{new_id, now_millis};
use sqlx::SqlitePool;

async fn open_db() -> (tempfile::TempDir, SqlitePool) {
    let dir = tempfile::tempdir().unwrap();
    let db = DbService::new(dir.path().join("flow.db").to_str().unwrap())
        .await
        .unwrap();
    (dir, db.pool)
}

fn config(dir: &tempfile::TempDir) -> Config {
    let mut config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    config.default_max_suggestions = 2;
    config
}

async fn join(pool: &SqlitePool, jar_id: &str, contact: &str, name: &str) -> Member {
    let now = now_millis();
    let member = Member {
        id: new_id(),
        jar_id: jar_id.to_string(),
        contact_number: contact.to_string(),
        display_name: Some(name.to_string()),
        has_suggested: false,
        has_voted: false,
        is_active: true,
        joined_at: now,
        last_active_at: now,
    };
    member_repo::insert(pool, &member).await.unwrap();
    member
}

fn suggest(title: &str) -> SuggestionCreate {
    SuggestionCreate {
        title: title.to_string(),
        ..Default::default()
    }
}

fn allocation(entries: &[(&str, i64)]) -> VoteBatch {
    VoteBatch {
        votes: entries
            .iter()
            .map(|(id, points)| VoteEntry {
                suggestion_id: id.to_string(),
                points: *points,
            })
            .collect(),
    }
}

#[tokio::test]
async fn full_jar_lifecycle() {
    let (dir, pool) = open_db().await;
    let config = config(&dir);
    let notifier = LogNotifier;

    // --- setup ---
    let jar = manager::create_jar(
        &pool,
        &config,
        JarCreate {
            title: "Quarterly team day".to_string(),
            description: Some("Pick one activity".to_string()),
            points_per_voter: None,
            max_suggestions_per_member: Some(2),
            suggestion_deadline: None,
            voting_deadline: None,
            hangout_time: None,
            creator_contact: Some("+15550000001".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(jar.status, JarStatus::Setup);

    let host = member_repo::find_by_contact(&pool, &jar.id, "+15550000001")
        .await
        .unwrap()
        .expect("creator auto-joined");
    let alice = join(&pool, &jar.id, "+15550000002", "Alice").await;
    let bob = join(&pool, &jar.id, "+15550000003", "Bob").await;

    // --- suggesting ---
    let jar = lifecycle::start_suggesting(&pool, &notifier, &jar.id).await.unwrap();
    assert_eq!(jar.status, JarStatus::Suggesting);

    let bowling = registry::create_suggestion(&pool, &config, &jar.id, &host.id, suggest("Bowling"))
        .await
        .unwrap();
    let karaoke = registry::create_suggestion(&pool, &config, &jar.id, &alice.id, suggest("Karaoke"))
        .await
        .unwrap();
    let museum = registry::create_suggestion(&pool, &config, &jar.id, &bob.id, suggest("Museum"))
        .await
        .unwrap();

    // voting is not open yet
    let err = engine::submit_votes(&pool, &jar.id, &alice.id, allocation(&[(&bowling.id, 1)]))
        .await
        .unwrap_err();
    assert_eq!(err.code, jar_server::ErrorCode::InvalidPhase);

    // --- voting ---
    let jar = lifecycle::start_voting(&pool, &notifier, &jar.id).await.unwrap();
    assert_eq!(jar.status, JarStatus::Voting);
    assert_eq!(jar.points_per_voter, 2); // max(3 suggestions - 1, 1)

    engine::submit_votes(&pool, &jar.id, &host.id, allocation(&[(&karaoke.id, 2)]))
        .await
        .unwrap();
    engine::submit_votes(
        &pool,
        &jar.id,
        &alice.id,
        allocation(&[(&karaoke.id, 1), (&museum.id, 1)]),
    )
    .await
    .unwrap();
    engine::submit_votes(&pool, &jar.id, &bob.id, allocation(&[(&bowling.id, 2)]))
        .await
        .unwrap();

    // mid-vote results are anonymous
    let during = results::get_results(&pool, &notifier, &jar.id).await.unwrap();
    assert_eq!(during.all_suggestions[0].id, karaoke.id); // 3 points
    assert!(during.all_suggestions.iter().all(|s| s.member_id.is_none()));

    // bob reconsiders: replace-all wipes the bowling vote
    engine::submit_votes(&pool, &jar.id, &bob.id, allocation(&[(&museum.id, 2)]))
        .await
        .unwrap();

    // --- completed ---
    let jar = lifecycle::complete(&pool, &notifier, &jar.id).await.unwrap();
    assert_eq!(jar.status, JarStatus::Completed);

    let after = results::get_results(&pool, &notifier, &jar.id).await.unwrap();
    // karaoke and museum tie at 3; karaoke wins on first-seen order
    let winner = after.winner.clone().unwrap();
    assert_eq!(winner.suggestion.id, karaoke.id);
    assert_eq!(winner.total_points, 3);
    assert_eq!(after.all_suggestions[1].id, museum.id);
    assert_eq!(after.all_suggestions[1].total_points, 3);
    assert_eq!(after.all_suggestions[2].id, bowling.id);
    assert_eq!(after.all_suggestions[2].total_points, 0);

    // identity is revealed now
    assert_eq!(
        winner.suggestion.member_contact.as_deref(),
        Some("+15550000002")
    );

    assert_eq!(after.stats.total_members, 3);
    assert_eq!(after.stats.members_voted, 3);
}

#[tokio::test]
async fn deadline_driven_flow() {
    let (dir, pool) = open_db().await;
    let config = config(&dir);
    let notifier = LogNotifier;

    let minute = 60_000i64;
    let now = now_millis();
    let jar = manager::create_jar(
        &pool,
        &config,
        JarCreate {
            title: "Lunch spot".to_string(),
            description: None,
            points_per_voter: None,
            max_suggestions_per_member: Some(2),
            suggestion_deadline: Some(now - minute),
            voting_deadline: None,
            hangout_time: None,
            creator_contact: None,
        },
    )
    .await
    .unwrap();

    let ana = join(&pool, &jar.id, "+15550000011", "Ana").await;
    lifecycle::start_suggesting(&pool, &notifier, &jar.id).await.unwrap();

    // deadline already behind us, but with zero suggestions the jar must wait
    let detail = manager::get_jar_detail(&pool, &notifier, &jar.id).await.unwrap();
    assert_eq!(detail.jar.status, JarStatus::Suggesting);

    registry::create_suggestion(&pool, &config, &jar.id, &ana.id, suggest("Tacos"))
        .await
        .unwrap();
    registry::create_suggestion(&pool, &config, &jar.id, &ana.id, suggest("Ramen"))
        .await
        .unwrap();

    // now a plain read advances the phase and derives the budget
    let detail = manager::get_jar_detail(&pool, &notifier, &jar.id).await.unwrap();
    assert_eq!(detail.jar.status, JarStatus::Voting);
    assert_eq!(detail.jar.points_per_voter, 1); // max(2 - 1, 1)
}
