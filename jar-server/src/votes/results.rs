//! Result aggregation and winner ranking
//!
//! Totals per active suggestion, stable descending ranking, first-seen
//! winner. Member identity appears only once the jar is completed.

use crate::db::repository::{member as member_repo, suggestion as suggestion_repo, vote as vote_repo};
use crate::jars::{stats, sweep};
use crate::services::notify::Notifier;
use crate::utils::{AppError, AppResult};
use shared::models::{JarResults, JarStatus, Suggestion, SuggestionWithVotes, Winner};
use sqlx::SqlitePool;
use std::collections::HashMap;

async fn with_votes(
    pool: &SqlitePool,
    suggestion: Suggestion,
    totals: &HashMap<String, (i64, i64)>,
    reveal_identity: bool,
) -> AppResult<SuggestionWithVotes> {
    let (total_points, vote_count) = totals.get(&suggestion.id).copied().unwrap_or((0, 0));

    let (member_id, member_contact) = if reveal_identity {
        let contact = member_repo::find_by_id(pool, &suggestion.member_id)
            .await?
            .map(|m| m.contact_number);
        (Some(suggestion.member_id.clone()), contact)
    } else {
        (None, None)
    };

    Ok(SuggestionWithVotes {
        id: suggestion.id,
        jar_id: suggestion.jar_id,
        title: suggestion.title,
        description: suggestion.description,
        location: suggestion.location,
        cost_tier: suggestion.cost_tier,
        is_active: suggestion.is_active,
        created_at: suggestion.created_at,
        total_points,
        vote_count,
        member_id,
        member_contact,
    })
}

/// Ranked results for a jar.
///
/// Passes through the lazy deadline sweep first, so a results read never
/// reports a stale phase. Available while voting and after completion.
pub async fn get_results(
    pool: &SqlitePool,
    notifier: &dyn Notifier,
    jar_id: &str,
) -> AppResult<JarResults> {
    let jar = sweep::sweep_and_load(pool, notifier, jar_id).await?;
    if !jar.status.results_visible() {
        return Err(AppError::invalid_phase(jar.status.as_str(), "voting|completed"));
    }

    let reveal_identity = jar.status == JarStatus::Completed;

    let totals: HashMap<String, (i64, i64)> = vote_repo::totals_by_suggestion(pool, jar_id)
        .await?
        .into_iter()
        .map(|(id, points, count)| (id, (points, count)))
        .collect();

    // creation order in, stable sort out: ties keep first-seen order
    let mut ranked = Vec::new();
    for suggestion in suggestion_repo::find_all_active(pool, jar_id).await? {
        ranked.push(with_votes(pool, suggestion, &totals, reveal_identity).await?);
    }
    ranked.sort_by(|a, b| b.total_points.cmp(&a.total_points));

    let winner = ranked.first().map(|top| Winner {
        suggestion: top.clone(),
        total_points: top.total_points,
        vote_count: top.vote_count,
    });

    let stats = stats::get_stats(pool, jar_id).await?;

    Ok(JarResults {
        jar,
        winner,
        all_suggestions: ranked,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notify::LogNotifier;
    use crate::testutil::{seed_jar_with, seed_member, seed_suggestion, test_pool};
    use crate::votes::engine::submit_votes;
    use shared::models::{VoteBatch, VoteEntry};

    fn batch(entries: &[(&str, i64)]) -> VoteBatch {
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
    async fn test_ranking_and_winner() {
        let (_dir, pool) = test_pool().await;
        let notifier = LogNotifier;
        let jar = seed_jar_with(&pool, JarStatus::Voting, 5, None, None).await;
        crate::db::repository::jar::set_points_per_voter(&pool, &jar.id, 5, 0).await.unwrap();
        let m1 = seed_member(&pool, &jar.id, "+15550000001").await;
        let m2 = seed_member(&pool, &jar.id, "+15550000002").await;
        let a = seed_suggestion(&pool, &jar.id, &m1.id, "A").await;
        let b = seed_suggestion(&pool, &jar.id, &m2.id, "B").await;

        submit_votes(&pool, &jar.id, &m1.id, batch(&[(&a.id, 1), (&b.id, 3)])).await.unwrap();
        submit_votes(&pool, &jar.id, &m2.id, batch(&[(&b.id, 2)])).await.unwrap();

        let results = get_results(&pool, &notifier, &jar.id).await.unwrap();
        assert_eq!(results.all_suggestions.len(), 2);
        assert_eq!(results.all_suggestions[0].id, b.id);
        assert_eq!(results.all_suggestions[0].total_points, 5);
        assert_eq!(results.all_suggestions[0].vote_count, 2);
        assert_eq!(results.all_suggestions[1].total_points, 1);

        let winner = results.winner.unwrap();
        assert_eq!(winner.suggestion.id, b.id);
        assert_eq!(winner.total_points, 5);
        assert_eq!(results.stats.total_votes_cast, 3);
    }

    #[tokio::test]
    async fn test_tie_breaks_to_first_seen() {
        let (_dir, pool) = test_pool().await;
        let notifier = LogNotifier;
        let jar = seed_jar_with(&pool, JarStatus::Voting, 5, None, None).await;
        crate::db::repository::jar::set_points_per_voter(&pool, &jar.id, 5, 0).await.unwrap();
        let m = seed_member(&pool, &jar.id, "+15550000001").await;
        let first = seed_suggestion(&pool, &jar.id, &m.id, "First").await;
        let second = seed_suggestion(&pool, &jar.id, &m.id, "Second").await;

        submit_votes(&pool, &jar.id, &m.id, batch(&[(&first.id, 2), (&second.id, 2)]))
            .await
            .unwrap();

        let results = get_results(&pool, &notifier, &jar.id).await.unwrap();
        // equal points: creation order is preserved, winner is first-seen
        assert_eq!(results.all_suggestions[0].id, first.id);
        assert_eq!(results.winner.unwrap().suggestion.id, first.id);
    }

    #[tokio::test]
    async fn test_identity_withheld_while_voting_revealed_when_completed() {
        let (_dir, pool) = test_pool().await;
        let notifier = LogNotifier;
        let jar = seed_jar_with(&pool, JarStatus::Voting, 5, None, None).await;
        crate::db::repository::jar::set_points_per_voter(&pool, &jar.id, 5, 0).await.unwrap();
        let m = seed_member(&pool, &jar.id, "+15550000001").await;
        let s = seed_suggestion(&pool, &jar.id, &m.id, "A").await;
        submit_votes(&pool, &jar.id, &m.id, batch(&[(&s.id, 1)])).await.unwrap();

        let during = get_results(&pool, &notifier, &jar.id).await.unwrap();
        assert!(during.all_suggestions[0].member_id.is_none());
        assert!(during.all_suggestions[0].member_contact.is_none());

        crate::jars::lifecycle::complete(&pool, &notifier, &jar.id).await.unwrap();

        let after = get_results(&pool, &notifier, &jar.id).await.unwrap();
        assert_eq!(after.all_suggestions[0].member_id.as_deref(), Some(m.id.as_str()));
        assert_eq!(
            after.all_suggestions[0].member_contact.as_deref(),
            Some("+15550000001")
        );
    }

    #[tokio::test]
    async fn test_results_blocked_before_voting() {
        let (_dir, pool) = test_pool().await;
        let notifier = LogNotifier;
        let jar = seed_jar_with(&pool, JarStatus::Suggesting, 5, None, None).await;

        let err = get_results(&pool, &notifier, &jar.id).await.unwrap_err();
        assert_eq!(err.code, crate::utils::ErrorCode::InvalidPhase);
    }

    #[tokio::test]
    async fn test_results_read_triggers_lazy_sweep() {
        use crate::utils::time::MINUTE_MS;
        use shared::util::now_millis;

        let (_dir, pool) = test_pool().await;
        let notifier = LogNotifier;
        let now = now_millis();
        // suggesting jar whose deadline passed: a results read must see it
        // advanced to voting rather than rejecting with invalid phase
        let jar = seed_jar_with(&pool, JarStatus::Suggesting, 5, Some(now - MINUTE_MS), None).await;
        let m = seed_member(&pool, &jar.id, "+15550000001").await;
        seed_suggestion(&pool, &jar.id, &m.id, "A").await;
        seed_suggestion(&pool, &jar.id, &m.id, "B").await;

        let results = get_results(&pool, &notifier, &jar.id).await.unwrap();
        assert_eq!(results.jar.status, JarStatus::Voting);
        assert_eq!(results.jar.points_per_voter, 1);
    }

    #[tokio::test]
    async fn test_suggestions_without_votes_rank_zero() {
        let (_dir, pool) = test_pool().await;
        let notifier = LogNotifier;
        let jar = seed_jar_with(&pool, JarStatus::Voting, 5, None, None).await;
        let m = seed_member(&pool, &jar.id, "+15550000001").await;
        seed_suggestion(&pool, &jar.id, &m.id, "Lonely").await;

        let results = get_results(&pool, &notifier, &jar.id).await.unwrap();
        assert_eq!(results.all_suggestions[0].total_points, 0);
        assert_eq!(results.all_suggestions[0].vote_count, 0);
        assert!(results.winner.is_some()); // still a winner by default
    }
}
