//! Voting engine
//!
//! Replace-all vote submission: the batch is the member's full desired
//! allocation. Validation happens before any write; the delete + insert +
//! member-flag update commit in one transaction, so a failed submission
//! leaves the previous allocation untouched.

use crate::db::repository::{
    jar as jar_repo, member as member_repo, suggestion as suggestion_repo, vote as vote_repo,
};
use crate::jars::{lifecycle, sweep};
use crate::services::notify::Notifier;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{Jar, JarStatus, Member, SuggestionVotes, Vote, VoteBatch, VotePoints, VoteSummary};
use shared::util::{new_id, now_millis};
use sqlx::SqlitePool;
use std::collections::HashSet;

/// Effective points budget for a jar, deriving it lazily when unset.
///
/// This fallback derives from the active member count (n - 1, floored at 1)
/// and persists the result. It is a separate rule from the suggestion-count
/// derivation applied when voting starts; the two can disagree when member
/// and suggestion counts differ.
pub async fn ensure_points_initialized(pool: &SqlitePool, jar: &Jar) -> AppResult<i64> {
    if jar.points_per_voter > 0 {
        return Ok(jar.points_per_voter);
    }

    let member_count = member_repo::count_active(pool, &jar.id).await?;
    let points = (member_count - 1).max(1);
    jar_repo::set_points_per_voter(pool, &jar.id, points, now_millis()).await?;
    tracing::info!(
        jar_id = %jar.id,
        member_count,
        points_per_voter = points,
        "Derived points budget from member count"
    );
    Ok(points)
}

async fn require_member(pool: &SqlitePool, jar_id: &str, member_id: &str) -> AppResult<Member> {
    member_repo::find_in_jar(pool, jar_id, member_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::MemberNotFound, "Member not found in this jar")
        })
}

/// Validate a batch's shape: non-empty, non-negative points, no duplicate
/// suggestion ids. Returns the allocation total.
fn validate_batch_shape(batch: &VoteBatch) -> AppResult<i64> {
    if batch.votes.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyVoteBatch));
    }

    let mut seen = HashSet::new();
    let mut total = 0i64;
    for entry in &batch.votes {
        if entry.points < 0 {
            return Err(AppError::validation("points must not be negative"));
        }
        if !seen.insert(entry.suggestion_id.as_str()) {
            return Err(
                AppError::new(ErrorCode::DuplicateVoteTarget)
                    .with_detail("suggestion_id", entry.suggestion_id.clone()),
            );
        }
        total += entry.points;
    }
    Ok(total)
}

/// Submit a member's full allocation, replacing any prior votes.
///
/// Returns the stored allocation with total and remaining budget.
pub async fn submit_votes(
    pool: &SqlitePool,
    jar_id: &str,
    member_id: &str,
    batch: VoteBatch,
) -> AppResult<VoteSummary> {
    let jar = lifecycle::load(pool, jar_id).await?;
    if jar.status != JarStatus::Voting {
        return Err(AppError::invalid_phase(jar.status.as_str(), JarStatus::Voting.as_str()));
    }

    let budget = ensure_points_initialized(pool, &jar).await?;
    let member = require_member(pool, jar_id, member_id).await?;

    // fail fast: shape first (duplicate ids are a validation error, distinct
    // from exceeding the budget), then budget, then references
    let total = validate_batch_shape(&batch)?;
    if total > budget {
        return Err(AppError::point_budget(budget, total));
    }
    for entry in &batch.votes {
        if suggestion_repo::find_active_in_jar(pool, jar_id, &entry.suggestion_id)
            .await?
            .is_none()
        {
            return Err(
                AppError::new(ErrorCode::VoteTargetInvalid)
                    .with_detail("suggestion_id", entry.suggestion_id.clone()),
            );
        }
    }

    // replace-all: prior votes vanish and the new rows land atomically
    let now = now_millis();
    let mut new_votes = Vec::new();
    let mut tx = pool.begin().await.map_err(|e| AppError::database(e.to_string()))?;
    vote_repo::delete_by_member(&mut *tx, jar_id, member_id).await?;
    for entry in &batch.votes {
        // zero-point entries are omitted, not stored
        if entry.points > 0 {
            let vote = Vote {
                id: new_id(),
                member_id: member.id.clone(),
                suggestion_id: entry.suggestion_id.clone(),
                jar_id: jar_id.to_string(),
                points: entry.points,
                created_at: now,
                updated_at: now,
            };
            vote_repo::insert(&mut *tx, &vote).await?;
            new_votes.push(vote);
        }
    }
    member_repo::set_has_voted(&mut *tx, &member.id, true, now).await?;
    tx.commit().await.map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(
        jar_id = %jar_id,
        member_id = %member_id,
        total_points = total,
        vote_count = new_votes.len(),
        "Votes submitted"
    );

    Ok(VoteSummary {
        total_points_allocated: total,
        remaining_points: budget - total,
        votes: new_votes,
    })
}

/// A member's current allocation. While voting is open this runs the lazy
/// budget derivation so remaining_points is meaningful even before any
/// submission.
pub async fn get_member_votes(
    pool: &SqlitePool,
    jar_id: &str,
    member_id: &str,
) -> AppResult<VoteSummary> {
    let jar = lifecycle::load(pool, jar_id).await?;
    // the fallback derivation persists; only the voting phase may be written
    // to by this read (cancelled jars are terminal for mutation)
    let budget = if jar.status == JarStatus::Voting {
        ensure_points_initialized(pool, &jar).await?
    } else {
        jar.points_per_voter.max(0)
    };
    require_member(pool, jar_id, member_id).await?;

    let votes = vote_repo::find_by_member(pool, jar_id, member_id).await?;
    let total: i64 = votes.iter().map(|v| v.points).sum();

    Ok(VoteSummary {
        total_points_allocated: total,
        remaining_points: budget - total,
        votes,
    })
}

/// Delete all of a member's votes for a jar (voting phase only) and reset
/// has_voted. Returns the removed row count.
pub async fn clear_votes(pool: &SqlitePool, jar_id: &str, member_id: &str) -> AppResult<u64> {
    let jar = lifecycle::load(pool, jar_id).await?;
    if jar.status != JarStatus::Voting {
        return Err(AppError::invalid_phase(jar.status.as_str(), JarStatus::Voting.as_str()));
    }
    let member = require_member(pool, jar_id, member_id).await?;

    let now = now_millis();
    let mut tx = pool.begin().await.map_err(|e| AppError::database(e.to_string()))?;
    let deleted = vote_repo::delete_by_member(&mut *tx, jar_id, member_id).await?;
    member_repo::set_has_voted(&mut *tx, &member.id, false, now).await?;
    tx.commit().await.map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(jar_id = %jar_id, member_id = %member_id, deleted, "Votes cleared");
    Ok(deleted)
}

/// Vote statistics for one suggestion — points only, member identity is
/// never part of this view. Available while voting and after completion.
///
/// Results-family read: passes through the lazy deadline sweep first, like
/// [`crate::votes::results::get_results`].
pub async fn get_suggestion_votes(
    pool: &SqlitePool,
    notifier: &dyn Notifier,
    jar_id: &str,
    suggestion_id: &str,
) -> AppResult<SuggestionVotes> {
    let jar = sweep::sweep_and_load(pool, notifier, jar_id).await?;
    if !jar.status.results_visible() {
        return Err(AppError::invalid_phase(jar.status.as_str(), "voting|completed"));
    }

    if suggestion_repo::find_active_in_jar(pool, jar_id, suggestion_id)
        .await?
        .is_none()
    {
        return Err(AppError::with_message(
            ErrorCode::SuggestionNotFound,
            format!("Suggestion with id {suggestion_id} not found"),
        ));
    }

    let votes = vote_repo::find_by_suggestion(pool, suggestion_id).await?;
    let total_points: i64 = votes.iter().map(|v| v.points).sum();

    Ok(SuggestionVotes {
        suggestion_id: suggestion_id.to_string(),
        total_points,
        vote_count: votes.len() as i64,
        votes: votes
            .into_iter()
            .map(|v| VotePoints {
                points: v.points,
                created_at: v.created_at,
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notify::LogNotifier;
    use crate::testutil::{seed_jar, seed_jar_with, seed_member, seed_suggestion, test_pool};
    use shared::models::VoteEntry;

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

    async fn voting_jar(
        pool: &SqlitePool,
        points_per_voter: i64,
    ) -> (shared::models::Jar, shared::models::Member, Vec<shared::models::Suggestion>) {
        let mut jar = seed_jar_with(pool, JarStatus::Voting, 5, None, None).await;
        if points_per_voter > 0 {
            jar_repo::set_points_per_voter(pool, &jar.id, points_per_voter, now_millis())
                .await
                .unwrap();
            jar.points_per_voter = points_per_voter;
        }
        let member = seed_member(pool, &jar.id, "+15550000001").await;
        let mut suggestions = Vec::new();
        for title in ["A", "B", "C"] {
            suggestions.push(seed_suggestion(pool, &jar.id, &member.id, title).await);
        }
        (jar, member, suggestions)
    }

    #[tokio::test]
    async fn test_submit_and_resubmit_replaces_everything() {
        let (_dir, pool) = test_pool().await;
        let (jar, member, s) = voting_jar(&pool, 5).await;

        submit_votes(&pool, &jar.id, &member.id, batch(&[(&s[0].id, 3), (&s[1].id, 2)]))
            .await
            .unwrap();

        // resubmission with zeros for A and B leaves only the C vote
        let summary = submit_votes(
            &pool,
            &jar.id,
            &member.id,
            batch(&[(&s[0].id, 0), (&s[1].id, 0), (&s[2].id, 1)]),
        )
        .await
        .unwrap();

        assert_eq!(summary.total_points_allocated, 1);
        assert_eq!(summary.votes.len(), 1);
        assert_eq!(summary.votes[0].suggestion_id, s[2].id);

        let stored = vote_repo::find_by_member(&pool, &jar.id, &member.id).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].suggestion_id, s[2].id);
        assert_eq!(stored[0].points, 1);
    }

    #[tokio::test]
    async fn test_zero_point_entries_are_not_stored() {
        let (_dir, pool) = test_pool().await;
        let (jar, member, s) = voting_jar(&pool, 5).await;

        let summary = submit_votes(
            &pool,
            &jar.id,
            &member.id,
            batch(&[(&s[0].id, 2), (&s[1].id, 0)]),
        )
        .await
        .unwrap();

        assert_eq!(summary.votes.len(), 1);
        let stored = vote_repo::find_by_member(&pool, &jar.id, &member.id).await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn test_over_budget_rejected_and_prior_votes_intact() {
        let (_dir, pool) = test_pool().await;
        let (jar, member, s) = voting_jar(&pool, 3).await;

        submit_votes(&pool, &jar.id, &member.id, batch(&[(&s[0].id, 2), (&s[1].id, 1)]))
            .await
            .unwrap();

        let err = submit_votes(
            &pool,
            &jar.id,
            &member.id,
            batch(&[(&s[0].id, 3), (&s[1].id, 2)]),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::PointBudgetExceeded);
        let details = err.details.unwrap();
        assert_eq!(details.get("limit").unwrap(), 3);
        assert_eq!(details.get("attempted").unwrap(), 5);

        // prior allocation untouched
        let stored = vote_repo::find_by_member(&pool, &jar.id, &member.id).await.unwrap();
        let total: i64 = stored.iter().map(|v| v.points).sum();
        assert_eq!(total, 3);
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_suggestion_in_batch_is_validation_error() {
        let (_dir, pool) = test_pool().await;
        let (jar, member, s) = voting_jar(&pool, 5).await;

        // duplicates rejected regardless of point totals
        let err = submit_votes(
            &pool,
            &jar.id,
            &member.id,
            batch(&[(&s[0].id, 1), (&s[0].id, 1)]),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateVoteTarget);

        // even all-zero duplicates
        let err = submit_votes(
            &pool,
            &jar.id,
            &member.id,
            batch(&[(&s[0].id, 0), (&s[0].id, 0)]),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateVoteTarget);
    }

    #[tokio::test]
    async fn test_unknown_or_inactive_suggestion_rejected() {
        let (_dir, pool) = test_pool().await;
        let (jar, member, s) = voting_jar(&pool, 5).await;

        let err = submit_votes(
            &pool,
            &jar.id,
            &member.id,
            batch(&[(&s[0].id, 1), ("not-a-suggestion", 1)]),
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::VoteTargetInvalid);

        // soft-deleted suggestions are not valid targets
        suggestion_repo::soft_delete(&pool, &s[1].id, now_millis()).await.unwrap();
        let err = submit_votes(&pool, &jar.id, &member.id, batch(&[(&s[1].id, 1)]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::VoteTargetInvalid);
    }

    #[tokio::test]
    async fn test_voting_only_in_voting_phase() {
        let (_dir, pool) = test_pool().await;
        let jar = seed_jar(&pool, JarStatus::Suggesting).await;
        let member = seed_member(&pool, &jar.id, "+15550000001").await;
        let s = seed_suggestion(&pool, &jar.id, &member.id, "A").await;

        let err = submit_votes(&pool, &jar.id, &member.id, batch(&[(&s.id, 1)]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPhase);
        let details = err.details.unwrap();
        assert_eq!(details.get("required_state").unwrap(), "voting");
    }

    #[tokio::test]
    async fn test_empty_batch_rejected() {
        let (_dir, pool) = test_pool().await;
        let (jar, member, _s) = voting_jar(&pool, 5).await;

        let err = submit_votes(&pool, &jar.id, &member.id, batch(&[])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyVoteBatch);
    }

    #[tokio::test]
    async fn test_member_count_fallback_derivation() {
        // 3 suggestions but 4 members: the lazy fallback derives from the
        // member count (4 - 1 = 3), independent of the suggestion-count rule
        // which would give 2
        let (_dir, pool) = test_pool().await;
        let jar = seed_jar_with(&pool, JarStatus::Voting, 5, None, None).await;
        let m1 = seed_member(&pool, &jar.id, "+15550000001").await;
        seed_member(&pool, &jar.id, "+15550000002").await;
        seed_member(&pool, &jar.id, "+15550000003").await;
        seed_member(&pool, &jar.id, "+15550000004").await;
        let s = seed_suggestion(&pool, &jar.id, &m1.id, "A").await;
        seed_suggestion(&pool, &jar.id, &m1.id, "B").await;
        seed_suggestion(&pool, &jar.id, &m1.id, "C").await;

        let summary = submit_votes(&pool, &jar.id, &m1.id, batch(&[(&s.id, 1)])).await.unwrap();
        assert_eq!(summary.remaining_points, 2); // budget 3, spent 1

        let jar = lifecycle::load(&pool, &jar.id).await.unwrap();
        assert_eq!(jar.points_per_voter, 3);
        // diverges from the suggestion-count rule: max(3 - 1, 1) = 2
        assert_ne!(
            jar.points_per_voter,
            crate::jars::lifecycle::points_from_suggestions(3)
        );
    }

    #[tokio::test]
    async fn test_fallback_also_runs_on_view() {
        let (_dir, pool) = test_pool().await;
        let jar = seed_jar_with(&pool, JarStatus::Voting, 5, None, None).await;
        let member = seed_member(&pool, &jar.id, "+15550000001").await;
        seed_member(&pool, &jar.id, "+15550000002").await;

        // viewing votes derives and persists the budget
        let summary = get_member_votes(&pool, &jar.id, &member.id).await.unwrap();
        assert_eq!(summary.remaining_points, 1); // max(2 - 1, 1)

        let jar = lifecycle::load(&pool, &jar.id).await.unwrap();
        assert_eq!(jar.points_per_voter, 1);
    }

    #[tokio::test]
    async fn test_explicit_budget_not_overridden_by_fallback() {
        let (_dir, pool) = test_pool().await;
        let (jar, member, _s) = voting_jar(&pool, 10).await;

        // one member — the fallback would derive 1, but the set value wins
        let summary = get_member_votes(&pool, &jar.id, &member.id).await.unwrap();
        assert_eq!(summary.remaining_points, 10);

        let jar = lifecycle::load(&pool, &jar.id).await.unwrap();
        assert_eq!(jar.points_per_voter, 10);
    }

    #[tokio::test]
    async fn test_clear_votes_resets_has_voted() {
        let (_dir, pool) = test_pool().await;
        let (jar, member, s) = voting_jar(&pool, 5).await;

        submit_votes(&pool, &jar.id, &member.id, batch(&[(&s[0].id, 2)])).await.unwrap();
        let m = member_repo::find_by_id(&pool, &member.id).await.unwrap().unwrap();
        assert!(m.has_voted);

        let deleted = clear_votes(&pool, &jar.id, &member.id).await.unwrap();
        assert_eq!(deleted, 1);

        let m = member_repo::find_by_id(&pool, &member.id).await.unwrap().unwrap();
        assert!(!m.has_voted);
        assert!(vote_repo::find_by_member(&pool, &jar.id, &member.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_suggestion_votes_view_is_anonymous() {
        let (_dir, pool) = test_pool().await;
        let (jar, member, s) = voting_jar(&pool, 5).await;
        let other = seed_member(&pool, &jar.id, "+15550000002").await;

        submit_votes(&pool, &jar.id, &member.id, batch(&[(&s[0].id, 2)])).await.unwrap();
        submit_votes(&pool, &jar.id, &other.id, batch(&[(&s[0].id, 3)])).await.unwrap();

        let view = get_suggestion_votes(&pool, &LogNotifier, &jar.id, &s[0].id)
            .await
            .unwrap();
        assert_eq!(view.total_points, 5);
        assert_eq!(view.vote_count, 2);
        assert_eq!(view.votes.len(), 2);
    }

    #[tokio::test]
    async fn test_suggestion_votes_hidden_before_voting() {
        let (_dir, pool) = test_pool().await;
        let jar = seed_jar(&pool, JarStatus::Suggesting).await;
        let member = seed_member(&pool, &jar.id, "+15550000001").await;
        let s = seed_suggestion(&pool, &jar.id, &member.id, "A").await;

        let err = get_suggestion_votes(&pool, &LogNotifier, &jar.id, &s.id)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidPhase);
    }

    #[tokio::test]
    async fn test_view_never_writes_outside_voting_phase() {
        let (_dir, pool) = test_pool().await;
        let notifier = LogNotifier;
        let jar = seed_jar(&pool, JarStatus::Suggesting).await;
        let member = seed_member(&pool, &jar.id, "+15550000001").await;
        seed_member(&pool, &jar.id, "+15550000002").await;
        crate::jars::lifecycle::cancel(&pool, &notifier, &jar.id).await.unwrap();

        let cancelled = lifecycle::load(&pool, &jar.id).await.unwrap();

        // viewing votes on a cancelled jar must not derive/persist a budget
        let summary = get_member_votes(&pool, &jar.id, &member.id).await.unwrap();
        assert_eq!(summary.remaining_points, 0);

        let after = lifecycle::load(&pool, &jar.id).await.unwrap();
        assert_eq!(after.points_per_voter, 0);
        assert_eq!(after.updated_at, cancelled.updated_at);
    }
}
