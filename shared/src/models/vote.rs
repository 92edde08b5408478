//! Vote Model

use super::jar::{Jar, JarStats};
use super::suggestion::SuggestionWithVotes;
use serde::{Deserialize, Serialize};

/// Vote entity — points one member allocated to one suggestion.
/// Rows with zero points are never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Vote {
    pub id: String,
    pub member_id: String,
    pub suggestion_id: String,
    pub jar_id: String,
    pub points: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One entry of a vote batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteEntry {
    pub suggestion_id: String,
    pub points: i64,
}

/// Full desired allocation for one member — replaces all prior votes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteBatch {
    pub votes: Vec<VoteEntry>,
}

/// A member's allocation summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteSummary {
    pub total_points_allocated: i64,
    pub remaining_points: i64,
    pub votes: Vec<Vote>,
}

/// Anonymized per-vote view (points only, no member identity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VotePoints {
    pub points: i64,
    pub created_at: i64,
}

/// Vote statistics for one suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionVotes {
    pub suggestion_id: String,
    pub total_points: i64,
    pub vote_count: i64,
    pub votes: Vec<VotePoints>,
}

/// The winning suggestion with its totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Winner {
    pub suggestion: SuggestionWithVotes,
    pub total_points: i64,
    pub vote_count: i64,
}

/// Final results payload: ranked suggestions, winner, stats
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JarResults {
    pub jar: Jar,
    pub winner: Option<Winner>,
    pub all_suggestions: Vec<SuggestionWithVotes>,
    pub stats: JarStats,
}
