//! Jar Model
//!
//! A jar is one group decision session: members join, suggest during the
//! suggestion window, then spread a point budget over suggestions during the
//! voting window.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Jar lifecycle phase
///
/// Forward path: setup → suggesting → voting → completed.
/// `cancelled` is reachable from any non-completed phase via delete and is
/// terminal for mutation. Stored as lowercase TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum JarStatus {
    Setup,
    Suggesting,
    Voting,
    Completed,
    Cancelled,
}

impl JarStatus {
    /// Lowercase string form (matches storage and wire format)
    pub fn as_str(&self) -> &'static str {
        match self {
            JarStatus::Setup => "setup",
            JarStatus::Suggesting => "suggesting",
            JarStatus::Voting => "voting",
            JarStatus::Completed => "completed",
            JarStatus::Cancelled => "cancelled",
        }
    }

    /// Phases in which members may submit or edit suggestions
    pub fn accepts_suggestions(&self) -> bool {
        matches!(self, JarStatus::Setup | JarStatus::Suggesting)
    }

    /// Phases in which results may be read
    pub fn results_visible(&self) -> bool {
        matches!(self, JarStatus::Voting | JarStatus::Completed)
    }
}

impl fmt::Display for JarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Jar entity
///
/// `points_per_voter <= 0` means "not yet derived"; the effective budget is
/// computed lazily (see the lifecycle and voting modules). All timestamps are
/// Unix millis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Jar {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub points_per_voter: i64,
    pub max_suggestions_per_member: i64,
    pub suggestion_deadline: Option<i64>,
    pub voting_deadline: Option<i64>,
    pub hangout_time: Option<i64>,
    pub status: JarStatus,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub creator_contact: Option<String>,
}

/// Create jar payload
///
/// `points_per_voter` is internal: when absent it stays unset and is derived
/// when voting starts. `creator_contact`, when present, auto-joins the
/// creator as the first member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JarCreate {
    pub title: String,
    pub description: Option<String>,
    pub points_per_voter: Option<i64>,
    pub max_suggestions_per_member: Option<i64>,
    pub suggestion_deadline: Option<i64>,
    pub voting_deadline: Option<i64>,
    pub hangout_time: Option<i64>,
    pub creator_contact: Option<String>,
}

/// Update jar payload — present fields are applied individually
///
/// Status is deliberately absent: phase changes go through the transition
/// operations, never through a raw field write.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JarUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub suggestion_deadline: Option<i64>,
    pub voting_deadline: Option<i64>,
    pub hangout_time: Option<i64>,
}

/// Jar with participation counts (for detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JarDetail {
    #[serde(flatten)]
    pub jar: Jar,
    pub member_count: i64,
    pub suggestion_count: i64,
    pub members_who_suggested: i64,
    pub members_who_voted: i64,
}

/// Jar statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JarStats {
    pub jar_id: String,
    pub total_members: i64,
    pub total_suggestions: i64,
    pub members_suggested: i64,
    pub members_voted: i64,
    pub total_votes_cast: i64,
    pub status: JarStatus,
}
