//! Member Model

use serde::{Deserialize, Serialize};

/// Member entity — a participant in one jar, identified by contact number
/// within that jar. Soft-deleted members keep their rows so votes and
/// suggestions referencing them stay resolvable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Member {
    pub id: String,
    pub jar_id: String,
    pub contact_number: String,
    pub display_name: Option<String>,
    pub has_suggested: bool,
    pub has_voted: bool,
    pub is_active: bool,
    pub joined_at: i64,
    pub last_active_at: i64,
}

/// Join payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberJoin {
    pub contact_number: String,
    pub display_name: Option<String>,
}

/// Anonymized member view for the in-jar member list:
/// participation flags without personal details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberStatus {
    pub display_name: Option<String>,
    pub has_suggested: bool,
    pub has_voted: bool,
    pub joined_at: i64,
}
