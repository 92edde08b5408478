//! Suggestion Model

use serde::{Deserialize, Serialize};

/// Suggestion entity — one proposed option submitted by a member.
/// Anonymous until the jar completes.
///
/// Structured-location fields are all-or-nothing: when any of them is set,
/// latitude and longitude must both be present (enforced at the registry).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Suggestion {
    pub id: String,
    pub jar_id: String,
    pub member_id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Rough price tier, e.g. "$", "$$", "Free"
    pub cost_tier: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Serialized map viewport, as handed over by the geocoder
    pub map_bounds: Option<String>,
    pub geo_source: Option<String>,
    pub location_confidence: Option<f64>,
    pub location_verified_at: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create suggestion payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionCreate {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub cost_tier: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub map_bounds: Option<String>,
    pub geo_source: Option<String>,
    pub location_confidence: Option<f64>,
    pub location_verified_at: Option<i64>,
}

/// Update suggestion payload — present fields are applied individually
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuggestionUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub cost_tier: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub map_bounds: Option<String>,
    pub geo_source: Option<String>,
    pub location_confidence: Option<f64>,
    pub location_verified_at: Option<i64>,
}

/// Suggestion with vote totals (results view)
///
/// `member_id`/`member_contact` stay `None` until the jar is completed —
/// identity is withheld while voting is still open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionWithVotes {
    pub id: String,
    pub jar_id: String,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub cost_tier: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub total_points: i64,
    pub vote_count: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_contact: Option<String>,
}
