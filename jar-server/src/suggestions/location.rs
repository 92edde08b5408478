//! Structured location validation
//!
//! Structured fields are all-or-nothing: latitude and longitude must appear
//! together, and any other structured field requires both coordinates. The
//! same rule applies on create and on partial update, and the whole feature
//! sits behind a config flag.

use crate::utils::{AppError, AppResult, ErrorCode};
use shared::models::{SuggestionCreate, SuggestionUpdate};

const LAT_RANGE: (f64, f64) = (-90.0, 90.0);
const LON_RANGE: (f64, f64) = (-180.0, 180.0);

struct StructuredInput {
    latitude: Option<f64>,
    longitude: Option<f64>,
    /// any structured field other than the coordinates is present
    has_extra: bool,
}

impl StructuredInput {
    fn has_any(&self) -> bool {
        self.latitude.is_some() || self.longitude.is_some() || self.has_extra
    }
}

fn check(input: StructuredInput, enabled: bool) -> AppResult<()> {
    if !input.has_any() {
        return Ok(());
    }
    if !enabled {
        return Err(AppError::new(ErrorCode::StructuredLocationDisabled));
    }

    if input.latitude.is_some() != input.longitude.is_some() {
        return Err(AppError::new(ErrorCode::IncompleteCoordinates));
    }
    if input.has_extra && (input.latitude.is_none() || input.longitude.is_none()) {
        return Err(AppError::with_message(
            ErrorCode::IncompleteCoordinates,
            "Structured location submissions require latitude and longitude",
        ));
    }

    if let Some(lat) = input.latitude
        && !(LAT_RANGE.0..=LAT_RANGE.1).contains(&lat)
    {
        return Err(AppError::validation(format!("latitude {lat} out of range")));
    }
    if let Some(lon) = input.longitude
        && !(LON_RANGE.0..=LON_RANGE.1).contains(&lon)
    {
        return Err(AppError::validation(format!("longitude {lon} out of range")));
    }

    Ok(())
}

/// Validate structured-location fields of a create payload.
pub fn validate_create(data: &SuggestionCreate, enabled: bool) -> AppResult<()> {
    check(
        StructuredInput {
            latitude: data.latitude,
            longitude: data.longitude,
            has_extra: data.map_bounds.is_some()
                || data.geo_source.is_some()
                || data.location_confidence.is_some()
                || data.location_verified_at.is_some(),
        },
        enabled,
    )
}

/// Validate structured-location fields of a partial update payload.
/// "Provided" means present in the payload, exactly like the create path.
pub fn validate_update(data: &SuggestionUpdate, enabled: bool) -> AppResult<()> {
    check(
        StructuredInput {
            latitude: data.latitude,
            longitude: data.longitude,
            has_extra: data.map_bounds.is_some()
                || data.geo_source.is_some()
                || data.location_confidence.is_some()
                || data.location_verified_at.is_some(),
        },
        enabled,
    )
}
