//! Projection of raw feed objects into flat, rounded output records.

use serde::Serialize;

use crate::error::{FeedError, Result};
use crate::types::{DiameterRange, RawFeedObject};

/// Decimal places kept on every derived numeric field.
pub const PRECISION: i32 = 5;

/// The nine-field summary of one asteroid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "PotentiallyHazardous")]
    pub potentially_hazardous: bool,
    #[serde(rename = "CloseApproachDateTime")]
    pub close_approach_date_time: String,
    #[serde(rename = "MissDistanceInKM")]
    pub miss_distance_km: f64,
    #[serde(rename = "AbsoluteMagnitudeH")]
    pub absolute_magnitude_h: f64,
    #[serde(rename = "DiameterInMeters")]
    pub diameter_m: f64,
    #[serde(rename = "VelocityInKMpH")]
    pub velocity_kmph: f64,
    #[serde(rename = "URL")]
    pub url: String,
}

/// Maps one feed object using its first close approach.
///
/// # Errors
///
/// Returns [`FeedError::MissingCloseApproach`] if the object has no
/// close-approach entries, and [`FeedError::InvalidNumber`] if a distance or
/// velocity string does not parse.
pub fn map_one(raw: &RawFeedObject) -> Result<OutputRecord> {
    let approach = raw
        .close_approach_data
        .first()
        .ok_or_else(|| FeedError::MissingCloseApproach { id: raw.id.clone() })?;

    let miss_distance = approach.miss_distance.kilometers.value("miss_distance.kilometers")?;
    let velocity = approach
        .relative_velocity
        .kilometers_per_hour
        .value("relative_velocity.kilometers_per_hour")?;

    Ok(OutputRecord {
        name: raw.name.clone(),
        id: raw.id.clone(),
        potentially_hazardous: raw.is_potentially_hazardous_asteroid,
        close_approach_date_time: approach.close_approach_date_full.clone(),
        miss_distance_km: round_to(miss_distance, PRECISION),
        absolute_magnitude_h: raw.absolute_magnitude_h,
        diameter_m: average_diameter(&raw.estimated_diameter.meters),
        velocity_kmph: round_to(velocity, PRECISION),
        url: raw.nasa_jpl_url.clone(),
    })
}

/// Mean of the min and max estimate, rounded to [`PRECISION`] places.
pub fn average_diameter(range: &DiameterRange) -> f64 {
    let mean = (range.estimated_diameter_min + range.estimated_diameter_max) / 2.0;
    round_to(mean, PRECISION)
}

/// Rounds `value` to `places` decimal places, half away from zero.
///
/// The shift is done on the shortest decimal representation rather than by
/// multiplying, so `15.3888885` becomes `15.38889` and not `15.38888`.
pub fn round_to(value: f64, places: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let shifted: f64 = match format!("{value}e{places}").parse() {
        Ok(v) => v,
        Err(_) => value * 10f64.powi(places),
    };
    let rounded = shifted.round();

    match format!("{rounded}e{}", -places).parse() {
        Ok(v) => v,
        Err(_) => rounded / 10f64.powi(places),
    }
}
