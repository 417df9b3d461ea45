//! Wire types for the NeoWs feed response.
//!
//! Only the members that the record mapping reads are modelled. Serde
//! ignores everything else.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

use crate::error::{FeedError, Result};

/// Top-level feed document: date string -> objects approaching on that date.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyFeed {
    #[serde(default)]
    pub element_count: Option<u64>,
    #[serde(default)]
    pub links: Option<Links>,
    pub near_earth_objects: HashMap<String, Vec<RawFeedObject>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Links {
    pub next: Option<String>,
    pub previous: Option<String>,
    #[serde(rename = "self")]
    pub current: Option<String>,
}

/// One asteroid as the feed reports it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawFeedObject {
    pub id: String,
    pub name: String,
    pub nasa_jpl_url: String,
    pub absolute_magnitude_h: f64,
    pub estimated_diameter: EstimatedDiameter,
    pub is_potentially_hazardous_asteroid: bool,
    pub close_approach_data: Vec<CloseApproach>,
}

/// Diameter bounds per unit. Only meters are used.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EstimatedDiameter {
    pub meters: DiameterRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CloseApproach {
    #[serde(default)]
    pub close_approach_date: Option<String>,
    pub close_approach_date_full: String,
    pub miss_distance: MissDistance,
    pub relative_velocity: RelativeVelocity,
    #[serde(default)]
    pub orbiting_body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MissDistance {
    pub kilometers: Numeric,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RelativeVelocity {
    pub kilometers_per_hour: Numeric,
}

/// A number the feed may send either as a JSON number or as a decimal
/// string. The feed sends distances and velocities as strings.
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    /// Resolves to `f64`, naming `field` if the text is not a number.
    pub fn value(&self, field: &'static str) -> Result<f64> {
        match self {
            Numeric::Number(n) => Ok(*n),
            Numeric::Text(s) => s.trim().parse().map_err(|_| FeedError::InvalidNumber {
                field,
                value: s.clone(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Text(String),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Numeric::Number(n),
            Repr::Text(s) => Numeric::Text(s),
        })
    }
}

impl From<f64> for Numeric {
    fn from(n: f64) -> Self {
        Numeric::Number(n)
    }
}

impl From<&str> for Numeric {
    fn from(s: &str) -> Self {
        Numeric::Text(s.to_string())
    }
}
