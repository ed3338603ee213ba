//! Event types.
//!
//! `RawCalendarEntry` mirrors what the calendar service sends. The enricher
//! turns the usable ones into `EnrichedEvent`s, which always carry a
//! resolved `GeoCoordinate`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::QuermesseError;

/// A calendar entry as returned by the calendar service (`items[]`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCalendarEntry {
    pub id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub start: Option<EntryStart>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Start of a calendar entry. All-day entries carry `date`, timed entries `dateTime`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryStart {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub date_time: Option<String>,
}

impl RawCalendarEntry {
    /// Location text, if present and not blank
    pub fn location_text(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    /// Raw `start.date` value, if present and not blank
    pub fn start_date_text(&self) -> Option<&str> {
        self.start
            .as_ref()
            .and_then(|s| s.date.as_deref())
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// A point on the globe, in degrees.
///
/// Only constructible with latitude in [-90, 90] and longitude in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCoordinate {
    lat: f64,
    lon: f64,
}

impl GeoCoordinate {
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);

        valid.then_some(GeoCoordinate { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lon)
    }
}

/// Parse "lat,lon" as typed by a user
impl FromStr for GeoCoordinate {
    type Err = QuermesseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            QuermesseError::InvalidInput(format!(
                "Invalid coordinate '{}'. Expected LAT,LON (e.g. -23.42,-51.93)",
                s
            ))
        };

        let (lat, lon) = s.split_once(',').ok_or_else(invalid)?;
        let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
        let lon: f64 = lon.trim().parse().map_err(|_| invalid())?;

        GeoCoordinate::new(lat, lon).ok_or_else(invalid)
    }
}

/// A festival event that has been placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedEvent {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    pub location: String,
    pub description: Option<String>,
    pub coordinate: GeoCoordinate,
}

impl fmt::Display for EnrichedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "(untitled)")
        } else {
            write!(f, "{}", self.name)
        }
    }
}
