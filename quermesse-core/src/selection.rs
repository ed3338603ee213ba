//! What the user is currently looking at.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use crate::date_window::parse_date;
use crate::error::QuermesseError;
use crate::event::{EnrichedEvent, GeoCoordinate};

/// Date selector value: every date, or one specific day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    #[default]
    All,
    On(NaiveDate),
}

impl DateFilter {
    pub fn accepts(&self, date: NaiveDate) -> bool {
        match self {
            DateFilter::All => true,
            DateFilter::On(selected) => *selected == date,
        }
    }
}

/// "all" or YYYY-MM-DD
impl FromStr for DateFilter {
    type Err = QuermesseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(DateFilter::All)
        } else {
            parse_date(s).map(DateFilter::On)
        }
    }
}

impl fmt::Display for DateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateFilter::All => write!(f, "all"),
            DateFilter::On(date) => write!(f, "{}", date),
        }
    }
}

/// Filters and map focus chosen by the user. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionState {
    pub date: DateFilter,
    pub search: String,
    /// Set by "show on map"
    pub focus: Option<GeoCoordinate>,
    /// The user's own location, when known
    pub origin: Option<GeoCoordinate>,
}

impl SelectionState {
    pub fn with_date(mut self, date: DateFilter) -> Self {
        self.date = date;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_origin(mut self, origin: Option<GeoCoordinate>) -> Self {
        self.origin = origin;
        self
    }

    /// Focus the map on `event`, returning the new focus
    pub fn focus_on(&mut self, event: &EnrichedEvent) -> GeoCoordinate {
        self.focus = Some(event.coordinate);
        event.coordinate
    }

    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    /// Case-insensitive substring match on the event name. Only an empty search matches everything.
    pub fn matches_search(&self, name: &str) -> bool {
        self.search.is_empty() || name.to_lowercase().contains(&self.search.to_lowercase())
    }
}
