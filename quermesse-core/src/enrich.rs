//! Raw calendar entries → placed events.
//!
//! Entries without a location or start date are dropped up front. The rest
//! are geocoded concurrently; each lookup yields its own optional result and
//! the results are gathered once every lookup has finished. An entry whose
//! address can't be resolved is dropped without failing the batch.

use std::fmt;

use chrono::NaiveDate;
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, warn};

use crate::event::{EnrichedEvent, RawCalendarEntry};
use crate::geocoder::Geocoder;

/// Why an entry did not make it into the enriched set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    MissingLocation,
    MissingDate,
    InvalidDate,
    GeocodeMiss,
}

impl DropReason {
    /// Malformed entries are the caller's data problem; geocode misses are the service's
    pub fn is_malformed(&self) -> bool {
        !matches!(self, DropReason::GeocodeMiss)
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DropReason::MissingLocation => "missing location",
            DropReason::MissingDate => "missing start date",
            DropReason::InvalidDate => "invalid start date",
            DropReason::GeocodeMiss => "address not found",
        };
        write!(f, "{}", text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedEntry {
    pub id: String,
    pub name: Option<String>,
    pub reason: DropReason,
}

/// Outcome of enriching one batch of entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Enrichment {
    pub events: Vec<EnrichedEvent>,
    pub dropped: Vec<DroppedEntry>,
}

impl Enrichment {
    pub fn geocode_misses(&self) -> usize {
        self.dropped
            .iter()
            .filter(|d| d.reason == DropReason::GeocodeMiss)
            .count()
    }

    pub fn malformed(&self) -> usize {
        self.dropped.iter().filter(|d| d.reason.is_malformed()).count()
    }
}

/// An entry that passed validation and is waiting for its coordinate
struct Candidate<'a> {
    entry: &'a RawCalendarEntry,
    location: &'a str,
    date: NaiveDate,
}

fn validate(entry: &RawCalendarEntry) -> Result<Candidate<'_>, DropReason> {
    let location = entry.location_text().ok_or(DropReason::MissingLocation)?;
    let date_text = entry.start_date_text().ok_or(DropReason::MissingDate)?;
    let date = NaiveDate::parse_from_str(date_text, "%Y-%m-%d")
        .map_err(|_| DropReason::InvalidDate)?;

    Ok(Candidate {
        entry,
        location,
        date,
    })
}

fn dropped(entry: &RawCalendarEntry, reason: DropReason) -> DroppedEntry {
    DroppedEntry {
        id: entry.id.clone(),
        name: entry.summary.clone(),
        reason,
    }
}

/// Enrich entries, keeping track of everything that was dropped.
pub async fn enrich_with_report<G: Geocoder>(
    entries: &[RawCalendarEntry],
    geocoder: &G,
) -> Enrichment {
    let mut report = Enrichment::default();
    let mut candidates = Vec::with_capacity(entries.len());

    for entry in entries {
        match validate(entry) {
            Ok(candidate) => candidates.push(candidate),
            Err(reason) => {
                warn!(id = %entry.id, summary = ?entry.summary, %reason, "skipping calendar entry");
                report.dropped.push(dropped(entry, reason));
            }
        }
    }

    let lookups = candidates.iter().map(|c| geocoder.resolve(c.location));
    let coordinates = join_all(lookups).await;

    for (candidate, coordinate) in candidates.into_iter().zip(coordinates) {
        let entry = candidate.entry;

        match coordinate {
            Some(coordinate) => report.events.push(EnrichedEvent {
                id: entry.id.clone(),
                name: entry.summary.clone().unwrap_or_default(),
                date: candidate.date,
                location: candidate.location.to_string(),
                description: entry.description.clone(),
                coordinate,
            }),
            None => {
                debug!(id = %entry.id, location = candidate.location, "dropping entry with unresolved address");
                report.dropped.push(dropped(entry, DropReason::GeocodeMiss));
            }
        }
    }

    report
}

/// Enrich entries, returning only the events that could be placed.
pub async fn enrich<G: Geocoder>(entries: &[RawCalendarEntry], geocoder: &G) -> Vec<EnrichedEvent> {
    enrich_with_report(entries, geocoder).await.events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EntryStart, GeoCoordinate};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Resolves from a fixed table and records every address it was asked about
    struct TableGeocoder {
        table: HashMap<&'static str, GeoCoordinate>,
        asked: Mutex<Vec<String>>,
    }

    impl TableGeocoder {
        fn new(entries: &[(&'static str, f64, f64)]) -> Self {
            TableGeocoder {
                table: entries
                    .iter()
                    .map(|(addr, lat, lon)| (*addr, GeoCoordinate::new(*lat, *lon).unwrap()))
                    .collect(),
                asked: Mutex::new(Vec::new()),
            }
        }
    }

    impl Geocoder for TableGeocoder {
        async fn resolve(&self, address: &str) -> Option<GeoCoordinate> {
            self.asked.lock().unwrap().push(address.to_string());
            self.table.get(address).copied()
        }
    }

    fn entry(id: &str, date: Option<&str>, location: Option<&str>) -> RawCalendarEntry {
        RawCalendarEntry {
            id: id.to_string(),
            summary: Some(format!("Festa {}", id)),
            start: date.map(|d| EntryStart {
                date: Some(d.to_string()),
                date_time: None,
            }),
            location: location.map(str::to_string),
            description: None,
        }
    }

    #[tokio::test]
    async fn keeps_entries_with_resolved_addresses() {
        let geocoder = TableGeocoder::new(&[("Catedral, Maringá", -23.4253, -51.9386)]);
        let entries = vec![entry("a", Some("2025-06-14"), Some("Catedral, Maringá"))];

        let events = enrich(&entries, &geocoder).await;

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.id, "a");
        assert_eq!(event.name, "Festa a");
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2025, 6, 14).unwrap());
        assert_eq!(event.location, "Catedral, Maringá");
        assert_eq!(event.coordinate.lat(), -23.4253);
    }

    #[tokio::test]
    async fn malformed_entries_shrink_set_by_their_count() {
        let geocoder = TableGeocoder::new(&[("Rua A", -23.0, -51.0), ("Rua B", -23.1, -51.1)]);
        let entries = vec![
            entry("ok1", Some("2025-06-14"), Some("Rua A")),
            entry("no-location", Some("2025-06-14"), None),
            entry("blank-location", Some("2025-06-14"), Some("  ")),
            entry("no-date", None, Some("Rua A")),
            entry("ok2", Some("2025-06-15"), Some("Rua B")),
        ];

        let report = enrich_with_report(&entries, &geocoder).await;

        assert_eq!(report.events.len(), entries.len() - 3);
        assert_eq!(report.malformed(), 3);
        assert_eq!(report.geocode_misses(), 0);

        // Malformed entries never reach the geocoder
        let asked = geocoder.asked.lock().unwrap();
        assert_eq!(asked.len(), 2);
    }

    #[tokio::test]
    async fn geocode_miss_drops_only_that_entry() {
        let geocoder = TableGeocoder::new(&[("Rua A", -23.0, -51.0)]);
        let entries = vec![
            entry("found", Some("2025-06-14"), Some("Rua A")),
            entry("lost", Some("2025-06-14"), Some("Lugar Nenhum")),
        ];

        let report = enrich_with_report(&entries, &geocoder).await;

        assert_eq!(report.events.len(), 1);
        assert_eq!(report.events[0].id, "found");
        assert_eq!(
            report.dropped,
            vec![DroppedEntry {
                id: "lost".to_string(),
                name: Some("Festa lost".to_string()),
                reason: DropReason::GeocodeMiss,
            }]
        );
    }

    #[tokio::test]
    async fn invalid_date_is_malformed() {
        let geocoder = TableGeocoder::new(&[("Rua A", -23.0, -51.0)]);
        let entries = vec![entry("bad", Some("14/06/2025"), Some("Rua A"))];

        let report = enrich_with_report(&entries, &geocoder).await;

        assert!(report.events.is_empty());
        assert_eq!(report.dropped[0].reason, DropReason::InvalidDate);
    }

    #[tokio::test]
    async fn timed_entry_without_all_day_date_is_dropped() {
        let geocoder = TableGeocoder::new(&[("Rua A", -23.0, -51.0)]);
        let mut timed = entry("timed", None, Some("Rua A"));
        timed.start = Some(EntryStart {
            date: None,
            date_time: Some("2025-06-14T19:00:00-03:00".to_string()),
        });

        let report = enrich_with_report(&[timed], &geocoder).await;

        assert!(report.events.is_empty());
        assert_eq!(report.dropped[0].reason, DropReason::MissingDate);
    }

    #[tokio::test]
    async fn missing_summary_becomes_empty_name() {
        let geocoder = TableGeocoder::new(&[("Rua A", -23.0, -51.0)]);
        let mut untitled = entry("u", Some("2025-06-14"), Some("Rua A"));
        untitled.summary = None;

        let events = enrich(&[untitled], &geocoder).await;

        assert_eq!(events[0].name, "");
        assert_eq!(events[0].to_string(), "(untitled)");
    }
}
