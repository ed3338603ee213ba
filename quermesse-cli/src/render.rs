//! Terminal rendering for quermesse types.
//!
//! Extension traits that add colored output to quermesse-core types using
//! owo_colors.

use chrono::NaiveDate;
use owo_colors::OwoColorize;
use quermesse_core::enrich::DroppedEntry;
use quermesse_core::links::directions_url;
use quermesse_core::{EnrichedEvent, GeoCoordinate};

pub trait Render {
    fn render(&self) -> String;
}

impl Render for EnrichedEvent {
    fn render(&self) -> String {
        format!("{} {}", self.to_string().bold(), format!("[{}]", self.id).dimmed())
    }
}

impl Render for DroppedEntry {
    fn render(&self) -> String {
        let name = self.name.as_deref().unwrap_or("(untitled)");
        format!("{} {}", name, format!("({})", self.reason).dimmed())
    }
}

/// Event block as shown in lists: name, address, directions
pub fn render_event_lines(event: &EnrichedEvent, origin: Option<GeoCoordinate>) -> Vec<String> {
    vec![
        format!("  {}", event.render()),
        format!("    📍 {}", event.location),
        format!("    {}", directions_url(&event.location, origin).dimmed()),
    ]
}

/// Format a date as a human-readable label (e.g. "Today", "Tomorrow", "Sat Jun 14")
pub fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d").to_string(),
    }
}

/// One-line note about events that could not be shown
pub fn render_dropped_note(dropped: &[DroppedEntry]) -> Option<String> {
    if dropped.is_empty() {
        return None;
    }

    let noun = if dropped.len() == 1 { "event" } else { "events" };
    Some(format!(
        "{} {} hidden (missing data or address not found). Use --hidden to list them.",
        dropped.len(),
        noun
    ))
}
