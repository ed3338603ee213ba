use anyhow::Result;
use owo_colors::OwoColorize;
use quermesse_core::enrich::DroppedEntry;
use quermesse_core::filter::compute_displayed;
use quermesse_core::links::{directions_url, map_url};
use quermesse_core::{Config, DateFilter, EnrichedEvent, GeoCoordinate, SelectionState};
use serde::Serialize;

use super::{WindowArgs, load_catalog, parse_origin};
use crate::render::{Render, format_date_label, render_dropped_note, render_event_lines};

pub struct EventsOptions {
    pub date: String,
    pub search: String,
    pub origin: Option<String>,
    pub json: bool,
    pub hidden: bool,
}

/// JSON handed to a map renderer
#[derive(Serialize)]
struct MapPayload<'a> {
    center: GeoCoordinate,
    zoom: u8,
    selection: &'a SelectionState,
    markers: Vec<Marker<'a>>,
    hidden: &'a [DroppedEntry],
}

#[derive(Serialize)]
struct Marker<'a> {
    #[serde(flatten)]
    event: &'a EnrichedEvent,
    map_url: String,
    directions_url: String,
}

pub async fn run(config: &Config, window_args: &WindowArgs, opts: EventsOptions) -> Result<()> {
    let today = window_args.today()?;
    let window = window_args.window()?;

    let selection = SelectionState::default()
        .with_date(opts.date.parse::<DateFilter>()?)
        .with_search(opts.search)
        .with_origin(parse_origin(opts.origin.as_deref())?);

    let catalog = load_catalog(config, window).await?;
    let displayed = compute_displayed(&catalog.events, &selection, today);

    if opts.json {
        let payload = MapPayload {
            center: config.map_center,
            zoom: config.map_zoom,
            selection: &selection,
            markers: displayed
                .iter()
                .map(|event| Marker {
                    event,
                    map_url: map_url(event.coordinate, config.map_zoom),
                    directions_url: directions_url(&event.location, selection.origin),
                })
                .collect(),
            hidden: &catalog.dropped,
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if displayed.is_empty() {
        println!("{}", "No events found".dimmed());
    }

    // Group events by day and print
    let mut current_date = None;

    for event in &displayed {
        if current_date != Some(event.date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", format_date_label(event.date, today).bold());
            current_date = Some(event.date);
        }

        for line in render_event_lines(event, selection.origin) {
            println!("{}", line);
        }
    }

    if opts.hidden && !catalog.dropped.is_empty() {
        println!();
        println!("{}", "Hidden".bold());
        for entry in &catalog.dropped {
            println!("  {}", entry.render());
        }
    } else if let Some(note) = render_dropped_note(&catalog.dropped) {
        println!();
        println!("{}", note.dimmed());
    }

    Ok(())
}
