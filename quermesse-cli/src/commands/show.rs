use anyhow::{Result, bail};
use owo_colors::OwoColorize;
use quermesse_core::constants::FOCUS_MAP_ZOOM;
use quermesse_core::links::{directions_url, map_url};
use quermesse_core::{Config, SelectionState};
use tracing::warn;

use super::{WindowArgs, load_catalog, parse_origin};
use crate::render::Render;

pub async fn run(
    config: &Config,
    window_args: &WindowArgs,
    id: &str,
    origin: Option<&str>,
    open_browser: bool,
) -> Result<()> {
    let mut selection = SelectionState::default().with_origin(parse_origin(origin)?);
    let catalog = load_catalog(config, window_args.window()?).await?;

    let Some(event) = catalog.find(id) else {
        if catalog.dropped.iter().any(|d| d.id == id) {
            bail!("Event '{}' has no usable location and can't be shown on the map", id);
        }
        bail!(
            "Event '{}' not found between {} and {}. Try --month or --from/--to",
            id,
            catalog.window.start.date_naive(),
            catalog.window.end.date_naive()
        );
    };

    let focus = selection.focus_on(event);

    let directions = directions_url(&event.location, selection.origin);

    println!("{}", event.render());
    println!("  📅 {}", event.date);
    println!("  📍 {}", event.location);
    if let Some(description) = event.description.as_deref().filter(|d| !d.trim().is_empty()) {
        println!("  {}", description.trim());
    }
    println!();
    println!("  {} {}", "Map:".bold(), map_url(focus, FOCUS_MAP_ZOOM));
    println!("  {} {}", "Directions:".bold(), directions);

    if open_browser {
        if let Err(e) = open::that(&directions) {
            warn!(error = %e, url = %directions, "could not open browser");
            println!();
            println!("Could not open a browser. Copy the directions link above.");
        }
    }

    Ok(())
}
