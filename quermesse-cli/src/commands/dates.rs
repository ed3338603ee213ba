use anyhow::Result;
use owo_colors::OwoColorize;
use quermesse_core::Config;
use quermesse_core::filter::available_dates;

use super::{WindowArgs, load_catalog};
use crate::render::format_date_label;

pub async fn run(config: &Config, window_args: &WindowArgs) -> Result<()> {
    let today = window_args.today()?;
    let catalog = load_catalog(config, window_args.window()?).await?;

    let dates = available_dates(&catalog.events);

    if dates.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for date in dates {
        let count = catalog.events.iter().filter(|e| e.date == date).count();
        let noun = if count == 1 { "event" } else { "events" };
        let line = format!("{}  {} {}", date, count, noun);

        // Past dates stay selectable but never show events
        if date < today {
            println!("{}", line.dimmed());
        } else {
            println!("{}  {}", line, format_date_label(date, today).dimmed());
        }
    }

    Ok(())
}
