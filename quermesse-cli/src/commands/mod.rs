pub mod config;
pub mod dates;
pub mod events;
pub mod show;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use quermesse_core::date_window::parse_date;
use quermesse_core::pipeline::{Catalog, Pipeline};
use quermesse_core::{Config, DateWindow, GeoCoordinate};

use crate::utils::tui;

/// Which slice of the calendar to fetch, and what "today" is.
#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// Fetch this whole month (YYYY-MM). Defaults to the current month
    #[arg(short, long, conflicts_with_all = ["from", "to"])]
    pub month: Option<String>,

    /// Fetch events from this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Fetch events until this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Pretend today is this date (YYYY-MM-DD); earlier events are hidden
    #[arg(long)]
    pub today: Option<String>,
}

impl WindowArgs {
    pub fn today(&self) -> Result<NaiveDate> {
        match self.today.as_deref() {
            Some(s) => Ok(parse_date(s)?),
            None => Ok(chrono::Local::now().date_naive()),
        }
    }

    pub fn window(&self) -> Result<DateWindow> {
        Ok(DateWindow::from_args(
            self.month.as_deref(),
            self.from.as_deref(),
            self.to.as_deref(),
            self.today()?,
        )?)
    }
}

pub fn parse_origin(origin: Option<&str>) -> Result<Option<GeoCoordinate>> {
    Ok(origin.map(str::parse::<GeoCoordinate>).transpose()?)
}

/// Run the fetch → enrich cycle behind a spinner.
///
/// A calendar failure is logged by the pipeline and comes back as an empty catalog.
pub async fn load_catalog(config: &Config, window: DateWindow) -> Result<Catalog> {
    let pipeline = Pipeline::from_config(config)?;

    let spinner = tui::create_spinner(format!(
        "Loading festivals {} → {}",
        window.start.date_naive(),
        window.end.date_naive()
    ));
    let catalog = pipeline.load(window).await;
    spinner.finish_and_clear();

    Ok(catalog)
}
