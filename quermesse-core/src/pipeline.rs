//! Fetch → enrich, wired from configuration.

use serde::Serialize;
use tracing::{error, info, warn};

use crate::calendar::{CalendarFetcher, GoogleCalendarFetcher};
use crate::config::Config;
use crate::date_window::DateWindow;
use crate::enrich::{DroppedEntry, enrich_with_report};
use crate::error::{QuermesseError, QuermesseResult};
use crate::event::EnrichedEvent;
use crate::geocoder::{Geocoder, NominatimGeocoder};

/// Everything one fetch cycle produced. A new cycle yields a new catalog.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    #[serde(skip)]
    pub window: DateWindow,
    pub events: Vec<EnrichedEvent>,
    pub dropped: Vec<DroppedEntry>,
}

impl Catalog {
    pub fn empty(window: DateWindow) -> Self {
        Catalog {
            window,
            events: Vec::new(),
            dropped: Vec::new(),
        }
    }

    pub fn find(&self, id: &str) -> Option<&EnrichedEvent> {
        self.events.iter().find(|e| e.id == id)
    }
}

pub struct Pipeline<F, G> {
    fetcher: F,
    geocoder: G,
}

impl<F: CalendarFetcher, G: Geocoder> Pipeline<F, G> {
    pub fn new(fetcher: F, geocoder: G) -> Self {
        Pipeline { fetcher, geocoder }
    }

    /// Run one cycle. Calendar failures are logged and yield an empty catalog.
    pub async fn load(&self, window: DateWindow) -> Catalog {
        match self.try_load(window).await {
            Ok(catalog) => catalog,
            Err(e) => {
                if e.is_fetch_error() {
                    error!(error = %e, "failed to fetch calendar events");
                } else {
                    error!(error = %e, "calendar request could not be built");
                }
                Catalog::empty(window)
            }
        }
    }

    /// Run one cycle, surfacing calendar failures to the caller.
    pub async fn try_load(&self, window: DateWindow) -> QuermesseResult<Catalog> {
        let entries = self.fetcher.fetch_events(&window).await?;
        let report = enrich_with_report(&entries, &self.geocoder).await;

        let misses = report.geocode_misses();
        info!(
            fetched = entries.len(),
            kept = report.events.len(),
            malformed = report.malformed(),
            unresolved = misses,
            "calendar enriched"
        );

        if misses > 0 {
            warn!(count = misses, "events hidden because their address could not be found");
        }

        Ok(Catalog {
            window,
            events: report.events,
            dropped: report.dropped,
        })
    }
}

impl Pipeline<GoogleCalendarFetcher, NominatimGeocoder> {
    /// HTTP-backed pipeline sharing one client between calendar and geocoder.
    pub fn from_config(config: &Config) -> QuermesseResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| QuermesseError::Config(format!("Could not build HTTP client: {}", e)))?;

        Ok(Pipeline::new(
            GoogleCalendarFetcher::from_config(http.clone(), config),
            NominatimGeocoder::from_config(http, config),
        ))
    }
}
