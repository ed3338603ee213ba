//! Calendar service client.

use std::future::Future;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::date_window::DateWindow;
use crate::error::{QuermesseError, QuermesseResult};
use crate::event::RawCalendarEntry;

/// Source of raw calendar entries for a time window.
pub trait CalendarFetcher {
    fn fetch_events(
        &self,
        window: &DateWindow,
    ) -> impl Future<Output = QuermesseResult<Vec<RawCalendarEntry>>> + Send;
}

/// Fetches a public Google Calendar with an API key (no OAuth).
#[derive(Clone)]
pub struct GoogleCalendarFetcher {
    http: reqwest::Client,
    base_url: String,
    calendar_id: String,
    api_key: String,
}

#[derive(Deserialize)]
struct EventsResponse {
    #[serde(default)]
    items: Vec<RawCalendarEntry>,
}

impl GoogleCalendarFetcher {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        calendar_id: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        GoogleCalendarFetcher {
            http,
            base_url: base_url.into(),
            calendar_id: calendar_id.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(http: reqwest::Client, config: &Config) -> Self {
        Self::new(
            http,
            config.calendar_base_url.clone(),
            config.calendar_id.clone(),
            config.api_key.clone(),
        )
    }

    /// {base}/calendars/{calendar_id}/events, with the id encoded as one path segment
    fn events_url(&self) -> QuermesseResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            QuermesseError::Config(format!("Invalid calendar base URL '{}': {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                QuermesseError::Config(format!(
                    "Calendar base URL '{}' cannot have a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["calendars", self.calendar_id.as_str(), "events"]);

        Ok(url)
    }
}

impl CalendarFetcher for GoogleCalendarFetcher {
    async fn fetch_events(&self, window: &DateWindow) -> QuermesseResult<Vec<RawCalendarEntry>> {
        let url = self.events_url()?;
        let time_min = window.start_rfc3339();
        let time_max = window.end_rfc3339();

        debug!(%url, %time_min, %time_max, "fetching calendar events");

        let response = self
            .http
            .get(url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(QuermesseError::Fetch {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: EventsResponse =
            serde_json::from_str(&body).map_err(|e| QuermesseError::Decode(e.to_string()))?;

        debug!(count = parsed.items.len(), "calendar entries received");

        Ok(parsed.items)
    }
}
