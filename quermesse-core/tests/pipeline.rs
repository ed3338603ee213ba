//! End-to-end pipeline tests: one mock server plays both calendar and geocoder.

use std::io;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use quermesse_core::enrich::DropReason;
use quermesse_core::filter::{available_dates, compute_displayed};
use quermesse_core::pipeline::Pipeline;
use quermesse_core::{Config, DateWindow, QuermesseError, SelectionState};
use wiremock::matchers::{method, path, path_regex, query_param};
use tracing_subscriber::fmt::MakeWriter;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Collects formatted log lines for assertions
#[derive(Clone, Default)]
struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn config(server: &MockServer) -> Config {
    let mut config = Config::new("test-key", "festas@group.calendar.google.com");
    config.calendar_base_url = server.uri();
    config.geocoder_base_url = server.uri();
    config
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

async fn mount_geocode(server: &MockServer, address: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", address))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn calendar_500_yields_empty_catalog() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/calendars/.+/events$"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let logs = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let pipeline = Pipeline::from_config(&config(&server)).unwrap();
    let window = DateWindow::month(2025, 6).unwrap();

    let catalog = pipeline.load(window).await;
    assert!(catalog.events.is_empty());
    assert!(catalog.dropped.is_empty());
    assert_eq!(catalog.window, window);

    let logged = logs.contents();
    assert!(logged.contains("ERROR"), "{}", logged);
    assert!(logged.contains("failed to fetch calendar events"), "{}", logged);
    assert!(logged.contains("HTTP 500"), "{}", logged);

    let err = pipeline.try_load(window).await.unwrap_err();
    assert!(matches!(err, QuermesseError::Fetch { status: 500 }));
}

#[tokio::test]
async fn unusable_base_url_is_logged_as_build_failure() {
    let logs = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let mut config = Config::new("test-key", "festas@group.calendar.google.com");
    config.calendar_base_url = "not a url".into();

    let pipeline = Pipeline::from_config(&config).unwrap();
    let catalog = pipeline.load(DateWindow::month(2025, 6).unwrap()).await;
    assert!(catalog.events.is_empty());

    let logged = logs.contents();
    assert!(logged.contains("calendar request could not be built"), "{}", logged);
    assert!(!logged.contains("failed to fetch calendar events"), "{}", logged);
}

#[tokio::test]
async fn enriches_filters_and_sorts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/calendars/.+/events$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{
                "items": [
                    { "id": "milho", "summary": "Festa do Milho", "start": { "date": "2025-06-20" }, "location": "Rua A" },
                    { "id": "pinhao", "summary": "Festa do Pinhão", "start": { "date": "2025-06-05" }, "location": "Rua B" },
                    { "id": "joao", "summary": "Quermesse São João", "start": { "date": "2025-06-10" }, "location": "Rua C" },
                    { "id": "perdida", "summary": "Festa Perdida", "start": { "date": "2025-06-12" }, "location": "Rua Z" },
                    { "id": "sem-local", "summary": "Festa Sem Local", "start": { "date": "2025-06-12" } },
                    { "id": "antiga", "summary": "Festa Antiga", "start": { "date": "2025-05-30" }, "location": "Rua A" }
                ]
            }"#,
        ))
        .mount(&server)
        .await;

    mount_geocode(&server, "Rua A", r#"[{"lat": "-23.41", "lon": "-51.93"}]"#).await;
    mount_geocode(&server, "Rua B", r#"[{"lat": "-23.42", "lon": "-51.94"}]"#).await;
    mount_geocode(&server, "Rua C", r#"[{"lat": "-23.43", "lon": "-51.95"}]"#).await;
    mount_geocode(&server, "Rua Z", "[]").await;

    let pipeline = Pipeline::from_config(&config(&server)).unwrap();
    let catalog = pipeline.load(DateWindow::month(2025, 6).unwrap()).await;

    assert_eq!(catalog.events.len(), 4);
    assert_eq!(catalog.dropped.len(), 2);
    assert!(catalog.dropped.iter().any(|d| d.id == "perdida" && d.reason == DropReason::GeocodeMiss));
    assert!(
        catalog
            .dropped
            .iter()
            .any(|d| d.id == "sem-local" && d.reason == DropReason::MissingLocation)
    );

    let today = day("2025-06-01");

    let displayed = compute_displayed(&catalog.events, &SelectionState::default(), today);
    let ids: Vec<&str> = displayed.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["pinhao", "joao", "milho"]);

    let festas = compute_displayed(
        &catalog.events,
        &SelectionState::default().with_search("FESTA"),
        today,
    );
    let ids: Vec<&str> = festas.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["pinhao", "milho"]);

    assert_eq!(
        available_dates(&catalog.events),
        vec![day("2025-05-30"), day("2025-06-05"), day("2025-06-10"), day("2025-06-20")]
    );

    assert_eq!(catalog.find("joao").map(|e| e.name.as_str()), Some("Quermesse São João"));
    assert!(catalog.find("perdida").is_none());
}
