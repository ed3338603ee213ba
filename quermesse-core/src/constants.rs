/// Google Calendar v3 REST endpoint
pub const DEFAULT_CALENDAR_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Public Nominatim instance
pub const DEFAULT_GEOCODER_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Initial map center (Maringá, PR)
pub const DEFAULT_MAP_CENTER_LAT: f64 = -23.420999;
pub const DEFAULT_MAP_CENTER_LON: f64 = -51.933055;

pub const DEFAULT_MAP_ZOOM: u8 = 13;

/// Zoom used when focusing a single event
pub const FOCUS_MAP_ZOOM: u8 = 17;

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const DEFAULT_USER_AGENT: &str = concat!("quermesse/", env!("CARGO_PKG_VERSION"));

/// Environment variable prefix for configuration overrides (QUERMESSE_API_KEY, ...)
pub const ENV_PREFIX: &str = "QUERMESSE";
