//! Links to external map services.

use url::Url;

use crate::event::GeoCoordinate;

const DIRECTIONS_BASE_URL: &str = "https://www.google.com/maps/dir/";
const MAP_BASE_URL: &str = "https://www.openstreetmap.org/";

/// Google Maps directions to `location`, optionally starting from the user's position.
pub fn directions_url(location: &str, origin: Option<GeoCoordinate>) -> String {
    let origin = origin.map(|o| o.to_string());

    let mut params = vec![("api", "1"), ("destination", location.trim())];
    if let Some(origin) = origin.as_deref() {
        params.push(("origin", origin));
    }

    match Url::parse_with_params(DIRECTIONS_BASE_URL, &params) {
        Ok(url) => url.into(),
        // The base is a constant, so parsing can't fail
        Err(_) => DIRECTIONS_BASE_URL.to_string(),
    }
}

/// OpenStreetMap view centred on `coordinate` with a marker on it.
pub fn map_url(coordinate: GeoCoordinate, zoom: u8) -> String {
    format!(
        "{}?mlat={:.6}&mlon={:.6}#map={}/{:.6}/{:.6}",
        MAP_BASE_URL,
        coordinate.lat(),
        coordinate.lon(),
        zoom,
        coordinate.lat(),
        coordinate.lon()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_encode_location_text() {
        let url = directions_url("Paróquia São José & Cia, Maringá", None);

        assert!(url.starts_with("https://www.google.com/maps/dir/?api=1&destination="));
        assert!(!url.contains(' '));
        assert!(url.contains("Par%C3%B3quia+S%C3%A3o+Jos%C3%A9+%26+Cia%2C+Maring%C3%A1"));
        assert!(!url.contains("origin="));
    }

    #[test]
    fn directions_include_origin() {
        let origin = GeoCoordinate::new(-23.42, -51.93).unwrap();
        let url = directions_url("Catedral", Some(origin));

        assert!(url.ends_with("&origin=-23.420000%2C-51.930000"));
    }

    #[test]
    fn map_url_centres_on_coordinate() {
        let c = GeoCoordinate::new(-23.420999, -51.933055).unwrap();
        assert_eq!(
            map_url(c, 17),
            "https://www.openstreetmap.org/?mlat=-23.420999&mlon=-51.933055#map=17/-23.420999/-51.933055"
        );
    }
}
