use serde::Deserialize;
use tracing::{debug, error, instrument, warn};

use crate::common::errors::DomainError;

/// Nominatim API response for geocoding
#[derive(Debug, Deserialize)]
struct NominatimResponse {
    lat: String,
    lon: String,
    display_name: String,
}

/// A postcode resolved to coordinates by the external geocoder.
///
/// Resolution either succeeds with real coordinates or fails with a typed
/// error; there is no zero-coordinate fallback, which would silently corrupt
/// every downstream distance calculation.
#[derive(Debug, Clone)]
pub struct ResolvedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

impl ResolvedLocation {
    /// Locality portion of the display name ("Bristol, South West England,
    /// United Kingdom" -> "Bristol").
    pub fn city(&self) -> &str {
        self.display_name
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or(&self.display_name)
    }
}

/// Client for the external geocoding service (Nominatim / OpenStreetMap).
#[derive(Clone)]
pub struct GeocodingClient {
    base_url: String,
    client: reqwest::Client,
}

impl GeocodingClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Resolve a postal code to coordinates.
    ///
    /// Returns `InvalidInput` for malformed or unknown postcodes and
    /// `UpstreamUnavailable` when the geocoder cannot be reached or returns
    /// garbage.
    #[instrument(skip(self))]
    pub async fn postcode_to_coords(&self, postcode: &str) -> Result<ResolvedLocation, DomainError> {
        let postcode = validate_postcode(postcode)?;

        let url = format!(
            "{}/search?postalcode={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(&postcode)
        );

        debug!("Resolving postcode: {}", postcode);

        let response: Vec<NominatimResponse> = self
            .client
            .get(&url)
            .header("User-Agent", "SwapCycle/1.0 (item swap marketplace)")
            .timeout(std::time::Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, postcode = %postcode, "Geocoding API request failed");
                DomainError::UpstreamUnavailable(format!("geocoder request failed: {}", e))
            })?
            .json()
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to parse geocoding response");
                DomainError::UpstreamUnavailable(format!("geocoder response malformed: {}", e))
            })?;

        let result = response.first().ok_or_else(|| {
            warn!(postcode = %postcode, "Postcode not found by geocoding API");
            DomainError::InvalidInput(format!("postcode not found: {}", postcode))
        })?;

        let latitude: f64 = result.lat.parse().map_err(|e| {
            DomainError::UpstreamUnavailable(format!("invalid latitude in response: {}", e))
        })?;
        let longitude: f64 = result.lon.parse().map_err(|e| {
            DomainError::UpstreamUnavailable(format!("invalid longitude in response: {}", e))
        })?;

        debug!(
            "Resolved {} -> ({}, {})",
            postcode, latitude, longitude
        );

        Ok(ResolvedLocation {
            latitude,
            longitude,
            display_name: result.display_name.clone(),
        })
    }

    /// Resolve a postal code to its locality name.
    pub async fn city_from_postcode(&self, postcode: &str) -> Result<String, DomainError> {
        let location = self.postcode_to_coords(postcode).await?;
        Ok(location.city().to_string())
    }
}

/// Validate and normalize a postcode string.
///
/// Accepts letters, digits, spaces and hyphens, 3 to 10 characters after
/// trimming. Enough to reject obvious garbage before hitting the geocoder.
pub fn validate_postcode(postcode: &str) -> Result<String, DomainError> {
    let trimmed = postcode.trim().to_uppercase();
    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-');
    if trimmed.len() < 3 || trimmed.len() > 10 || !valid_chars {
        return Err(DomainError::InvalidInput(format!(
            "malformed postcode: {}",
            postcode
        )));
    }
    Ok(trimmed)
}

/// Calculate great-circle distance between two coordinates in meters
///
/// Uses Haversine formula for accuracy on Earth's surface
pub fn haversine_meters(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    const EARTH_RADIUS_M: f64 = 6_371_000.0;

    let dlat = (lat2 - lat1).to_radians();
    let dlng = (lng2 - lng1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlng / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Distance in meters between two optionally-resolved coordinate pairs.
///
/// `None` when either side has no resolved location - callers must decide
/// how to treat an unrankable pair instead of receiving a fake zero.
pub fn distance_meters(
    a: Option<(f64, f64)>,
    b: Option<(f64, f64)>,
) -> Option<f64> {
    let (lat1, lng1) = a?;
    let (lat2, lng2) = b?;
    Some(haversine_meters(lat1, lng1, lat2, lng2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        // Bristol to Bath (~18.5 km)
        let bristol = (51.4545, -2.5879);
        let bath = (51.3758, -2.3599);

        let distance = haversine_meters(bristol.0, bristol.1, bath.0, bath.1);
        assert!(distance > 17_000.0 && distance < 20_000.0);
    }

    #[test]
    fn test_haversine_same_point_is_zero() {
        let distance = haversine_meters(51.4545, -2.5879, 51.4545, -2.5879);
        assert!(distance < 0.001);
    }

    #[test]
    fn test_haversine_symmetric() {
        let d1 = haversine_meters(51.45, -2.58, 53.48, -2.24);
        let d2 = haversine_meters(53.48, -2.24, 51.45, -2.58);
        assert!((d1 - d2).abs() < 1e-6);
    }

    #[test]
    fn test_distance_meters_missing_coordinates() {
        assert!(distance_meters(None, Some((51.45, -2.58))).is_none());
        assert!(distance_meters(Some((51.45, -2.58)), None).is_none());
        assert!(distance_meters(None, None).is_none());
        assert!(distance_meters(Some((51.45, -2.58)), Some((51.45, -2.58))).is_some());
    }

    #[test]
    fn test_validate_postcode() {
        assert_eq!(validate_postcode(" bs1 4dj ").unwrap(), "BS1 4DJ");
        assert_eq!(validate_postcode("90210").unwrap(), "90210");
        assert!(validate_postcode("").is_err());
        assert!(validate_postcode("x").is_err());
        assert!(validate_postcode("no_way!").is_err());
        assert!(validate_postcode("waaaaay too long to be real").is_err());
    }

    #[tokio::test]
    async fn test_postcode_to_coords() {
        // Integration test - requires internet, opt in via env var
        if std::env::var("RUN_GEOCODING_TESTS").is_err() {
            return;
        }

        let client = GeocodingClient::new("https://nominatim.openstreetmap.org".to_string());
        let result = client.postcode_to_coords("BS1 4DJ").await;
        assert!(result.is_ok());

        let location = result.unwrap();
        assert!(location.latitude > 51.0 && location.latitude < 52.0);
        assert!(location.longitude < -2.0 && location.longitude > -3.0);
    }

    #[tokio::test]
    async fn test_malformed_postcode_rejected_before_network() {
        let client = GeocodingClient::new("https://nominatim.openstreetmap.org".to_string());
        let result = client.postcode_to_coords("!!").await;
        assert!(matches!(result, Err(DomainError::InvalidInput(_))));
    }
}
