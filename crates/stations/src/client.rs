//! HTTP client for single openSenseMap stations.
//!
//! Wraps `GET /boxes/{id}?format=json` using [`reqwest`]. The client
//! never raises network failures to its caller: a timeout, a
//! non-success status, or a malformed body all come back as absence.
//! Fan-out and retry policy belong to the caller.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use meantemp_core::aggregate::is_temperature_sensor;
use meantemp_core::types::StationReading;

/// Default request timeout per station call.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Deserialized subset of an openSenseMap box document.
#[derive(Debug, Deserialize)]
struct SenseBox {
    #[serde(default)]
    sensors: Vec<Sensor>,
}

#[derive(Debug, Deserialize)]
struct Sensor {
    #[serde(default)]
    title: String,
    #[serde(rename = "lastMeasurement")]
    last_measurement: Option<LastMeasurement>,
}

/// openSenseMap serializes measurement values as strings.
#[derive(Debug, Deserialize)]
struct LastMeasurement {
    value: Option<String>,
    #[serde(rename = "createdAt")]
    created_at: Option<String>,
}

/// Client for fetching the latest reading of individual stations.
#[derive(Debug, Clone)]
pub struct StationClient {
    client: reqwest::Client,
    base_url: String,
}

impl StationClient {
    /// Create a client for the given API base URL (e.g.
    /// `https://api.opensensemap.org`), with a bounded per-request
    /// timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch the latest temperature reading of one station.
    ///
    /// Returns `None` on any failure (network, non-2xx status,
    /// malformed body) and when the box carries no in-date-format
    /// temperature sensor. Failures are logged at debug level only;
    /// the aggregate handles them by omission.
    pub async fn fetch(&self, station_id: &str) -> Option<StationReading> {
        let sense_box = match self.fetch_box(station_id).await {
            Ok(b) => b,
            Err(reason) => {
                tracing::debug!(station_id, %reason, "Station fetch failed, dropping");
                return None;
            }
        };

        extract_reading(station_id, &sense_box)
    }

    /// Whether the station endpoint currently answers with a valid box
    /// document. Used by the readiness probe; the sensor payload is
    /// not inspected.
    pub async fn probe(&self, station_id: &str) -> bool {
        self.fetch_box(station_id).await.is_ok()
    }

    async fn fetch_box(&self, station_id: &str) -> Result<SenseBox, String> {
        let url = format!("{}/boxes/{}?format=json", self.base_url, station_id);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("status {}", response.status()));
        }

        response.json::<SenseBox>().await.map_err(|e| e.to_string())
    }
}

/// Locate the temperature sensor in a box and build a reading from it.
///
/// Sensors without a parseable value or timestamp are skipped, not
/// defaulted. The first matching sensor with usable data wins.
fn extract_reading(station_id: &str, sense_box: &SenseBox) -> Option<StationReading> {
    for sensor in &sense_box.sensors {
        if !is_temperature_sensor(&sensor.title) {
            continue;
        }

        let Some(measurement) = &sensor.last_measurement else {
            tracing::debug!(station_id, title = %sensor.title, "Sensor has no measurement");
            continue;
        };

        let value = match measurement.value.as_deref().map(str::parse::<f64>) {
            Some(Ok(v)) => v,
            _ => {
                tracing::debug!(station_id, title = %sensor.title, "Unparseable sensor value");
                continue;
            }
        };

        let observed_at = match measurement
            .created_at
            .as_deref()
            .map(DateTime::parse_from_rfc3339)
        {
            Some(Ok(t)) => t.with_timezone(&Utc),
            _ => {
                tracing::debug!(station_id, title = %sensor.title, "Unparseable measurement timestamp");
                continue;
            }
        };

        return Some(StationReading {
            station_id: station_id.to_string(),
            sensor_title: sensor.title.clone(),
            value,
            observed_at,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_box(json: &str) -> SenseBox {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn extracts_temperature_sensor_reading() {
        let sense_box = parse_box(
            r#"{
                "_id": "abc",
                "name": "Roof Box",
                "sensors": [
                    {"title": "rel. Luftfeuchte", "lastMeasurement": {"value": "55.1", "createdAt": "2025-06-15T11:58:00.000Z"}},
                    {"title": "Temperatur", "lastMeasurement": {"value": "22.5", "createdAt": "2025-06-15T11:59:00.000Z"}}
                ]
            }"#,
        );

        let reading = extract_reading("abc", &sense_box).unwrap();
        assert_eq!(reading.value, 22.5);
        assert_eq!(reading.sensor_title, "Temperatur");
        assert_eq!(reading.station_id, "abc");
        assert_eq!(reading.observed_at.to_rfc3339(), "2025-06-15T11:59:00+00:00");
    }

    #[test]
    fn missing_timestamp_discards_the_reading() {
        let sense_box = parse_box(
            r#"{"sensors": [{"title": "Temperatur", "lastMeasurement": {"value": "22.5"}}]}"#,
        );
        assert!(extract_reading("abc", &sense_box).is_none());
    }

    #[test]
    fn unparseable_timestamp_discards_the_reading() {
        let sense_box = parse_box(
            r#"{"sensors": [{"title": "Temperatur", "lastMeasurement": {"value": "22.5", "createdAt": "yesterday"}}]}"#,
        );
        assert!(extract_reading("abc", &sense_box).is_none());
    }

    #[test]
    fn unparseable_value_discards_the_reading() {
        let sense_box = parse_box(
            r#"{"sensors": [{"title": "Temperatur", "lastMeasurement": {"value": "n/a", "createdAt": "2025-06-15T11:59:00.000Z"}}]}"#,
        );
        assert!(extract_reading("abc", &sense_box).is_none());
    }

    #[test]
    fn box_without_temperature_sensor_yields_nothing() {
        let sense_box = parse_box(
            r#"{"sensors": [{"title": "PM2.5", "lastMeasurement": {"value": "8.2", "createdAt": "2025-06-15T11:59:00.000Z"}}]}"#,
        );
        assert!(extract_reading("abc", &sense_box).is_none());
    }

    #[test]
    fn box_without_sensors_array_yields_nothing() {
        let sense_box = parse_box(r#"{"_id": "abc"}"#);
        assert!(extract_reading("abc", &sense_box).is_none());
    }
}
