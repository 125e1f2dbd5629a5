//! Location-history export loading.
//!
//! Reads a JSON document of the form
//!
//! ```json
//! { "locations": [ { "timestampMs": "1577836800000", "latitudeE7": 520000000, "longitudeE7": 40000000 } ] }
//! ```
//!
//! `timestampMs` may be a string or an integer. Newer exports drop it in
//! favour of an RFC 3339 `timestamp`; either is accepted. Any other record
//! fields (accuracy, activity, ...) are ignored.

use std::fs::File;
use std::io::BufReader;

use camino::Utf8Path;
use chrono::DateTime;
use serde::Deserialize;

use crate::error::{InputError, InputResult};
use crate::geo::Coordinate;

/// One timestamped position from the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationSample {
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    /// Latitude in degrees × 10^7.
    pub lat_e7: i64,
    /// Longitude in degrees × 10^7.
    pub lon_e7: i64,
}

impl LocationSample {
    /// The sample's position in decimal degrees.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::from_e7(self.lat_e7, self.lon_e7)
    }
}

#[derive(Deserialize)]
struct RawExport {
    locations: Vec<RawLocation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLocation {
    timestamp_ms: Option<RawMillis>,
    timestamp: Option<String>,
    latitude_e7: Option<i64>,
    longitude_e7: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMillis {
    Number(i64),
    Text(String),
}

impl RawLocation {
    fn into_sample(self, index: usize) -> InputResult<LocationSample> {
        let invalid = |reason: String| InputError::InvalidSample { index, reason };

        let timestamp_ms = match (self.timestamp_ms, self.timestamp) {
            (Some(RawMillis::Number(ms)), _) => ms,
            (Some(RawMillis::Text(text)), _) => text
                .trim()
                .parse::<i64>()
                .map_err(|e| invalid(format!("timestampMs {text:?} is not an integer: {e}")))?,
            (None, Some(text)) => DateTime::parse_from_rfc3339(&text)
                .map_err(|e| invalid(format!("timestamp {text:?} is not RFC 3339: {e}")))?
                .timestamp_millis(),
            (None, None) => return Err(invalid("missing timestampMs".to_string())),
        };
        let lat_e7 = self
            .latitude_e7
            .ok_or_else(|| invalid("missing latitudeE7".to_string()))?;
        let lon_e7 = self
            .longitude_e7
            .ok_or_else(|| invalid("missing longitudeE7".to_string()))?;

        Ok(LocationSample {
            timestamp_ms,
            lat_e7,
            lon_e7,
        })
    }
}

/// Load every sample from a location-history export, in document order.
///
/// Fails before reading anything if `path` is not an existing file.
#[tracing::instrument(skip_all, fields(path = %path))]
pub fn load(path: &Utf8Path) -> InputResult<Vec<LocationSample>> {
    if !path.is_file() {
        return Err(InputError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path.as_std_path()).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let export: RawExport =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| InputError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    let samples = export
        .locations
        .into_iter()
        .enumerate()
        .map(|(index, raw)| raw.into_sample(index))
        .collect::<InputResult<Vec<_>>>()?;

    tracing::debug!(samples = samples.len(), "location history loaded");
    Ok(samples)
}
