//! USGS Earthquake Hazards Program client.
//!
//! Queries the FDSN event web service for recent significant earthquakes in
//! GeoJSON form.
//!
//! # API Reference
//!
//! See: <https://earthquake.usgs.gov/fdsnws/event/1/>

use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{
    DEFAULT_REQUEST_TIMEOUT, LOOKBACK_DAYS, SourceError, build_http_client, fetch_json,
    non_empty,
};
use crate::classify::earthquake_severity;
use crate::model::{DisasterEvent, DisasterType, EventSource};

/// Base URL for the FDSN event service.
const USGS_API_BASE: &str = "https://earthquake.usgs.gov/fdsnws/event/1";

/// Smallest magnitude requested from the catalog.
pub const MIN_MAGNITUDE: f64 = 4.5;

/// Client for querying the USGS earthquake catalog.
#[derive(Clone)]
pub struct UsgsClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for UsgsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl UsgsClient {
    /// Create a new USGS client with default settings.
    pub fn new() -> Self {
        Self::with_base_url(USGS_API_BASE)
    }

    /// Create a new USGS client with a custom base URL (for testing).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: build_http_client(DEFAULT_REQUEST_TIMEOUT),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Replace the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_http_client(timeout);
        self
    }

    /// Query earthquakes since `start` at or above `min_magnitude`, newest
    /// first.
    pub async fn query(
        &self,
        start: DateTime<Utc>,
        min_magnitude: f64,
    ) -> Result<UsgsFeatureCollection, SourceError> {
        let url = format!(
            "{}/query?format=geojson&starttime={}&minmagnitude={}&orderby=time",
            self.base_url,
            urlencoding::encode(&start.to_rfc3339_opts(SecondsFormat::Millis, true)),
            min_magnitude
        );

        fetch_json("USGS", self.client.get(&url)).await
    }

    /// Convenience method: M4.5+ earthquakes from the lookback window.
    pub async fn get_recent_earthquakes(&self) -> Result<UsgsFeatureCollection, SourceError> {
        let start = Utc::now() - ChronoDuration::days(LOOKBACK_DAYS);
        self.query(start, MIN_MAGNITUDE).await
    }

    /// Fetch and normalize recent earthquakes. Never fails; errors are
    /// logged and yield an empty list.
    pub async fn fetch_events(&self) -> Vec<DisasterEvent> {
        match self.get_recent_earthquakes().await {
            Ok(collection) => {
                let events = collection.to_events();
                info!(source = "USGS", count = events.len(), "Fetched events");
                events
            }
            Err(e) => {
                warn!(source = "USGS", error = %e, "Failed to fetch events");
                Vec::new()
            }
        }
    }
}

// ============================================================================
// Response types
// ============================================================================

/// GeoJSON feature collection returned by the query endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsgsFeatureCollection {
    #[serde(default)]
    pub metadata: Option<UsgsMetadata>,

    #[serde(default)]
    pub features: Vec<UsgsFeature>,
}

impl UsgsFeatureCollection {
    /// Normalize every well-formed feature, in feed order.
    pub fn to_events(&self) -> Vec<DisasterEvent> {
        self.features
            .iter()
            .filter_map(UsgsFeature::to_disaster_event)
            .collect()
    }
}

/// Collection metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsgsMetadata {
    #[serde(default)]
    pub generated: i64,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub count: i64,
}

/// A single earthquake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsgsFeature {
    pub id: String,
    pub properties: UsgsProperties,
    pub geometry: UsgsGeometry,
}

/// Earthquake properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsgsProperties {
    #[serde(default)]
    pub mag: Option<f64>,

    #[serde(default)]
    pub place: Option<String>,

    /// Origin time, milliseconds since the Unix epoch.
    #[serde(default)]
    pub time: i64,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    /// PAGER alert level (green, yellow, orange, red).
    #[serde(default)]
    pub alert: Option<String>,

    #[serde(default)]
    pub tsunami: i64,
}

/// Point geometry. Coordinates are `[longitude, latitude, depth_km]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsgsGeometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl UsgsProperties {
    /// Origin time as a DateTime.
    pub fn origin_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.time)
    }

    /// "Magnitude {mag} - {place}".
    pub fn summary(&self) -> String {
        let mag = self
            .mag
            .map(|m| m.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let place = self.place.as_deref().unwrap_or("unknown location");
        format!("Magnitude {} - {}", mag, place)
    }
}

impl UsgsFeature {
    /// Normalize into the unified schema, swapping the GeoJSON
    /// `(lon, lat)` order.
    pub fn to_disaster_event(&self) -> Option<DisasterEvent> {
        let [longitude, latitude, ..] = self.geometry.coordinates.as_slice() else {
            debug!(id = %self.id, "Skipping USGS feature without coordinates");
            return None;
        };

        let Some(start) = self.properties.origin_time() else {
            debug!(id = %self.id, time = self.properties.time, "Skipping USGS feature with invalid time");
            return None;
        };

        let props = &self.properties;
        let summary = props.summary();
        let title = non_empty(props.title.as_deref()).unwrap_or_else(|| summary.clone());

        Some(
            DisasterEvent::new(
                EventSource::Usgs,
                &self.id,
                DisasterType::Earthquake,
                &title,
                *latitude,
                *longitude,
                earthquake_severity(props.mag.unwrap_or(0.0)),
                start,
            )
            .with_description(Some(summary))
            .with_magnitude(props.mag)
            .with_source_url(non_empty(props.url.as_deref())),
        )
    }
}
