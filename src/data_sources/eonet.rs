//! NASA EONET (Earth Observatory Natural Event Tracker) client.
//!
//! EONET curates natural events observed from orbit: wildfires, severe
//! storms, volcanic eruptions, floods, drought and more. Moving events
//! (storms) carry one geometry per observation, ordered in time.
//!
//! # API Reference
//!
//! See: <https://eonet.gsfc.nasa.gov/docs/v3>
//!
//! EONET publishes no severity signal; every event is normalized as
//! [`SeverityLevel::Medium`].

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::{
    DEFAULT_REQUEST_TIMEOUT, LOOKBACK_DAYS, SourceError, build_http_client, fetch_json,
    non_empty, parse_timestamp,
};
use crate::classify::eonet_category;
use crate::model::{DisasterEvent, DisasterType, EventSource, SeverityLevel};

/// Base URL for the EONET v3 API.
const EONET_API_BASE: &str = "https://eonet.gsfc.nasa.gov/api/v3";

/// Client for querying NASA EONET.
#[derive(Clone)]
pub struct EonetClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for EonetClient {
    fn default() -> Self {
        Self::new()
    }
}

impl EonetClient {
    /// Create a new EONET client with default settings.
    pub fn new() -> Self {
        Self::with_base_url(EONET_API_BASE)
    }

    /// Create a new EONET client with a custom base URL (for testing).
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

    /// Get events by status over the trailing `days`.
    ///
    /// # Arguments
    ///
    /// * `status` - "open", "closed" or "all"
    /// * `days` - Number of days to look back
    pub async fn get_events(&self, status: &str, days: i64) -> Result<EonetEventsResponse, SourceError> {
        let url = format!(
            "{}/events?status={}&days={}",
            self.base_url,
            urlencoding::encode(status),
            days
        );

        fetch_json("NASA EONET", self.client.get(&url)).await
    }

    /// Convenience method: open events from the lookback window.
    pub async fn get_open_events(&self) -> Result<EonetEventsResponse, SourceError> {
        self.get_events("open", LOOKBACK_DAYS).await
    }

    /// Fetch and normalize open events. Never fails; errors are logged and
    /// yield an empty list.
    pub async fn fetch_events(&self) -> Vec<DisasterEvent> {
        match self.get_open_events().await {
            Ok(response) => {
                let events = response.to_events();
                info!(source = "NASA EONET", count = events.len(), "Fetched events");
                events
            }
            Err(e) => {
                warn!(source = "NASA EONET", error = %e, "Failed to fetch events");
                Vec::new()
            }
        }
    }
}

// ============================================================================
// Response types
// ============================================================================

/// Response from the EONET events endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EonetEventsResponse {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub events: Vec<EonetEvent>,
}

impl EonetEventsResponse {
    /// Normalize every well-formed event, in feed order.
    pub fn to_events(&self) -> Vec<DisasterEvent> {
        self.events
            .iter()
            .filter_map(EonetEvent::to_disaster_event)
            .collect()
    }
}

/// A single tracked natural event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EonetEvent {
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub link: Option<String>,

    /// Closure timestamp; `None` while the event is open.
    #[serde(default)]
    pub closed: Option<String>,

    #[serde(default)]
    pub categories: Vec<EonetCategory>,

    #[serde(default)]
    pub sources: Vec<EonetSource>,

    /// Observations, oldest first.
    #[serde(default)]
    pub geometry: Vec<EonetGeometry>,
}

/// Event category reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EonetCategory {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,
}

/// Upstream reporting source reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EonetSource {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub url: String,
}

/// A time-stamped observation of an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EonetGeometry {
    #[serde(default)]
    pub date: String,

    /// GeoJSON geometry type ("Point", "Polygon").
    #[serde(default, rename = "type")]
    pub geometry_type: String,

    pub coordinates: EonetCoordinates,
}

/// GeoJSON coordinates: a flat `[lon, lat]` position or arbitrarily nested
/// arrays of positions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EonetCoordinates {
    Position(Vec<f64>),
    Nested(Vec<EonetCoordinates>),
}

impl EonetCoordinates {
    /// First `(longitude, latitude)` pair, descending into the first element
    /// of nested arrays.
    pub fn first_position(&self) -> Option<(f64, f64)> {
        match self {
            EonetCoordinates::Position(values) => match values.as_slice() {
                [lon, lat, ..] => Some((*lon, *lat)),
                _ => None,
            },
            EonetCoordinates::Nested(items) => items.first()?.first_position(),
        }
    }
}

impl EonetEvent {
    /// Normalize into the unified schema, using the most recent geometry as
    /// the event's position and onset.
    ///
    /// Returns `None` for events without a usable geometry.
    pub fn to_disaster_event(&self) -> Option<DisasterEvent> {
        let Some(latest) = self.geometry.last() else {
            debug!(id = %self.id, "Skipping EONET event without geometry");
            return None;
        };

        let Some((longitude, latitude)) = latest.coordinates.first_position() else {
            debug!(id = %self.id, "Skipping EONET event with empty coordinates");
            return None;
        };

        let Some(start) = parse_timestamp(&latest.date) else {
            debug!(id = %self.id, date = %latest.date, "Skipping EONET event with invalid date");
            return None;
        };

        let disaster_type = self
            .categories
            .first()
            .map(|c| eonet_category(&c.title))
            .unwrap_or(DisasterType::Other);

        let source_url = non_empty(self.link.as_deref())
            .or_else(|| non_empty(self.sources.first().map(|s| s.url.as_str())));

        let mut event = DisasterEvent::new(
            EventSource::Eonet,
            &self.id,
            disaster_type,
            &self.title,
            latitude,
            longitude,
            SeverityLevel::Medium,
            start,
        )
        .with_description(non_empty(self.description.as_deref()))
        .with_source_url(source_url);

        if let Some(end) = self.closed.as_deref().and_then(parse_timestamp) {
            event = event.with_end(end);
        }

        Some(event)
    }
}
