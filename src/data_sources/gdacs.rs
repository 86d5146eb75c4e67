//! GDACS (Global Disaster Alert and Coordination System) client.
//!
//! GDACS is a cooperation framework between the UN and the European
//! Commission that issues cross-hazard alerts for earthquakes, tropical
//! cyclones, floods, volcanoes, wildfires and droughts. Every event carries a
//! green/orange/red alert level.
//!
//! # API Reference
//!
//! See: <https://www.gdacs.org/gdacsapi/swagger/index.html>

use std::fmt;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::{
    DEFAULT_REQUEST_TIMEOUT, LOOKBACK_DAYS, SourceError, build_http_client, fetch_json,
    non_empty, parse_timestamp,
};
use crate::classify::{gdacs_alert_level, gdacs_event_type};
use crate::model::{DisasterEvent, EventSource};

/// Base URL for the GDACS API.
const GDACS_API_BASE: &str = "https://www.gdacs.org/gdacsapi/api";

/// Event type codes requested from the feed.
const EVENT_TYPES: &str = "EQ;TC;FL;VO;WF;DR";

/// Alert levels requested from the feed.
const ALERT_LEVELS: &str = "orange;red;green";

/// Maximum events per request.
const PAGE_SIZE: u32 = 100;

/// Title used when an event has no name.
const UNNAMED_EVENT: &str = "Unnamed event";

/// Client for querying the GDACS event list API.
#[derive(Clone)]
pub struct GdacsClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for GdacsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GdacsClient {
    /// Create a new GDACS client with default settings.
    pub fn new() -> Self {
        Self::with_base_url(GDACS_API_BASE)
    }

    /// Create a new GDACS client with a custom base URL (for testing).
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

    /// Search events of all supported types between two dates (inclusive).
    ///
    /// # Arguments
    ///
    /// * `from` - First day of the window
    /// * `to` - Last day of the window
    pub async fn search_events(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<GdacsEventList, SourceError> {
        let url = format!(
            "{}/events/geteventlist/SEARCH?eventlist={}&fromdate={}&todate={}&alertlevel={}&pagesize={}",
            self.base_url,
            urlencoding::encode(EVENT_TYPES),
            from.format("%Y-%m-%d"),
            to.format("%Y-%m-%d"),
            urlencoding::encode(ALERT_LEVELS),
            PAGE_SIZE
        );

        let request = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json");
        fetch_json("GDACS", request).await
    }

    /// Convenience method: events from the trailing lookback window.
    pub async fn get_recent_events(&self) -> Result<GdacsEventList, SourceError> {
        let today = Utc::now().date_naive();
        let from = today - ChronoDuration::days(LOOKBACK_DAYS);
        self.search_events(from, today).await
    }

    /// Fetch and normalize recent events. Never fails; errors are logged
    /// and yield an empty list.
    pub async fn fetch_events(&self) -> Vec<DisasterEvent> {
        match self.get_recent_events().await {
            Ok(list) => {
                let events = list.to_events();
                info!(source = "GDACS", count = events.len(), "Fetched events");
                events
            }
            Err(e) => {
                warn!(source = "GDACS", error = %e, "Failed to fetch events");
                Vec::new()
            }
        }
    }
}

// ============================================================================
// Response types
// ============================================================================

/// Response from the GDACS event list endpoint.
///
/// Features are kept as raw JSON and decoded one by one, so a single
/// malformed record only drops itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GdacsEventList {
    #[serde(default)]
    pub features: Vec<Value>,
}

impl GdacsEventList {
    /// Normalize every well-formed record, in feed order.
    pub fn to_events(&self) -> Vec<DisasterEvent> {
        self.features
            .iter()
            .filter_map(|feature| match GdacsEvent::from_feature(feature) {
                Ok(event) => event.to_disaster_event(),
                Err(e) => {
                    debug!(error = %e, "Skipping malformed GDACS record");
                    None
                }
            })
            .collect()
    }
}

/// GDACS event identifiers are numeric in practice but strings in some
/// responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GdacsEventId {
    Number(i64),
    Text(String),
}

impl fmt::Display for GdacsEventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GdacsEventId::Number(n) => write!(f, "{n}"),
            GdacsEventId::Text(s) => f.write_str(s),
        }
    }
}

/// A single GDACS event record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GdacsEvent {
    pub eventid: GdacsEventId,

    /// Hazard code (EQ, TC, FL, VO, WF, DR).
    #[serde(default)]
    pub eventtype: String,

    #[serde(default, alias = "name")]
    pub eventname: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub htmldescription: Option<String>,

    /// Traffic-light alert level (Green, Orange, Red).
    #[serde(default)]
    pub alertlevel: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub fromdate: String,

    #[serde(default)]
    pub todate: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(default)]
    pub severitydata: Option<GdacsSeverityData>,

    #[serde(default)]
    pub url: Option<GdacsUrls>,
}

/// Nested severity block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GdacsSeverityData {
    #[serde(default)]
    pub severity: Option<f64>,

    #[serde(default)]
    pub severitytext: Option<String>,
}

/// Links published alongside an event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GdacsUrls {
    #[serde(default)]
    pub geometry: Option<String>,

    #[serde(default)]
    pub report: Option<String>,
}

impl GdacsEvent {
    /// Decode one feature.
    ///
    /// Accepts a flat record and a GeoJSON feature whose fields sit under
    /// `properties`. For the latter, a missing top-level position is read
    /// from `geometry.coordinates` (`[lon, lat]`).
    pub fn from_feature(feature: &Value) -> Result<Self, serde_json::Error> {
        let Some(properties) = feature.get("properties") else {
            return Self::deserialize(feature);
        };

        let mut event = Self::deserialize(properties)?;
        let position = (event.latitude.is_none() || event.longitude.is_none())
            .then(|| point_coordinates(feature))
            .flatten();
        if let Some((lon, lat)) = position {
            event.longitude = Some(lon);
            event.latitude = Some(lat);
        }
        Ok(event)
    }

    /// Normalize into the unified schema.
    ///
    /// Returns `None` for records without coordinates or with an unparseable
    /// start date.
    pub fn to_disaster_event(&self) -> Option<DisasterEvent> {
        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            debug!(eventid = %self.eventid, "Skipping GDACS event without coordinates");
            return None;
        };

        let Some(start) = parse_timestamp(&self.fromdate) else {
            debug!(eventid = %self.eventid, fromdate = %self.fromdate, "Skipping GDACS event with invalid start date");
            return None;
        };

        let title = non_empty(self.eventname.as_deref()).unwrap_or_else(|| UNNAMED_EVENT.to_string());
        let description = non_empty(self.description.as_deref())
            .or_else(|| non_empty(self.htmldescription.as_deref()));

        let mut event = DisasterEvent::new(
            EventSource::Gdacs,
            &self.eventid.to_string(),
            gdacs_event_type(&self.eventtype),
            &title,
            latitude,
            longitude,
            gdacs_alert_level(self.alertlevel.as_deref()),
            start,
        )
        .with_description(description)
        .with_magnitude(self.severitydata.as_ref().and_then(|s| s.severity))
        .with_source_url(
            self.url
                .as_ref()
                .and_then(|u| non_empty(u.report.as_deref())),
        )
        .with_affected_countries(non_empty(self.country.as_deref()).map(|c| vec![c]));

        if let Some(end) = self.todate.as_deref().and_then(non_empty_date) {
            event = event.with_end(end);
        }

        Some(event)
    }
}

fn point_coordinates(feature: &Value) -> Option<(f64, f64)> {
    let coordinates = feature.get("geometry")?.get("coordinates")?.as_array()?;
    Some((coordinates.first()?.as_f64()?, coordinates.get(1)?.as_f64()?))
}

fn non_empty_date(raw: &str) -> Option<chrono::DateTime<Utc>> {
    non_empty(Some(raw)).and_then(|s| parse_timestamp(&s))
}
