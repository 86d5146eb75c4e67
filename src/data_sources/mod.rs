//! Upstream natural-disaster feeds.
//!
//! Each client fetches one public feed and normalizes its records into
//! [`DisasterEvent`](crate::model::DisasterEvent)s.
//!
//! # Data Sources
//!
//! - [`gdacs`]: GDACS, cross-hazard alerts with a traffic-light severity
//! - [`eonet`]: NASA EONET, satellite-observed natural events
//! - [`usgs`]: USGS, the global earthquake catalog
//! - [`firms`]: NASA FIRMS fire detections (present but disabled)
//!
//! # Failure Semantics
//!
//! Every client exposes a fallible raw call returning [`SourceError`] and an
//! infallible `fetch_events` that logs the error and yields an empty list. A
//! failing source never aborts aggregation.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

pub mod eonet;
pub mod firms;
pub mod gdacs;
pub mod usgs;

pub use eonet::EonetClient;
pub use firms::FirmsClient;
pub use gdacs::GdacsClient;
pub use usgs::UsgsClient;

/// Default per-request timeout for upstream feeds.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Trailing window queried from every feed.
pub const LOOKBACK_DAYS: i64 = 7;

const USER_AGENT: &str = concat!("disaster-watch/", env!("CARGO_PKG_VERSION"));

/// Errors raised while fetching or decoding an upstream feed.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport failure (DNS, connection refused, timeout, body read).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("{feed} returned HTTP {status}")]
    Status {
        feed: &'static str,
        status: reqwest::StatusCode,
    },

    /// The body did not match the expected payload shape.
    #[error("failed to parse {feed} response: {error}")]
    Parse {
        feed: &'static str,
        error: serde_json::Error,
    },
}

/// Build the HTTP client shared by a feed's requests.
pub fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|e| {
            warn!(error = %e, "Failed to build configured HTTP client, using defaults");
            reqwest::Client::new()
        })
}

/// Send a request and decode a JSON body, mapping every failure mode onto
/// [`SourceError`].
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    feed: &'static str,
    request: reqwest::RequestBuilder,
) -> Result<T, SourceError> {
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status { feed, status });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|error| SourceError::Parse { feed, error })
}

/// Treat missing and blank strings alike.
pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse a feed timestamp.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as UTC) or a
/// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
