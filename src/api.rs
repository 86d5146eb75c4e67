//! HTTP API handlers for Disaster Watch.
//!
//! Every request triggers a fresh aggregation; there is no cache and no
//! persisted state. An empty event list is a valid 200 response, whether no
//! events occurred or every upstream feed failed.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::aggregation::Aggregator;
use crate::model::{DisasterEvent, DisasterStatistics, DisasterType, EventFilter, SeverityLevel};
use crate::style::{TypeShare, type_shares};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Aggregator,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/events", get(get_events))
        .route("/events/statistics", get(get_statistics))
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Query parameters shared by the event endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    /// Comma-separated disaster types (e.g. "earthquake,flood").
    pub types: Option<String>,
    /// Minimum severity (low, medium, high, critical).
    pub min_severity: Option<String>,
    /// Free-text match on title, description and affected countries.
    pub country: Option<String>,
}

impl EventsQuery {
    /// Convert into an [`EventFilter`], rejecting unknown enum names.
    pub fn to_filter(&self) -> Result<EventFilter, String> {
        let mut filter = EventFilter::default();

        if let Some(types) = &self.types {
            for name in types.split(',').map(str::trim).filter(|s| !s.is_empty()) {
                let t = DisasterType::parse(name)
                    .ok_or_else(|| format!("unknown disaster type '{}'", name))?;
                filter.types.insert(t);
            }
        }

        if let Some(raw) = self.min_severity.as_deref().map(str::trim) {
            if !raw.is_empty() && !raw.eq_ignore_ascii_case("all") {
                let level = SeverityLevel::parse(raw)
                    .ok_or_else(|| format!("unknown severity '{}'", raw))?;
                filter.min_severity = Some(level);
            }
        }

        filter.country = self.country.clone();
        Ok(filter)
    }
}

/// Response for GET /events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub events: Vec<DisasterEvent>,
}

/// Response for GET /events/statistics.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub generated_at: DateTime<Utc>,
    pub statistics: DisasterStatistics,
    pub breakdown: Vec<TypeShare>,
}

/// GET /events - Aggregated, de-duplicated events, newest first.
///
/// # Query Parameters
///
/// - `types` (optional): Comma-separated disaster types
/// - `min_severity` (optional): Minimum severity, or "all"
/// - `country` (optional): Substring to search for
///
/// # Response
///
/// ```json
/// {
///     "generatedAt": "2024-03-10T12:00:00Z",
///     "total": 1,
///     "events": [
///         {
///             "id": "usgs-us7000m9g4",
///             "type": "earthquake",
///             "title": "M 7.2 - 45 km E of Hualien City, Taiwan",
///             "latitude": 23.97,
///             "longitude": 121.98,
///             "severity": "critical",
///             "magnitude": 7.2,
///             "startDate": "2024-03-10T06:00:00Z",
///             "source": "USGS",
///             "status": "active"
///         }
///     ]
/// }
/// ```
#[instrument(skip(state))]
pub async fn get_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<EventsResponse>, StatusCode> {
    let filter = query.to_filter().map_err(|reason| {
        warn!(%reason, "Rejected events query");
        StatusCode::BAD_REQUEST
    })?;

    let events = filter.apply(state.aggregator.fetch_all().await);

    info!(event_count = events.len(), "Events queried");

    Ok(Json(EventsResponse {
        generated_at: Utc::now(),
        total: events.len(),
        events,
    }))
}

/// GET /events/statistics - Per-type counts over the (filtered) events.
#[instrument(skip(state))]
pub async fn get_statistics(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<StatisticsResponse>, StatusCode> {
    let filter = query.to_filter().map_err(|reason| {
        warn!(%reason, "Rejected statistics query");
        StatusCode::BAD_REQUEST
    })?;

    let events = filter.apply(state.aggregator.fetch_all().await);
    let statistics = DisasterStatistics::from_events(&events);

    info!(total = statistics.total, "Statistics queried");

    Ok(Json(StatisticsResponse {
        generated_at: Utc::now(),
        breakdown: type_shares(&statistics),
        statistics,
    }))
}

/// GET /health - Simple health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}
