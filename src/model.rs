//! Data models for Disaster Watch.
//!
//! Every upstream feed is normalized into a [`DisasterEvent`]. The enumerations
//! here are closed: classifiers in [`crate::classify`] are total functions onto
//! them, so downstream code (deduplication, statistics, filters) can match on
//! them exhaustively.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of natural hazard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisasterType {
    Earthquake,
    Fire,
    Cyclone,
    Flood,
    Volcano,
    Drought,
    Storm,
    Other,
}

impl DisasterType {
    /// All variants, in display order.
    pub const ALL: [DisasterType; 8] = [
        DisasterType::Earthquake,
        DisasterType::Fire,
        DisasterType::Cyclone,
        DisasterType::Flood,
        DisasterType::Volcano,
        DisasterType::Drought,
        DisasterType::Storm,
        DisasterType::Other,
    ];

    /// Get the wire name (as used in query strings and JSON).
    pub fn as_str(&self) -> &'static str {
        match self {
            DisasterType::Earthquake => "earthquake",
            DisasterType::Fire => "fire",
            DisasterType::Cyclone => "cyclone",
            DisasterType::Flood => "flood",
            DisasterType::Volcano => "volcano",
            DisasterType::Drought => "drought",
            DisasterType::Storm => "storm",
            DisasterType::Other => "other",
        }
    }

    /// Parse a wire name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value))
    }
}

/// Ordered severity scale.
///
/// Ordering follows the declaration order, so `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityLevel {
    /// Ordinal rank, 1 (low) through 4 (critical).
    pub fn ordinal(&self) -> u8 {
        match self {
            SeverityLevel::Low => 1,
            SeverityLevel::Medium => 2,
            SeverityLevel::High => 3,
            SeverityLevel::Critical => 4,
        }
    }

    /// Get the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Low => "low",
            SeverityLevel::Medium => "medium",
            SeverityLevel::High => "high",
            SeverityLevel::Critical => "critical",
        }
    }

    /// Parse a wire name, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "low" => Some(SeverityLevel::Low),
            "medium" => Some(SeverityLevel::Medium),
            "high" => Some(SeverityLevel::High),
            "critical" => Some(SeverityLevel::Critical),
            _ => None,
        }
    }
}

/// The upstream feed an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventSource {
    #[serde(rename = "GDACS")]
    Gdacs,
    #[serde(rename = "NASA EONET")]
    Eonet,
    #[serde(rename = "USGS")]
    Usgs,
}

impl EventSource {
    /// Prefix used when building globally unique event IDs.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            EventSource::Gdacs => "gdacs",
            EventSource::Eonet => "eonet",
            EventSource::Usgs => "usgs",
        }
    }
}

/// Lifecycle status, derived from the presence of an end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Closed,
}

/// A single natural-disaster event in the unified schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterEvent {
    /// `<source-prefix>-<native-id>`; unique within one source only.
    pub id: String,

    #[serde(rename = "type")]
    pub disaster_type: DisasterType,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Decimal degrees, WGS84.
    pub latitude: f64,

    /// Decimal degrees, WGS84.
    pub longitude: f64,

    pub severity: SeverityLevel,

    /// Source-specific intensity (Richter magnitude, GDACS severity score).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,

    pub start_date: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,

    pub source: EventSource,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_countries: Option<Vec<String>>,

    pub status: EventStatus,
}

impl DisasterEvent {
    /// Create a new, active event with the required fields.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        source: EventSource,
        native_id: &str,
        disaster_type: DisasterType,
        title: &str,
        latitude: f64,
        longitude: f64,
        severity: SeverityLevel,
        start_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("{}-{}", source.id_prefix(), native_id),
            disaster_type,
            title: title.to_string(),
            description: None,
            latitude,
            longitude,
            severity,
            magnitude: None,
            start_date,
            end_date: None,
            source,
            source_url: None,
            affected_countries: None,
            status: EventStatus::Active,
        }
    }

    /// Set the end date and mark the event as closed.
    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end_date = Some(end);
        self.status = EventStatus::Closed;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_magnitude(mut self, magnitude: Option<f64>) -> Self {
        self.magnitude = magnitude;
        self
    }

    pub fn with_source_url(mut self, url: Option<String>) -> Self {
        self.source_url = url;
        self
    }

    pub fn with_affected_countries(mut self, countries: Option<Vec<String>>) -> Self {
        self.affected_countries = countries;
        self
    }

    /// Check if the event is still ongoing.
    pub fn is_active(&self) -> bool {
        self.status == EventStatus::Active
    }
}

/// Per-type event counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisasterStatistics {
    pub earthquake: usize,
    pub fire: usize,
    pub cyclone: usize,
    pub flood: usize,
    pub volcano: usize,
    pub drought: usize,
    pub storm: usize,
    pub other: usize,
    pub total: usize,
}

impl DisasterStatistics {
    /// Fold a list of events into counters.
    pub fn from_events(events: &[DisasterEvent]) -> Self {
        events.iter().fold(Self::default(), |mut stats, event| {
            *stats.counter_mut(event.disaster_type) += 1;
            stats.total += 1;
            stats
        })
    }

    /// Count for a single type.
    pub fn count(&self, disaster_type: DisasterType) -> usize {
        match disaster_type {
            DisasterType::Earthquake => self.earthquake,
            DisasterType::Fire => self.fire,
            DisasterType::Cyclone => self.cyclone,
            DisasterType::Flood => self.flood,
            DisasterType::Volcano => self.volcano,
            DisasterType::Drought => self.drought,
            DisasterType::Storm => self.storm,
            DisasterType::Other => self.other,
        }
    }

    fn counter_mut(&mut self, disaster_type: DisasterType) -> &mut usize {
        match disaster_type {
            DisasterType::Earthquake => &mut self.earthquake,
            DisasterType::Fire => &mut self.fire,
            DisasterType::Cyclone => &mut self.cyclone,
            DisasterType::Flood => &mut self.flood,
            DisasterType::Volcano => &mut self.volcano,
            DisasterType::Drought => &mut self.drought,
            DisasterType::Storm => &mut self.storm,
            DisasterType::Other => &mut self.other,
        }
    }
}

/// Filter over an already-aggregated event list.
///
/// All criteria are conjunctive. An empty `types` set matches every type.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub types: BTreeSet<DisasterType>,
    pub min_severity: Option<SeverityLevel>,
    /// Case-insensitive substring matched against title, description and
    /// affected countries.
    pub country: Option<String>,
}

impl EventFilter {
    /// Check whether a single event passes the filter.
    pub fn matches(&self, event: &DisasterEvent) -> bool {
        if !self.types.is_empty() && !self.types.contains(&event.disaster_type) {
            return false;
        }

        if let Some(min) = self.min_severity {
            if event.severity < min {
                return false;
            }
        }

        match self.country.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => {
                let needle = needle.to_lowercase();
                let contains = |s: &str| s.to_lowercase().contains(&needle);

                contains(&event.title)
                    || event.description.as_deref().is_some_and(contains)
                    || event
                        .affected_countries
                        .iter()
                        .flatten()
                        .any(|c| contains(c))
            }
            _ => true,
        }
    }

    /// Apply the filter, preserving input order.
    pub fn apply(&self, events: Vec<DisasterEvent>) -> Vec<DisasterEvent> {
        events.into_iter().filter(|e| self.matches(e)).collect()
    }
}
