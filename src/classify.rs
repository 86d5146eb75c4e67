//! Source vocabulary classifiers.
//!
//! Maps source-specific codes (GDACS event types and alert colors, EONET
//! category titles, USGS magnitudes) onto [`DisasterType`] and
//! [`SeverityLevel`]. Every function here is total: unrecognized input lands
//! in an explicit default arm.

use crate::model::{DisasterType, SeverityLevel};

/// Map a GDACS event type code (`EQ`, `TC`, ...) to a disaster type.
///
/// Codes are matched exactly, as GDACS publishes them upper-case.
pub fn gdacs_event_type(code: &str) -> DisasterType {
    match code {
        "EQ" => DisasterType::Earthquake,
        "TC" => DisasterType::Cyclone,
        "FL" => DisasterType::Flood,
        "VO" => DisasterType::Volcano,
        "WF" => DisasterType::Fire,
        "DR" => DisasterType::Drought,
        _ => DisasterType::Other,
    }
}

/// Map a GDACS traffic-light alert level to a severity.
///
/// Case-insensitive. A missing or unknown level is `Low`.
pub fn gdacs_alert_level(level: Option<&str>) -> SeverityLevel {
    match level.map(|l| l.trim().to_lowercase()).as_deref() {
        Some("red") => SeverityLevel::Critical,
        Some("orange") => SeverityLevel::High,
        Some("green") => SeverityLevel::Medium,
        _ => SeverityLevel::Low,
    }
}

/// Map an EONET category title to a disaster type.
///
/// Uses keyword detection in priority order. Titles that match nothing fall
/// back to [`DisasterType::Storm`], not `Other`.
pub fn eonet_category(title: &str) -> DisasterType {
    let lower = title.to_lowercase();

    if contains_any(&lower, &["wildfire", "fire"]) {
        return DisasterType::Fire;
    }
    if contains_any(&lower, &["storm", "cyclone", "hurricane"]) {
        return DisasterType::Cyclone;
    }
    if lower.contains("flood") {
        return DisasterType::Flood;
    }
    if lower.contains("volcano") {
        return DisasterType::Volcano;
    }
    if lower.contains("drought") {
        return DisasterType::Drought;
    }

    DisasterType::Storm
}

/// Derive earthquake severity from magnitude.
pub fn earthquake_severity(magnitude: f64) -> SeverityLevel {
    if magnitude >= 7.0 {
        SeverityLevel::Critical
    } else if magnitude >= 6.0 {
        SeverityLevel::High
    } else if magnitude >= 5.0 {
        SeverityLevel::Medium
    } else {
        SeverityLevel::Low
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
