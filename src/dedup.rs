//! Cross-source deduplication.
//!
//! Different agencies report the same physical event under different IDs,
//! with slightly different coordinates and timestamps. Two events are treated
//! as the same report when they share a type, lie within
//! [`MAX_DISTANCE_KM`] of each other, and started less than
//! [`MAX_TIME_DELTA_HOURS`] apart.

use chrono::Duration;
use tracing::debug;

use crate::geo::haversine_km;
use crate::model::DisasterEvent;

/// Maximum great-circle distance between duplicate reports (inclusive).
pub const MAX_DISTANCE_KM: f64 = 50.0;

/// Start times of duplicate reports must differ by strictly less than this.
pub const MAX_TIME_DELTA_HOURS: i64 = 24;

/// Check whether `candidate` is a near-duplicate of `existing`.
pub fn is_duplicate(existing: &DisasterEvent, candidate: &DisasterEvent) -> bool {
    if existing.disaster_type != candidate.disaster_type {
        return false;
    }

    let distance = haversine_km(
        existing.latitude,
        existing.longitude,
        candidate.latitude,
        candidate.longitude,
    );
    if distance > MAX_DISTANCE_KM {
        return false;
    }

    let delta = (existing.start_date - candidate.start_date).abs();
    delta < Duration::hours(MAX_TIME_DELTA_HOURS)
}

/// Remove near-duplicate events, keeping the first occurrence.
///
/// Stable and deterministic: kept events appear in input order. Quadratic in
/// the number of events.
pub fn dedupe(events: Vec<DisasterEvent>) -> Vec<DisasterEvent> {
    let mut kept: Vec<DisasterEvent> = Vec::with_capacity(events.len());

    for event in events {
        if let Some(existing) = kept.iter().find(|k| is_duplicate(k, &event)) {
            debug!(
                dropped = %event.id,
                kept = %existing.id,
                "Dropping duplicate event"
            );
            continue;
        }
        kept.push(event);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DisasterType, EventSource, SeverityLevel};
    use chrono::{DateTime, TimeZone, Utc};

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 6, 0, 0).unwrap()
    }

    fn event(
        id: &str,
        disaster_type: DisasterType,
        lat: f64,
        lon: f64,
        offset_hours: i64,
    ) -> DisasterEvent {
        DisasterEvent::new(
            EventSource::Usgs,
            id,
            disaster_type,
            id,
            lat,
            lon,
            SeverityLevel::Medium,
            base_time() + Duration::hours(offset_hours),
        )
    }

    // ~0.09 degrees of latitude is ~10 km, ~0.72 is ~80 km.
    const TEN_KM_LAT: f64 = 0.09;
    const EIGHTY_KM_LAT: f64 = 0.72;

    #[test]
    fn test_nearby_events_collapse() {
        let events = vec![
            event("a", DisasterType::Earthquake, 38.0, 142.0, 0),
            event("b", DisasterType::Earthquake, 38.0 + TEN_KM_LAT, 142.0, 2),
        ];

        let kept = dedupe(events);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "usgs-a");
    }

    #[test]
    fn test_distant_events_do_not_collapse() {
        let events = vec![
            event("a", DisasterType::Earthquake, 38.0, 142.0, 0),
            event("b", DisasterType::Earthquake, 38.0 + EIGHTY_KM_LAT, 142.0, 2),
        ];

        assert_eq!(dedupe(events).len(), 2);
    }

    #[test]
    fn test_events_far_apart_in_time_do_not_collapse() {
        let events = vec![
            event("a", DisasterType::Flood, 10.0, 20.0, 0),
            event("b", DisasterType::Flood, 10.0, 20.0, 36),
        ];

        assert_eq!(dedupe(events).len(), 2);
    }

    #[test]
    fn test_exactly_24_hours_is_not_duplicate() {
        let events = vec![
            event("a", DisasterType::Flood, 10.0, 20.0, 0),
            event("b", DisasterType::Flood, 10.0, 20.0, 24),
        ];

        assert_eq!(dedupe(events).len(), 2);
    }

    #[test]
    fn test_different_types_do_not_collapse() {
        let events = vec![
            event("a", DisasterType::Flood, 10.0, 20.0, 0),
            event("b", DisasterType::Cyclone, 10.0, 20.0, 0),
        ];

        assert_eq!(dedupe(events).len(), 2);
    }

    #[test]
    fn test_order_preserved_among_kept() {
        let events = vec![
            event("c", DisasterType::Fire, -33.0, 151.0, 5),
            event("a", DisasterType::Earthquake, 38.0, 142.0, 0),
            event("dup", DisasterType::Fire, -33.0, 151.0, 6),
            event("b", DisasterType::Volcano, 19.4, -155.3, -10),
        ];

        let ids: Vec<_> = dedupe(events).into_iter().map(|e| e.id).collect();

        assert_eq!(ids, vec!["usgs-c", "usgs-a", "usgs-b"]);
    }

    #[test]
    fn test_dedupe_is_idempotent() {
        let events = vec![
            event("a", DisasterType::Earthquake, 38.0, 142.0, 0),
            event("b", DisasterType::Earthquake, 38.05, 142.0, 1),
            event("c", DisasterType::Earthquake, 38.0, 142.0, 30),
            event("d", DisasterType::Flood, 38.0, 142.0, 0),
            event("e", DisasterType::Flood, 60.0, 10.0, 0),
        ];

        let once = dedupe(events);
        let twice = dedupe(once.clone());

        assert_eq!(once, twice);
    }

    // ~0.36 degrees of latitude is ~40 km.
    const FORTY_KM_LAT: f64 = 0.36;

    #[test]
    fn test_chain_of_near_duplicates_keeps_first_seen() {
        // a~b and b~c, but a and c are ~80 km apart
        let a = event("a", DisasterType::Fire, 0.0, 30.0, 0);
        let b = event("b", DisasterType::Fire, FORTY_KM_LAT, 30.0, 1);
        let c = event("c", DisasterType::Fire, 2.0 * FORTY_KM_LAT, 30.0, 2);

        assert!(is_duplicate(&a, &b));
        assert!(is_duplicate(&b, &c));
        assert!(!is_duplicate(&a, &c));

        let forward = dedupe(vec![a.clone(), b.clone(), c.clone()]);
        let ids: Vec<_> = forward.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["usgs-a", "usgs-c"]);
        assert_eq!(dedupe(forward.clone()), forward);

        let from_middle = dedupe(vec![b, a, c]);
        let ids: Vec<_> = from_middle.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["usgs-b"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedupe(Vec::new()).is_empty());
    }
}
