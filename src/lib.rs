//! Disaster Watch - aggregated natural-disaster events from public feeds.
//!
//! # Overview
//!
//! Disaster Watch pulls the last week of events from three independent
//! sources, normalizes them into one [`model::DisasterEvent`] schema, removes
//! near-duplicate reports of the same physical event, and serves the merged
//! list newest first.
//!
//! # Sources
//!
//! - **GDACS**: cross-hazard alerts with a green/orange/red alert level
//! - **NASA EONET**: satellite-observed events (wildfires, storms, volcanoes)
//! - **USGS**: earthquakes of magnitude 4.5 and above
//! - **NASA FIRMS**: present but disabled (requires a MAP_KEY)
//!
//! # Modules
//!
//! - [`model`]: Unified event schema, statistics and filters
//! - [`classify`]: Source vocabulary to type/severity mapping
//! - [`data_sources`]: Upstream feed clients
//! - [`geo`]: Great-circle distance
//! - [`dedup`]: Cross-source deduplication
//! - [`aggregation`]: Concurrent fetch, merge and sort
//! - [`style`]: Display descriptors for types and severities
//! - [`api`]: HTTP API handlers
//! - [`config`]: Environment configuration

pub mod aggregation;
pub mod api;
pub mod classify;
pub mod config;
pub mod data_sources;
pub mod dedup;
pub mod geo;
pub mod model;
pub mod style;
