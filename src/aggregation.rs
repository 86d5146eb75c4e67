//! Aggregation of all disaster feeds into one de-duplicated, time-sorted list.
//!
//! # Pipeline
//!
//! 1. Fetch every source concurrently and wait for all of them.
//! 2. Concatenate in fixed source order: GDACS, EONET, USGS (then the
//!    disabled FIRMS stub).
//! 3. Drop near-duplicates, first occurrence wins ([`crate::dedup`]).
//! 4. Stable-sort by start date, newest first.
//!
//! Nothing in this module returns an error. A failed source contributes an
//! empty batch, and a fault in the merge step yields an empty result.

use std::time::Duration;

use tracing::{error, info};

use crate::data_sources::{EonetClient, FirmsClient, GdacsClient, UsgsClient};
use crate::dedup::dedupe;
use crate::model::DisasterEvent;

/// Base URLs and transport settings for the aggregator's clients.
#[derive(Debug, Clone, Default)]
pub struct AggregatorConfig {
    /// Override for the GDACS API base URL.
    pub gdacs_url: Option<String>,

    /// Override for the EONET API base URL.
    pub eonet_url: Option<String>,

    /// Override for the USGS FDSN base URL.
    pub usgs_url: Option<String>,

    /// Per-request timeout; `None` keeps the client default.
    pub request_timeout: Option<Duration>,
}

/// Fans out to every source and merges the results.
#[derive(Clone, Default)]
pub struct Aggregator {
    gdacs: GdacsClient,
    eonet: EonetClient,
    usgs: UsgsClient,
    firms: FirmsClient,
}

impl Aggregator {
    /// Create an aggregator against the production feeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an aggregator with the given overrides.
    pub fn with_config(config: &AggregatorConfig) -> Self {
        let mut gdacs = config
            .gdacs_url
            .as_deref()
            .map(GdacsClient::with_base_url)
            .unwrap_or_default();
        let mut eonet = config
            .eonet_url
            .as_deref()
            .map(EonetClient::with_base_url)
            .unwrap_or_default();
        let mut usgs = config
            .usgs_url
            .as_deref()
            .map(UsgsClient::with_base_url)
            .unwrap_or_default();

        if let Some(timeout) = config.request_timeout {
            gdacs = gdacs.with_timeout(timeout);
            eonet = eonet.with_timeout(timeout);
            usgs = usgs.with_timeout(timeout);
        }

        let firms = FirmsClient::new();
        if !firms.is_enabled() {
            firms.log_disabled_notice();
        }

        Self {
            gdacs,
            eonet,
            usgs,
            firms,
        }
    }

    /// Fetch, merge, de-duplicate and sort events from all sources.
    ///
    /// Always returns a list, possibly empty.
    pub async fn fetch_all(&self) -> Vec<DisasterEvent> {
        let this = self.clone();

        // A panic in the pipeline surfaces here as a JoinError.
        let handle = tokio::spawn(async move { this.fetch_and_merge().await });

        match handle.await {
            Ok(events) => events,
            Err(e) => {
                error!(error = %e, "Aggregation failed; returning no events");
                Vec::new()
            }
        }
    }

    async fn fetch_and_merge(&self) -> Vec<DisasterEvent> {
        let (gdacs, eonet, usgs, firms) = tokio::join!(
            self.gdacs.fetch_events(),
            self.eonet.fetch_events(),
            self.usgs.fetch_events(),
            self.firms.fetch_events(),
        );

        let counts = (gdacs.len(), eonet.len(), usgs.len());
        let merged = merge_events(vec![gdacs, eonet, usgs, firms]);

        info!(
            gdacs = counts.0,
            eonet = counts.1,
            usgs = counts.2,
            merged = merged.len(),
            "Aggregated disaster events"
        );

        merged
    }
}

/// Concatenate per-source batches in order, drop near-duplicates and sort by
/// start date, newest first.
///
/// The sort is stable, so among equal start dates the earlier batch wins.
pub fn merge_events(batches: Vec<Vec<DisasterEvent>>) -> Vec<DisasterEvent> {
    let all: Vec<DisasterEvent> = batches.into_iter().flatten().collect();

    let mut unique = dedupe(all);
    unique.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    unique
}
