//! NASA FIRMS (Fire Information for Resource Management System) client.
//!
//! FIRMS publishes near real-time active-fire detections from MODIS and VIIRS.
//! Its area API requires a MAP_KEY, which this deployment does not provision,
//! so the client is wired into the aggregator but disabled: it performs no
//! request and contributes no events. Wildfires still arrive through EONET.
//!
//! # API Reference
//!
//! See: <https://firms.modaps.eosdis.nasa.gov/api/>

use tracing::{debug, warn};

use crate::model::DisasterEvent;

/// Client for the (disabled) FIRMS integration.
#[derive(Debug, Clone, Default)]
pub struct FirmsClient;

impl FirmsClient {
    /// Create a new FIRMS client.
    pub fn new() -> Self {
        Self
    }

    /// Whether the integration performs upstream requests.
    pub fn is_enabled(&self) -> bool {
        false
    }

    /// Log once, at startup, that the integration is switched off.
    pub fn log_disabled_notice(&self) {
        warn!(
            source = "NASA FIRMS",
            "FIRMS requires a MAP_KEY; integration disabled, wildfires come from EONET"
        );
    }

    /// Always returns an empty list.
    pub async fn fetch_events(&self) -> Vec<DisasterEvent> {
        debug!(source = "NASA FIRMS", "Skipping disabled source");
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_disabled_stub_returns_nothing() {
        let client = FirmsClient::new();

        assert!(!client.is_enabled());
        assert!(tokio_test::block_on(client.fetch_events()).is_empty());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[test]
    fn test_fetch_does_not_warn() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let client = FirmsClient::new();
            tokio_test::block_on(client.fetch_events());
            tokio_test::block_on(client.fetch_events());
        });

        let output = logs.text();
        assert!(output.contains("DEBUG"), "got {output}");
        assert!(!output.contains("WARN"), "got {output}");
    }

    #[test]
    fn test_disabled_notice_warns() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || FirmsClient::new().log_disabled_notice());

        let output = logs.text();
        assert!(output.contains("WARN"), "got {output}");
        assert!(output.contains("MAP_KEY"), "got {output}");
    }
}
