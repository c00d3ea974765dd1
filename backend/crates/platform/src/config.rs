//! Document Store Configuration

use std::time::Duration;

/// Connection settings for the document store
///
/// Injected at construction time; nothing in the service reads a global base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Root URL of the store, e.g. `https://my-project.firebaseio.com/`
    pub base_url: String,
    /// Marker appended to the last path segment of every document URL
    pub document_suffix: String,
    /// Per-request timeout enforced by the HTTP client
    pub request_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            // Firebase Realtime Database emulator
            base_url: "http://127.0.0.1:9000/".to_string(),
            document_suffix: ".json".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}
