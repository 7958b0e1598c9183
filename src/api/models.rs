use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier embedded in the page markup as `window.siteInfo = {...}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SiteInfo {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub host: String,
}

/// Response from the /cache endpoint: file key -> opaque metadata.
///
/// Values are never inspected. A sorted map keeps the download order stable
/// within a run.
pub type Manifest = BTreeMap<String, Value>;

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Scheme used for the derived /cache and /access URLs
    pub scheme: String,
    /// Per-request timeout; `None` waits indefinitely
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            timeout: None,
        }
    }
}
