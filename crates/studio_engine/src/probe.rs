use std::time::Duration;

use async_trait::async_trait;
use studio_logging::{studio_debug, studio_warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct ProbeSettings {
    /// Base against which candidate paths such as `/Videos/X.mp4` are resolved.
    pub asset_base: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            asset_base: "http://localhost:3000".to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Cheap existence check for one candidate path.
#[async_trait]
pub trait AssetProber: Send + Sync {
    async fn exists(&self, candidate: &str) -> bool;
}

/// Probes candidates one at a time and returns the first that exists.
///
/// Nothing is probed after the first hit, and an empty list issues no probes.
pub async fn resolve_first(prober: &dyn AssetProber, candidates: &[String]) -> Option<String> {
    for candidate in candidates {
        if candidate.is_empty() {
            continue;
        }
        if prober.exists(candidate).await {
            studio_debug!("Candidate {} exists", candidate);
            return Some(candidate.clone());
        }
        studio_debug!("Candidate {} missing", candidate);
    }
    None
}

/// `HEAD` request per candidate; any success status means the asset exists.
#[derive(Debug, Clone)]
pub struct ReqwestProber {
    settings: ProbeSettings,
    client: reqwest::Client,
}

impl ReqwestProber {
    pub fn new(settings: ProbeSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self { settings, client })
    }
}

#[async_trait]
impl AssetProber for ReqwestProber {
    async fn exists(&self, candidate: &str) -> bool {
        let url = match asset_url(&self.settings.asset_base, candidate) {
            Ok(url) => url,
            Err(err) => {
                studio_warn!("Cannot build probe url for {}: {}", candidate, err);
                return false;
            }
        };
        match self.client.head(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                studio_warn!("Probe for {} failed, treating as missing: {}", candidate, err);
                false
            }
        }
    }
}

/// Joins a candidate path onto the asset base url.
pub fn asset_url(base: &str, candidate: &str) -> Result<Url, url::ParseError> {
    Url::parse(base)?.join(candidate)
}
